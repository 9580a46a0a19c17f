//! Map parsing functionality for converting world map text into structured data.
//!
//! A world file consists of property lines (`@name x,y`), comment lines (`; ...`) and tile rows.
//! Rows may be shorter than the widest row; missing cells are treated as empty space.

use glam::IVec2;
use tracing::trace;

use crate::error::ParseError;
use crate::map::{Food, Terrain, WorldMap};

/// Parser for converting raw world text into a [`WorldMap`].
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into its terrain and food layers.
    pub fn parse_character(c: char) -> Option<(Terrain, Food)> {
        match c {
            '#' => Some((Terrain::Wall, Food::None)),
            '.' => Some((Terrain::Empty, Food::Pellet)),
            'o' => Some((Terrain::Empty, Food::Energizer)),
            ' ' | '_' => Some((Terrain::Empty, Food::None)),
            'T' => Some((Terrain::Tunnel, Food::None)),
            '=' => Some((Terrain::Door, Food::None)),
            _ => None,
        }
    }

    /// Parses a property line of the form `@name x,y`.
    fn parse_property(line_number: usize, line: &str) -> Result<(String, IVec2), ParseError> {
        let invalid = || ParseError::InvalidProperty {
            line: line_number,
            text: line.to_string(),
        };

        let body = line.trim_start_matches('@').trim();
        let (name, value) = body.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let (x, y) = value.trim().split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;

        Ok((name.to_string(), IVec2::new(x, y)))
    }

    /// Parses world text into a map.
    ///
    /// # Errors
    ///
    /// Returns an error if the text contains unknown tile characters, malformed property lines,
    /// or no tile rows at all.
    pub fn parse_world(name: &str, text: &str) -> Result<WorldMap, ParseError> {
        let mut properties = Vec::new();
        let mut rows: Vec<&str> = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.starts_with('@') {
                properties.push(Self::parse_property(index + 1, line)?);
            } else if line.starts_with(';') || line.trim().is_empty() {
                continue;
            } else {
                rows.push(line);
            }
        }

        if rows.is_empty() {
            return Err(ParseError::Empty);
        }

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut terrain = vec![Terrain::Empty; width * height];
        let mut food = vec![Food::None; width * height];

        for (y, row) in rows.iter().enumerate() {
            for (x, character) in row.chars().enumerate() {
                let (t, f) = Self::parse_character(character).ok_or(ParseError::UnknownCharacter {
                    character,
                    row: y,
                    column: x,
                })?;
                terrain[y * width + x] = t;
                food[y * width + x] = f;
            }
        }

        trace!(name, width, height, properties = properties.len(), "Parsed world map");
        Ok(WorldMap::new(
            name,
            IVec2::new(width as i32, height as i32),
            terrain,
            food,
            properties,
        ))
    }
}

//! Centralized error types for the arcade simulation.
//!
//! The simulation itself never fails mid-tick; errors only surface while a level is being
//! built (maps) or around the edges of the core (configuration, high-score persistence).

use std::io;
use std::path::PathBuf;

/// Errors the game model returns while building a level.
///
/// Persistence and configuration failures are reported through their own types, since they
/// never stop a game from running.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character {character:?} in row {row}, column {column}")]
    UnknownCharacter { character: char, row: usize, column: usize },
    #[error("Malformed property line {line}: {text:?}")]
    InvalidProperty { line: usize, text: String },
    #[error("Map contains no tile rows")]
    Empty,
}

/// Errors related to map lookup and loading.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("No map with number {0} is available")]
    MissingMap(usize),

    #[error("Map file {path} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Map {name} is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ParseError,
    },
}

/// Errors raised by the high-score store.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("High score file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while assembling the runtime settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Settings could not be extracted: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Unknown game variant: {0}")]
    UnknownVariant(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

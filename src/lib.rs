//! Deterministic, tick-driven simulation core for Pac-Man, Ms. Pac-Man and Pac-Man XXL.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod persistence;
pub mod variant;

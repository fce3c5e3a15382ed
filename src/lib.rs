//! Toroidal Game of Life
//!
//! This library steps Conway's Game of Life on a fixed-size wrap-around grid,
//! tracking how many consecutive generations each cell has been alive.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{step, Cell, Grid, GridError};
pub use simulation::{RunReport, Simulation};


//! Game of Life core functionality

pub mod cell;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use cell::Cell;
pub use error::{GridError, GridResult};
pub use grid::{alive_count, cell_at, dead_count, load_grid, new_grid, Grid};
pub use io::{
    create_example_seeds, load_grid_from_file, parse_grid_from_string, write_generation,
    GridIoError,
};
pub use rules::{step, GameOfLifeRules};

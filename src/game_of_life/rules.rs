//! Generation transition on a toroidal grid

use super::{Cell, Grid};
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Advance one generation, returning the new grid and generation number.
    ///
    /// The input grid is only read; the caller keeps it as history if needed.
    pub fn step(current: &Grid, generation: u64) -> (Grid, u64) {
        (Self::evolve(current), generation + 1)
    }

    /// Apply Game of Life rules to evolve the grid one generation forward
    pub fn evolve(current: &Grid) -> Grid {
        let (rows, cols) = (current.rows(), current.cols());

        // Rows are computed in parallel; every read goes to the frozen `current`
        let next_cells: Vec<Cell> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|row| (0..cols).map(move |col| Self::next_cell(current, row, col)))
            .collect();

        Grid::from_cells(rows, cols, next_cells)
    }

    /// Compute the next state of a single cell from the current grid
    pub fn next_cell(current: &Grid, row: usize, col: usize) -> Cell {
        let current_cell = current.cells()[current.index(row, col)];
        let neighbors = current.count_neighbors(row, col);

        // Start from the outgoing age so survivors keep counting upward
        let mut next = Cell::with_age(current_cell.age());
        if Self::should_be_alive(current_cell.is_alive(), neighbors) {
            next.grow();
        } else {
            next.kill();
        }
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        match (current_state, neighbor_count) {
            (true, 2) | (true, 3) | (false, 3) => true,
            _ => false,
        }
    }

    /// Whether two grids hold the same living pattern, ignoring ages
    pub fn same_pattern(grid1: &Grid, grid2: &Grid) -> bool {
        grid1.rows() == grid2.rows()
            && grid1.cols() == grid2.cols()
            && grid1.states() == grid2.states()
    }
}

/// Advance `grid` by one generation
pub fn step(grid: &Grid, generation: u64) -> (Grid, u64) {
    GameOfLifeRules::step(grid, generation)
}

//! Toroidal grid representation and utilities

use super::cell::Cell;
use super::error::{GridError, GridResult};
use itertools::iproduct;
use serde::Serialize;
use std::fmt;

/// A dense rectangular board whose edges wrap around
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> GridResult<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::new(); rows * cols],
        })
    }

    /// Create a grid from a 2D matrix of ages
    pub fn from_ages(ages: Vec<Vec<u32>>) -> GridResult<Self> {
        let rows = ages.len();
        let cols = ages.first().map_or(0, Vec::len);
        check_dimensions(rows, cols)?;

        for (row, line) in ages.iter().enumerate() {
            if line.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
        }

        let cells = ages.into_iter().flatten().map(Cell::with_age).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid of declared size from externally parsed, signed ages.
    ///
    /// Every value is checked: the matrix must be exactly `rows x cols` and
    /// no age may be negative.
    pub fn load(rows: usize, cols: usize, ages: &[Vec<i64>]) -> GridResult<Self> {
        check_dimensions(rows, cols)?;
        if ages.len() != rows {
            return Err(GridError::DimensionMismatch {
                expected: rows,
                actual: ages.len(),
            });
        }

        for (row, line) in ages.iter().enumerate() {
            if line.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
        }

        // Every row is now known to hold exactly `cols` values
        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in ages.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value < 0 {
                    return Err(GridError::NegativeAge { row, col, value });
                }
                let age = u32::try_from(value)
                    .map_err(|_| GridError::AgeOverflow { row, col, value })?;
                cells.push(Cell::with_age(age));
            }
        }

        Ok(Self { rows, cols, cells })
    }

    /// Assemble a grid from cells already laid out row-major
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get the cell at coordinates
    pub fn cell_at(&self, row: usize, col: usize) -> GridResult<Cell> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.index(row, col)])
    }

    /// Whether the cell at coordinates is alive; out of bounds cells are dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.index(row, col)].is_alive()
    }

    /// Set the age of the cell at coordinates
    pub fn set_age(&mut self, row: usize, col: usize, age: u32) -> GridResult<()> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx].set_age(age);
        Ok(())
    }

    fn check_bounds(&self, row: usize, col: usize) -> GridResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over the grid one row at a time
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// The eight wrapped neighbor coordinates of a cell.
    ///
    /// On boards narrower than three cells some offsets wrap onto the same
    /// position (or onto the cell itself); each offset still counts once.
    pub fn neighbor_coords(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let (row, col) = (row as isize, col as isize);
        iproduct!([-1isize, 0, 1], [-1isize, 0, 1])
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .map(move |(dr, dc)| {
                (
                    (row + dr).rem_euclid(rows) as usize,
                    (col + dc).rem_euclid(cols) as usize,
                )
            })
    }

    /// Count living neighbors of a cell
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        self.neighbor_coords(row, col)
            .filter(|&(r, c)| self.cells[self.index(r, c)].is_alive())
            .count() as u8
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    /// Count total living cells
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Count total dead cells
    pub fn dead_count(&self) -> usize {
        self.rows * self.cols - self.alive_count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Age of the longest-lived cell, 0 if every cell is dead
    pub fn oldest_age(&self) -> u32 {
        self.cells.iter().map(Cell::age).max().unwrap_or(0)
    }

    pub fn ages(&self) -> Vec<Vec<u32>> {
        self.iter_rows()
            .map(|row| row.iter().map(Cell::age).collect())
            .collect()
    }

    pub fn states(&self) -> Vec<Vec<u8>> {
        self.iter_rows()
            .map(|row| row.iter().map(Cell::state).collect())
            .collect()
    }
}

/// Largest cell count a single allocation can hold
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Cell>();

fn check_dimensions(rows: usize, cols: usize) -> GridResult<()> {
    if rows == 0 {
        return Err(GridError::EmptyGrid);
    }
    if cols == 0 {
        return Err(GridError::ZeroWidth);
    }
    match rows.checked_mul(cols) {
        Some(total) if total <= MAX_CELLS => Ok(()),
        _ => Err(GridError::TooLarge { rows, cols }),
    }
}

/// Create an all-dead grid
pub fn new_grid(rows: usize, cols: usize) -> GridResult<Grid> {
    Grid::new(rows, cols)
}

/// Seed a grid from an externally parsed age matrix
pub fn load_grid(rows: usize, cols: usize, initial_ages: &[Vec<i64>]) -> GridResult<Grid> {
    Grid::load(rows, cols, initial_ages)
}

pub fn cell_at(grid: &Grid, row: usize, col: usize) -> GridResult<Cell> {
    grid.cell_at(row, col)
}

pub fn alive_count(grid: &Grid) -> usize {
    grid.alive_count()
}

pub fn dead_count(grid: &Grid) -> usize {
    grid.dead_count()
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_alive(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in alive {
            grid.set_age(row, col, 1).unwrap();
        }
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = new_grid(3, 4).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.cells().len(), 12);
        assert!(grid.is_empty());
        assert_eq!(dead_count(&grid), 12);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(Grid::new(0, 3), Err(GridError::EmptyGrid));
        assert_eq!(Grid::new(3, 0), Err(GridError::ZeroWidth));
        assert_eq!(Grid::from_ages(vec![]), Err(GridError::EmptyGrid));
        assert_eq!(Grid::from_ages(vec![vec![]]), Err(GridError::ZeroWidth));
    }

    #[test]
    fn test_grid_from_ages() {
        let grid = Grid::from_ages(vec![
            vec![1, 0, 3],
            vec![0, 2, 0],
        ])
        .unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(alive_count(&grid), 3);
        assert_eq!(grid.cell_at(0, 2).unwrap().age(), 3);
        assert_eq!(grid.oldest_age(), 3);
        assert_eq!(grid.states(), vec![vec![1, 0, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Grid::from_ages(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(err, GridError::RaggedRow { row: 1, len: 1, expected: 2 });
    }

    #[test]
    fn test_load_grid_validates_matrix() {
        let grid = load_grid(2, 2, &[vec![0, 5], vec![1, 0]]).unwrap();
        assert_eq!(grid.ages(), vec![vec![0, 5], vec![1, 0]]);

        assert_eq!(
            load_grid(3, 2, &[vec![0, 0], vec![0, 0]]),
            Err(GridError::DimensionMismatch { expected: 3, actual: 2 })
        );
        assert_eq!(
            load_grid(2, 2, &[vec![0, 0], vec![0, 0, 1]]),
            Err(GridError::RaggedRow { row: 1, len: 3, expected: 2 })
        );
        assert_eq!(
            load_grid(1, 2, &[vec![0, -4]]),
            Err(GridError::NegativeAge { row: 0, col: 1, value: -4 })
        );
        assert!(matches!(
            load_grid(1, 1, &[vec![i64::MAX]]),
            Err(GridError::AgeOverflow { .. })
        ));
        assert_eq!(load_grid(0, 2, &[]), Err(GridError::EmptyGrid));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert_eq!(
            new_grid(usize::MAX, 2),
            Err(GridError::TooLarge { rows: usize::MAX, cols: 2 })
        );
        assert_eq!(
            Grid::new(usize::MAX / 2, usize::MAX / 2),
            Err(GridError::TooLarge { rows: usize::MAX / 2, cols: usize::MAX / 2 })
        );
        assert_eq!(
            load_grid(2, usize::MAX, &[vec![], vec![]]),
            Err(GridError::TooLarge { rows: 2, cols: usize::MAX })
        );
    }

    #[test]
    fn test_load_checks_rows_before_allocating() {
        // Declared width is large but addressable; the short rows are rejected
        assert_eq!(
            load_grid(2, 1 << 40, &[vec![0], vec![0]]),
            Err(GridError::RaggedRow { row: 0, len: 1, expected: 1 << 40 })
        );
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            cell_at(&grid, 2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 2 })
        );
        assert!(!grid.get(5, 5));
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = Grid::from_ages(vec![
            vec![1, 1, 1, 0],
            vec![1, 0, 1, 0],
            vec![1, 1, 1, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();

        // Ring around (1, 1) is fully alive
        assert_eq!(grid.count_neighbors(1, 1), 8);
        // Corner reaches across both edges to the empty row and column
        assert_eq!(grid.count_neighbors(0, 0), 2);
    }

    #[test]
    fn test_wrap_in_every_direction() {
        let grid = grid_with_alive(3, 3, &[(0, 0)]);

        // Corner wrap
        assert_eq!(grid.count_neighbors(2, 2), 1);
        // Row wrap upward and downward
        assert_eq!(grid.count_neighbors(2, 0), 1);
        assert_eq!(grid.count_neighbors(1, 0), 1);
        // Column wrap left and right
        assert_eq!(grid.count_neighbors(0, 2), 1);
        assert_eq!(grid.count_neighbors(0, 1), 1);
        assert_eq!(grid.count_neighbors(0, 0), 0);
    }

    #[test]
    fn test_wrap_on_larger_board() {
        let grid = grid_with_alive(5, 6, &[(0, 0)]);
        assert_eq!(grid.count_neighbors(4, 5), 1);
        assert_eq!(grid.count_neighbors(4, 0), 1);
        assert_eq!(grid.count_neighbors(0, 5), 1);
        assert_eq!(grid.count_neighbors(2, 3), 0);
    }

    #[test]
    fn test_single_row_offsets_overlap() {
        // Vertical offsets wrap back onto the same row
        let grid = Grid::from_ages(vec![vec![0, 1, 0, 0, 0]]).unwrap();
        assert_eq!(grid.count_neighbors(0, 0), 3);
        assert_eq!(grid.count_neighbors(0, 1), 2);
        assert_eq!(grid.neighbor_coords(0, 2).count(), 8);
    }

    #[test]
    fn test_living_cells_and_counts() {
        let grid = grid_with_alive(4, 4, &[(0, 1), (3, 3)]);
        assert_eq!(grid.living_cells(), vec![(0, 1), (3, 3)]);
        assert_eq!(grid.alive_count() + grid.dead_count(), 16);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_ages(vec![vec![1, 0], vec![0, 2]]).unwrap();
        assert_eq!(grid.to_string(), "⬛⬜\n⬜⬛\n");
    }
}

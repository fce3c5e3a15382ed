//! Seed loading and generation writing
//!
//! Seed format: a `rows, cols` header line followed by `rows` lines of
//! `cols` comma-separated non-negative ages (0 is dead).

use super::error::GridError;
use super::Grid;
use crate::config::OutputFormat;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name used when the output prefix names a directory
pub const DEFAULT_FILE_STEM: &str = "Generation";

#[derive(Debug, Error)]
pub enum GridIoError {
    #[error("Cannot read seed file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write into the output file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed file is empty")]
    EmptySeed,

    #[error("Cannot convert row or column from header '{header}'")]
    InvalidHeader { header: String },

    #[error("Row or column cannot be negative (got {rows}, {cols})")]
    NegativeDimension { rows: i64, cols: i64 },

    #[error("Cell states are missing from row {row}")]
    MissingRow { row: usize },

    #[error("Row {row} has {len} cells, expected {expected}")]
    RowLength { row: usize, len: usize, expected: usize },

    #[error("Cell ({row}, {col}) is not a number: '{value}'")]
    InvalidCell { row: usize, col: usize, value: String },

    #[error("Seed has data after the declared {rows} rows")]
    TrailingData { rows: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GridIoError {
    /// Process exit code reported for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            GridIoError::Read { .. } | GridIoError::Write { .. } => 3,
            GridIoError::InvalidCell { .. } => 4,
            GridIoError::RowLength { .. } | GridIoError::TrailingData { .. } => 5,
            GridIoError::InvalidHeader { .. } | GridIoError::NegativeDimension { .. } => 6,
            GridIoError::MissingRow { .. } => 7,
            GridIoError::EmptySeed => 8,
            GridIoError::Grid(err) => match err {
                GridError::NegativeAge { .. } | GridError::AgeOverflow { .. } => 4,
                GridError::EmptyGrid | GridError::ZeroWidth | GridError::TooLarge { .. } => 6,
                _ => 5,
            },
        }
    }
}

pub type IoResult<T> = std::result::Result<T, GridIoError>;

/// Load a grid from a seed file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> IoResult<Grid> {
    let content = std::fs::read_to_string(&path).map_err(|source| GridIoError::Read {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    parse_grid_from_string(&content)
}

/// Parse a grid from seed text
pub fn parse_grid_from_string(content: &str) -> IoResult<Grid> {
    let mut lines = content.lines();

    let header = match lines.next() {
        Some(line) if !line.trim().is_empty() => line.trim(),
        _ => return Err(GridIoError::EmptySeed),
    };
    let (rows, cols) = parse_header(header)?;

    // Grows with the rows actually present, not the declared count
    let mut ages = Vec::new();
    for row in 0..rows {
        let line = lines.next().ok_or(GridIoError::MissingRow { row })?;
        if line.trim().is_empty() {
            return Err(GridIoError::MissingRow { row });
        }

        let entries: Vec<&str> = line.split(',').map(str::trim).collect();
        if entries.len() != cols {
            return Err(GridIoError::RowLength {
                row,
                len: entries.len(),
                expected: cols,
            });
        }

        let parsed = entries
            .iter()
            .enumerate()
            .map(|(col, value)| {
                value.parse::<i64>().map_err(|_| GridIoError::InvalidCell {
                    row,
                    col,
                    value: value.to_string(),
                })
            })
            .collect::<IoResult<Vec<i64>>>()?;
        ages.push(parsed);
    }

    if lines.any(|line| !line.trim().is_empty()) {
        return Err(GridIoError::TrailingData { rows });
    }

    Ok(Grid::load(rows, cols, &ages)?)
}

fn parse_header(header: &str) -> IoResult<(usize, usize)> {
    let invalid = || GridIoError::InvalidHeader {
        header: header.to_string(),
    };

    let (rows, cols) = header.split_once(',').ok_or_else(invalid)?;
    let rows: i64 = rows.trim().parse().map_err(|_| invalid())?;
    let cols: i64 = cols.trim().parse().map_err(|_| invalid())?;

    if rows < 0 || cols < 0 {
        return Err(GridIoError::NegativeDimension { rows, cols });
    }
    Ok((rows as usize, cols as usize))
}

/// Convert a grid to its per-generation text form
pub fn grid_to_string(grid: &Grid, format: &OutputFormat) -> String {
    let mut result = String::with_capacity(grid.rows() * grid.cols() * 3);

    for row in grid.iter_rows() {
        let line = match format {
            OutputFormat::Binary => row.iter().map(|cell| cell.state()).join(", "),
            OutputFormat::Ages => row.iter().map(|cell| cell.age()).join(", "),
        };
        result.push_str(&line);
        result.push('\n');
    }

    result
}

/// Convert a grid to seed text, header included, so it can be loaded again
pub fn seed_to_string(grid: &Grid) -> String {
    format!(
        "{}, {}\n{}",
        grid.rows(),
        grid.cols(),
        grid_to_string(grid, &OutputFormat::Ages)
    )
}

/// Resolve the user supplied output prefix; a directory gets a file stem
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        format!("{}{}", prefix, DEFAULT_FILE_STEM)
    } else {
        prefix.to_string()
    }
}

/// Path of the file holding generation `generation`
pub fn generation_path(prefix: &str, generation: u64) -> PathBuf {
    PathBuf::from(format!("{}{}.txt", normalize_prefix(prefix), generation))
}

/// Write one generation next to the others sharing `prefix`
pub fn write_generation(
    grid: &Grid,
    prefix: &str,
    generation: u64,
    format: &OutputFormat,
) -> IoResult<PathBuf> {
    let path = generation_path(prefix, generation);
    write_grid_to(grid, &path, format)?;
    Ok(path)
}

/// Write a grid to an exact path
pub fn write_grid_to<P: AsRef<Path>>(grid: &Grid, path: P, format: &OutputFormat) -> IoResult<()> {
    write_text(path.as_ref(), &grid_to_string(grid, format))
}

/// Save a grid as a seed file
pub fn save_seed_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> IoResult<()> {
    write_text(path.as_ref(), &seed_to_string(grid))
}

fn write_text(path: &Path, content: &str) -> IoResult<()> {
    let to_error = |source: std::io::Error| GridIoError::Write {
        path: path.to_path_buf(),
        source,
    };

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)
}

/// Create example seed files
pub fn create_example_seeds<P: AsRef<Path>>(output_dir: P) -> IoResult<()> {
    let dir = output_dir.as_ref();

    let patterns: [(&str, Vec<Vec<u32>>); 4] = [
        (
            "glider",
            vec![
                vec![0, 0, 1, 0, 0, 0, 0, 0],
                vec![1, 0, 1, 0, 0, 0, 0, 0],
                vec![0, 1, 1, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
            ],
        ),
        (
            "blinker",
            vec![
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
                vec![0, 1, 1, 1, 0],
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
            ],
        ),
        (
            "block",
            vec![
                vec![0, 0, 0, 0],
                vec![0, 1, 1, 0],
                vec![0, 1, 1, 0],
                vec![0, 0, 0, 0],
            ],
        ),
        (
            "beacon",
            vec![
                vec![0, 0, 0, 0, 0, 0],
                vec![0, 1, 1, 0, 0, 0],
                vec![0, 1, 1, 0, 0, 0],
                vec![0, 0, 0, 1, 1, 0],
                vec![0, 0, 0, 1, 1, 0],
                vec![0, 0, 0, 0, 0, 0],
            ],
        ),
    ];

    for (name, ages) in patterns {
        let grid = Grid::from_ages(ages)?;
        save_seed_to_file(&grid, dir.join(format!("{}.txt", name)))?;
    }

    Ok(())
}

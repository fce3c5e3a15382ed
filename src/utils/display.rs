//! Display and output formatting utilities

use crate::game_of_life::Grid;
use crate::simulation::GenerationStats;

/// Format grids for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() + 1) * 3);
        for row in grid.iter_rows() {
            for cell in row {
                output.push(if cell.is_alive() { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.cols() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.iter_rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format cell ages, dead cells shown as dots
    pub fn format_ages(grid: &Grid) -> String {
        let width = grid.oldest_age().max(1).to_string().len();
        let mut output = String::new();

        for row in grid.iter_rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell.age() {
                    0 => format!("{:>width$}", "·", width = width),
                    age => format!("{:>width$}", age, width = width),
                })
                .collect();
            output.push_str(&line.join(" "));
            output.push('\n');
        }

        output
    }

    /// Format one generation with its statistics header
    pub fn format_generation(grid: &Grid, stats: &GenerationStats, show_ages: bool) -> String {
        let mut output = format!("{}\n", stats);
        if show_ages {
            output.push_str(&Self::format_ages(grid));
        } else {
            output.push_str(&Self::format_grid_compact(grid));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_formatting() {
        let grid = Grid::from_ages(vec![
            vec![1, 0, 1],
            vec![0, 1, 0],
        ])
        .unwrap();

        assert_eq!(GridFormatter::format_grid_compact(&grid), "█·█\n·█·\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_age_formatting() {
        let grid = Grid::from_ages(vec![vec![12, 0], vec![3, 1]]).unwrap();
        assert_eq!(GridFormatter::format_ages(&grid), "12  ·\n 3  1\n");
    }

    #[test]
    fn test_generation_formatting() {
        let grid = Grid::from_ages(vec![vec![1, 0]]).unwrap();
        let stats = GenerationStats::for_seed(&grid, 0);
        let output = GridFormatter::format_generation(&grid, &stats, false);
        assert!(output.starts_with("Generation 0: alive 1, dead 1"));
        assert!(output.ends_with("█·\n"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}

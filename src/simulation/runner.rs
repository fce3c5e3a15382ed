//! Stepping a seed forward and handing each generation to the writer

use super::report::{GenerationStats, RunReport};
use crate::config::Settings;
use crate::game_of_life::io::{generation_path, load_grid_from_file, write_generation};
use crate::game_of_life::{step, Grid};
use crate::utils::{ColorOutput, GridFormatter};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// A grid together with the generation it belongs to
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    report: RunReport,
}

impl Simulation {
    /// Start a simulation at generation 0
    pub fn new(seed: Grid) -> Self {
        Self::at_generation(seed, 0)
    }

    /// Resume a simulation from a grid at a known generation
    pub fn at_generation(grid: Grid, generation: u64) -> Self {
        let report = RunReport::new(&grid, generation);
        Self {
            grid,
            generation,
            report,
        }
    }

    /// Keep per-generation statistics in the report, not just totals
    pub fn with_history(mut self) -> Self {
        self.report = self.report.with_history();
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn into_report(self) -> RunReport {
        self.report
    }

    /// Advance one generation, returning the grid it replaced
    pub fn advance(&mut self) -> Grid {
        let (next, generation) = step(&self.grid, self.generation);
        let previous = std::mem::replace(&mut self.grid, next);
        self.generation = generation;

        self.report
            .record(GenerationStats::between(&previous, &self.grid, generation));
        previous
    }

    /// Advance `steps` generations, passing each new grid to `on_generation`
    pub fn run<F>(&mut self, steps: u64, mut on_generation: F) -> Result<()>
    where
        F: FnMut(&Grid, &GenerationStats) -> Result<()>,
    {
        for _ in 0..steps {
            self.advance();
            on_generation(&self.grid, self.report.latest())?;
        }
        Ok(())
    }
}

/// Path of the JSON report written beside the generation files
pub fn report_path(prefix: &str) -> PathBuf {
    generation_path(prefix, 0).with_file_name("run_report.json")
}

/// Load the configured seed, run every step, and write each generation
pub fn run_simulation(settings: &Settings, verbose: bool) -> Result<RunReport> {
    settings.validate().context("Configuration validation failed")?;
    let seed = load_grid_from_file(&settings.input.seed_file)?;

    if verbose {
        println!("Seed Grid ({}x{}):", seed.rows(), seed.cols());
        println!("{}", GridFormatter::format_grid_compact(&seed));
    }

    let output = &settings.output;
    let mut simulation = Simulation::new(seed);
    if output.save_report {
        simulation = simulation.with_history();
    }

    simulation.run(settings.simulation.steps, |grid, stats| {
        let path = write_generation(grid, &output.prefix, stats.generation, &output.format)?;
        if verbose {
            println!("{} -> {}", stats, path.display());
        }
        Ok(())
    })?;

    let report = simulation.into_report();

    if output.save_report {
        let path = report_path(&output.prefix);
        report
            .save_to_file(&path)
            .with_context(|| format!("Failed to save run report to {}", path.display()))?;
        println!("{}", ColorOutput::info(&format!("Report saved to {}", path.display())));
    }

    Ok(report)
}

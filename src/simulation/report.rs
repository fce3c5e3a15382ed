//! Per-generation statistics and the run report

use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Aggregate counts for one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u64,
    pub alive: usize,
    pub dead: usize,
    /// Cells that were dead in the previous generation and are alive now
    pub births: usize,
    /// Cells that were alive in the previous generation and are dead now
    pub deaths: usize,
    pub oldest_age: u32,
}

impl GenerationStats {
    /// Statistics for a seed, which has no previous generation
    pub fn for_seed(grid: &Grid, generation: u64) -> Self {
        Self {
            generation,
            alive: grid.alive_count(),
            dead: grid.dead_count(),
            births: 0,
            deaths: 0,
            oldest_age: grid.oldest_age(),
        }
    }

    /// Statistics for `current`, compared against the generation before it
    pub fn between(previous: &Grid, current: &Grid, generation: u64) -> Self {
        let (births, deaths) = previous
            .cells()
            .iter()
            .zip(current.cells())
            .fold((0, 0), |(births, deaths), (before, after)| {
                match (before.is_alive(), after.is_alive()) {
                    (false, true) => (births + 1, deaths),
                    (true, false) => (births, deaths + 1),
                    _ => (births, deaths),
                }
            });

        Self {
            births,
            deaths,
            ..Self::for_seed(current, generation)
        }
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation {}: alive {}, dead {}, births {}, deaths {}, oldest {}",
            self.generation, self.alive, self.dead, self.births, self.deaths, self.oldest_age
        )
    }
}

/// Summary of a complete run.
///
/// Running totals are always kept; per-generation history only when enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub rows: usize,
    pub cols: usize,
    pub seed: GenerationStats,
    pub latest: GenerationStats,
    pub generations_computed: u64,
    pub peak_population: usize,
    pub extinct_at: Option<u64>,
    #[serde(default)]
    pub generations: Vec<GenerationStats>,
    #[serde(skip)]
    keep_history: bool,
}

impl RunReport {
    /// Report that tracks totals only
    pub fn new(seed: &Grid, generation: u64) -> Self {
        let stats = GenerationStats::for_seed(seed, generation);
        Self {
            rows: seed.rows(),
            cols: seed.cols(),
            peak_population: stats.alive,
            extinct_at: (stats.alive == 0).then_some(generation),
            latest: stats.clone(),
            seed: stats,
            generations_computed: 0,
            generations: Vec::new(),
            keep_history: false,
        }
    }

    /// Also keep the statistics of every generation
    pub fn with_history(mut self) -> Self {
        self.keep_history = true;
        self
    }

    pub fn record(&mut self, stats: GenerationStats) {
        self.generations_computed += 1;
        self.peak_population = self.peak_population.max(stats.alive);
        if self.extinct_at.is_none() && stats.alive == 0 {
            self.extinct_at = Some(stats.generation);
        }
        if self.keep_history {
            self.generations.push(stats.clone());
        }
        self.latest = stats;
    }

    /// Statistics of the most recent generation, the seed if none were computed
    pub fn latest(&self) -> &GenerationStats {
        &self.latest
    }

    /// Largest population seen, seed included
    pub fn peak_population(&self) -> usize {
        self.peak_population
    }

    /// First generation at which every cell is dead
    pub fn extinct_at(&self) -> Option<u64> {
        self.extinct_at
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Summary ({}x{}):", self.rows, self.cols)?;
        writeln!(f, "  Generations computed: {}", self.generations_computed)?;
        writeln!(f, "  Seed population: {}", self.seed.alive)?;
        writeln!(f, "  Final population: {}", self.latest().alive)?;
        writeln!(f, "  Peak population: {}", self.peak_population())?;
        writeln!(f, "  Oldest cell age: {}", self.latest().oldest_age)?;
        if let Some(generation) = self.extinct_at() {
            writeln!(f, "  Extinct at generation {}", generation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_births_and_deaths() {
        let previous = Grid::from_ages(vec![vec![1, 1, 0], vec![0, 0, 0]]).unwrap();
        let current = Grid::from_ages(vec![vec![2, 0, 1], vec![1, 0, 0]]).unwrap();

        let stats = GenerationStats::between(&previous, &current, 4);
        assert_eq!(
            stats,
            GenerationStats {
                generation: 4,
                alive: 3,
                dead: 3,
                births: 2,
                deaths: 1,
                oldest_age: 2,
            }
        );
    }

    #[test]
    fn test_report_summary() {
        let seed = Grid::from_ages(vec![vec![1, 1], vec![0, 0]]).unwrap();
        let empty = Grid::new(2, 2).unwrap();

        let mut report = RunReport::new(&seed, 0);
        assert_eq!(report.latest(), &report.seed);
        assert_eq!(report.extinct_at(), None);

        report.record(GenerationStats::between(&seed, &empty, 1));
        report.record(GenerationStats::between(&empty, &empty, 2));
        assert_eq!(report.generations_computed, 2);
        assert_eq!(report.latest().generation, 2);
        assert_eq!(report.latest().alive, 0);
        assert_eq!(report.peak_population(), 2);
        assert_eq!(report.extinct_at(), Some(1));
        assert!(report.to_string().contains("Extinct at generation 1"));
    }

    #[test]
    fn test_history_only_when_enabled() {
        let seed = Grid::from_ages(vec![vec![1, 0]]).unwrap();
        let next = Grid::new(1, 2).unwrap();

        let mut totals = RunReport::new(&seed, 0);
        let mut history = RunReport::new(&seed, 0).with_history();
        for generation in 1..=50 {
            let stats = GenerationStats::between(&seed, &next, generation);
            totals.record(stats.clone());
            history.record(stats);
        }

        assert!(totals.generations.is_empty());
        assert_eq!(totals.generations_computed, 50);
        assert_eq!(totals.extinct_at(), Some(1));
        assert_eq!(history.generations.len(), 50);
        assert_eq!(history.generations_computed, 50);
    }

    #[test]
    fn test_extinct_seed() {
        let seed = Grid::new(2, 2).unwrap();
        let report = RunReport::new(&seed, 3);
        assert_eq!(report.extinct_at(), Some(3));
        assert_eq!(report.peak_population(), 0);
    }

    #[test]
    fn test_save_report() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out/run_report.json");
        let seed = Grid::from_ages(vec![vec![0, 3]]).unwrap();

        RunReport::new(&seed, 0).save_to_file(&path).unwrap();

        let loaded: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.cols, 2);
        assert_eq!(loaded.seed.oldest_age, 3);
        assert!(loaded.generations.is_empty());
    }
}

//! Configuration settings for the simulation runner

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of generations to compute after the seed
    pub steps: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub seed_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Generation files are written to `<prefix><generation>.txt`
    pub prefix: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub save_report: bool,
}

/// Per-cell value written for each generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// 1 for alive, 0 for dead
    #[default]
    Binary,
    /// Raw cell age
    Ages,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig { steps: 10 },
            input: InputConfig {
                seed_file: PathBuf::from("input/seeds/glider.txt"),
            },
            output: OutputConfig {
                prefix: "output/".to_string(),
                format: OutputFormat::Binary,
                save_report: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load settings from a YAML file, or use defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings; the seed file itself is checked when it is loaded
    pub fn validate(&self) -> Result<()> {
        if self.input.seed_file.as_os_str().is_empty() {
            anyhow::bail!("Seed file must be specified");
        }

        if self.output.prefix.is_empty() {
            anyhow::bail!("Output prefix cannot be empty");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(steps) = cli_overrides.steps {
            self.simulation.steps = steps;
        }
        if let Some(ref seed_file) = cli_overrides.seed_file {
            self.input.seed_file = seed_file.clone();
        }
        if let Some(ref prefix) = cli_overrides.prefix {
            self.output.prefix = prefix.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.save_report {
            self.output.save_report = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub steps: Option<u64>,
    pub seed_file: Option<PathBuf>,
    pub prefix: Option<String>,
    pub format: Option<OutputFormat>,
    pub save_report: bool,
}

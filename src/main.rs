//! Main CLI application for the toroidal Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use toroidal_life::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_seeds, load_grid_from_file, GridIoError},
    simulation::{run_simulation, Simulation},
    utils::{ColorOutput, GridFormatter},
};

#[derive(Parser)]
#[command(name = "toroidal_life")]
#[command(about = "Conway's Game of Life on a wrap-around grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a seed forward and write every generation to a file
    Run {
        /// Seed file
        input: Option<PathBuf>,

        /// Output file prefix; a trailing '/' writes <dir>/Generation<N>.txt
        output: Option<String>,

        /// Number of generations to compute
        steps: Option<String>,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Per-cell value to write (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Save a JSON run report beside the generation files
        #[arg(long)]
        report: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and seed files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print a seed and the generations that follow it
    Show {
        /// Seed file
        seed: PathBuf,

        /// Number of generations to print after the seed
        #[arg(short, long, default_value_t = 0)]
        steps: u64,

        /// Print cell ages instead of alive/dead
        #[arg(long)]
        ages: bool,
    },
}

/// Argument failures, each with its own exit code
#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid step number '{value}'")]
    InvalidSteps { value: String },

    #[error("Missing inputs: expected seed file, output file and number of steps")]
    MissingArguments,
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidSteps { .. } => 1,
            CliError::MissingArguments => 2,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input, output, steps, config, format, report, verbose
        } => {
            run_command(input, output, steps, config, format, report, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show { seed, steps, ages } => show_command(seed, steps, ages),
    };

    if let Err(err) = result {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", err)));
        std::process::exit(exit_code(&err));
    }
}

/// Exit code for a failed command
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli_error) = err.downcast_ref::<CliError>() {
        cli_error.exit_code()
    } else if let Some(io_error) = err.downcast_ref::<GridIoError>() {
        io_error.exit_code()
    } else {
        1
    }
}

fn parse_steps(value: &str) -> Result<u64, CliError> {
    value.trim().parse().map_err(|_| CliError::InvalidSteps {
        value: value.to_string(),
    })
}

/// Ask for the seed file, output prefix and number of steps
fn prompt_run_arguments<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
) -> Result<(PathBuf, String, u64)> {
    let mut ask = |question: &str| -> Result<String> {
        writeln!(out, "{}", question)?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(CliError::MissingArguments.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    };

    let seed = PathBuf::from(ask("Input file name:")?);
    let prefix = ask("Output file name:")?;
    let steps = parse_steps(&ask("Number of steps:")?)?;
    Ok((seed, prefix, steps))
}

fn load_settings(config_path: &Path) -> Result<(Settings, bool)> {
    Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))
}

fn run_command(
    input: Option<PathBuf>,
    output: Option<String>,
    steps: Option<String>,
    config_path: PathBuf,
    format: Option<OutputFormat>,
    save_report: bool,
    verbose: bool,
) -> Result<()> {
    let (mut settings, config_found) = load_settings(&config_path)?;
    if !config_found {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
    }

    let (seed_file, prefix, steps) = match (input, output, steps) {
        (None, None, None) if !config_found => {
            let stdin = std::io::stdin();
            let (seed, prefix, steps) = prompt_run_arguments(stdin.lock(), std::io::stdout())?;
            (Some(seed), Some(prefix), Some(steps))
        }
        (input, output, steps) => {
            if !config_found && (input.is_none() || output.is_none() || steps.is_none()) {
                return Err(CliError::MissingArguments.into());
            }
            let steps = steps.as_deref().map(parse_steps).transpose()?;
            (input, output, steps)
        }
    };

    settings.merge_with_cli(&CliOverrides {
        steps,
        seed_file,
        prefix,
        format,
        save_report,
    });

    if verbose {
        println!("Configuration:");
        println!("  Steps: {}", settings.simulation.steps);
        println!("  Seed file: {}", settings.input.seed_file.display());
        println!("  Output prefix: {}", settings.output.prefix);
        println!("  Format: {:?}", settings.output.format);
        println!();
    }

    println!("{}", ColorOutput::info(&format!(
        "Running {} generation(s) from {}",
        settings.simulation.steps,
        settings.input.seed_file.display()
    )));

    let report = run_simulation(&settings, verbose)?;

    println!("{}", ColorOutput::success(&format!(
        "Wrote {} generation(s)", report.generations_computed
    )));
    if verbose {
        println!("\n{}", report);
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let seed_dir = directory.join("input/seeds");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &seed_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_seeds(&seed_dir).context("Failed to create example seeds")?;
    println!("Created example seeds in: {}", seed_dir.display());

    // Aged output variant
    let examples_dir = config_dir.join("examples");
    let mut ages_config = Settings::default();
    ages_config.simulation.steps = 4;
    ages_config.input.seed_file = PathBuf::from("input/seeds/block.txt");
    ages_config.output.prefix = "output/block/".to_string();
    ages_config.output.format = OutputFormat::Ages;
    ages_config.output.save_report = true;
    ages_config.to_file(&examples_dir.join("block_ages.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));

    Ok(())
}

fn show_command(seed_path: PathBuf, steps: u64, show_ages: bool) -> Result<()> {
    let seed = load_grid_from_file(&seed_path)?;
    println!("Seed Grid ({}x{}):", seed.rows(), seed.cols());
    println!("{}", GridFormatter::format_grid_with_coords(&seed));

    let mut simulation = Simulation::new(seed);
    println!(
        "{}",
        GridFormatter::format_generation(simulation.grid(), simulation.report().latest(), show_ages)
    );

    simulation.run(steps, |grid, stats| {
        println!("{}", GridFormatter::format_generation(grid, stats, show_ages));
        Ok(())
    })?;

    Ok(())
}

//! Simulation driving: stepping a seed forward and collecting statistics

pub mod report;
pub mod runner;

pub use report::{GenerationStats, RunReport};
pub use runner::{run_simulation, Simulation};

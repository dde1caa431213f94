//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON line per game plus a CSV summary.
    Jsonl,
    /// CSV summary only.
    Csv,
}

//! Command-line interface for munkres-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **solve**: Solve the assignment problem for a cost matrix file
//! - **sample**: Print the built-in 5x5 sample cost matrix
//!
//! ## Usage
//!
//! ```text
//! # Solve a TSV cost matrix
//! munkres-solver solve costs.tsv
//!
//! # Solve the built-in sample
//! munkres-solver solve --sample
//!
//! # Pipe a matrix through stdin, JSON output for scripting
//! munkres-solver sample --format tsv | munkres-solver solve - --format json
//! ```

use clap::{Parser, Subcommand};

pub mod sample;
pub mod solve;

#[derive(Parser)]
#[command(name = "munkres-solver")]
#[command(version)]
#[command(about = "Find minimum-cost row-to-column assignments with the Hungarian algorithm")]
#[command(
    long_about = "munkres-solver reads a matrix of non-negative costs and assigns every row to a distinct column so that the total cost is as small as possible.\n\nMatrices may have more columns than rows; every row is still assigned and the extra columns stay unused."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve the assignment problem for a cost matrix
    Solve(solve::SolveArgs),

    /// Print the built-in sample cost matrix
    Sample,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::matrix::CostMatrix;
use crate::core::sample::sample_cost;
use crate::parsing::{self, MatrixFormat};
use crate::solver::{solve_with_config, Solution, SolverConfig, DEFAULT_ZERO_TOLERANCE};

#[derive(Args)]
pub struct SolveArgs {
    /// Cost matrix file (TSV, CSV, whitespace separated text, or JSON; may be gzipped)
    /// Use '-' for stdin
    #[arg(required_unless_present = "sample", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Solve the built-in 5x5 sample matrix instead of reading input
    #[arg(long)]
    pub sample: bool,

    /// Input format (auto-detected by default)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Reduced costs at or below this magnitude count as zero (at most 1e-6)
    #[arg(long, default_value_t = DEFAULT_ZERO_TOLERANCE)]
    pub tolerance: f64,

    /// Give up after this many reduce/cover rounds (default scales with matrix size)
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Tsv,
    Csv,
    Whitespace,
    Json,
}

impl From<InputFormat> for MatrixFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Tsv => Self::Tsv,
            InputFormat::Csv => Self::Csv,
            InputFormat::Whitespace => Self::Whitespace,
            InputFormat::Json => Self::Json,
        }
    }
}

/// Execute solve subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or the matrix is rejected
/// by the solver.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let cost = load_cost(&args)?;

    if verbose {
        eprintln!("Loaded {}x{} cost matrix", cost.rows(), cost.cols());
    }

    let config = SolverConfig {
        tolerance: args.tolerance,
        max_iterations: args.max_iterations,
    };

    let solution = match solve_with_config(&cost, config) {
        Ok(solution) => solution,
        Err(err) => {
            warn!(rows = cost.rows(), cols = cost.cols(), "Rejected cost matrix: {err}");
            return Err(err).context("Failed to solve assignment");
        }
    };

    if verbose {
        eprintln!("Solved in {} iteration(s)", solution.iterations);
    }

    match format {
        OutputFormat::Text => print_text_solution(&cost, &solution),
        OutputFormat::Json => print_json_solution(&solution)?,
        OutputFormat::Tsv => print_tsv_solution(&solution),
    }

    Ok(())
}

fn load_cost(args: &SolveArgs) -> anyhow::Result<CostMatrix> {
    if args.sample {
        return Ok(sample_cost());
    }

    let format = args.input_format.map(MatrixFormat::from);
    let path = args
        .input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("an input file or --sample is required"))?;

    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read cost matrix from stdin")?;
        Ok(parsing::parse_matrix_text(&text, format)?)
    } else {
        parsing::parse_matrix_file(path, format)
            .with_context(|| format!("Failed to read cost matrix from {}", path.display()))
    }
}

fn print_text_solution(cost: &CostMatrix, solution: &Solution) {
    println!("Assignment Results");
    println!("{}", "=".repeat(60));
    println!("\nMatrix: {} rows x {} columns", cost.rows(), cost.cols());
    println!("Iterations: {}", solution.iterations);

    println!("\n{:>6}  {:>6}  {:>12}", "Row", "Column", "Cost");
    for pair in &solution.pairs {
        println!("{:>6}  {:>6}  {:>12}", pair.row, pair.column, pair.cost);
    }

    println!("\nTotal cost: {}", solution.total_cost);
}

fn print_json_solution(solution: &Solution) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(solution)?);
    Ok(())
}

fn print_tsv_solution(solution: &Solution) {
    println!("row\tcolumn\tcost");
    for pair in &solution.pairs {
        println!("{}\t{}\t{}", pair.row, pair.column, pair.cost);
    }
}

//! # munkres-solver
//!
//! A library for solving the minimum-cost assignment problem with the
//! Hungarian (Kuhn-Munkres) algorithm.
//!
//! Given a matrix of non-negative costs where rows are agents and columns are
//! tasks, the solver assigns every row to a distinct column so that the sum of
//! the chosen costs is as small as possible. Matrices may have more columns
//! than rows; the extra columns are simply left unused.
//!
//! ## Features
//!
//! - **Exact optimum**: Row/column reduction with minimum zero covers
//! - **Rectangular input**: Wide matrices are padded internally
//! - **Input validation**: Negative, non-finite, and empty matrices are rejected up front
//! - **Matrix files**: TSV, CSV, whitespace text, and JSON, optionally gzipped
//!
//! ## Example
//!
//! ```rust
//! use munkres_solver::{sample_cost, solve};
//!
//! let cost = sample_cost();
//! let assignment = solve(&cost).unwrap();
//!
//! assert_eq!(assignment.columns(), &[1, 2, 4, 3, 0]);
//! assert_eq!(assignment.total_cost(&cost), 32.0);
//! ```
//!
//! Maximization problems can be solved by subtracting every cost from the
//! largest one first.
//!
//! ## Modules
//!
//! - [`core`]: Cost matrix and assignment types
//! - [`solver`]: The assignment solver and its pipeline steps
//! - [`parsing`]: Readers for matrix files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod solver;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::assignment::{AssignedPair, Assignment};
pub use core::matrix::CostMatrix;
pub use core::sample::sample_cost;
pub use solver::{solve, solve_with_config, MatchingSolver, Solution, SolveError, SolverConfig};

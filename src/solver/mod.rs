//! Minimum-cost assignment solver (Hungarian / Kuhn-Munkres algorithm).
//!
//! The solver runs four steps, each a transformation over plain values:
//!
//! 1. **Reduction** ([`reduction`]): subtract row minima, then column minima,
//!    so every row and column holds a zero
//! 2. **Zero resolution** ([`zeros`]): collapse single zeros into forced
//!    assignments and grow them into a maximum assignment on zeros
//! 3. **Covering** ([`cover`]): mark rows and columns to get a minimum line
//!    cover of the zeros; if it has fewer lines than columns, shift the
//!    uncovered costs ([`adjusted`]) and keep growing the cover until it
//!    reaches an unmatched column, which matches one more row
//! 4. **Extraction** ([`extraction`]): depth-first search for one distinct
//!    zero column per row
//!
//! ## Example
//!
//! ```rust
//! use munkres_solver::core::matrix::CostMatrix;
//! use munkres_solver::solver::{solve_with_config, SolverConfig};
//!
//! let cost = CostMatrix::from_rows(vec![
//!     vec![4.0, 1.0, 3.0],
//!     vec![2.0, 0.0, 5.0],
//!     vec![3.0, 2.0, 2.0],
//! ])
//! .unwrap();
//!
//! let solution = solve_with_config(&cost, SolverConfig::default()).unwrap();
//! assert_eq!(solution.assignment.columns(), &[1, 0, 2]);
//! assert_eq!(solution.total_cost, 5.0);
//! ```

pub mod adjusted;
pub mod cover;
pub mod engine;
pub mod extraction;
pub mod reduction;
pub mod zeros;

pub use engine::{
    solve, solve_with_config, MatchingSolver, Solution, SolveError, SolverConfig,
    DEFAULT_ZERO_TOLERANCE,
};

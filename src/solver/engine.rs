use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::core::assignment::{AssignedPair, Assignment};
use crate::core::matrix::CostMatrix;
use crate::solver::adjusted::AdjustedCosts;
use crate::solver::cover::{evaluate_cover, mark_rows_cols, CoverOutcome, ZeroGroups};
use crate::solver::extraction::extract_assignment;
use crate::solver::reduction::reduce;
use crate::solver::zeros::{resolve_single_zeros, Matching};
use crate::utils::validation::{validate_cost_matrix, validate_tolerance, ValidationError};

/// Default tolerance below which a reduced cost counts as zero
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Solver invariant violated: {0}")]
    InfeasiblePipeline(String),
}

/// Configuration for the solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Reduced costs with absolute value at or below this count as zero
    pub tolerance: f64,
    /// Ceiling on resolve/cover rounds; `width + 1` when unset
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_ZERO_TOLERANCE,
            max_iterations: None,
        }
    }
}

impl SolverConfig {
    fn iteration_limit(&self, width: usize) -> usize {
        self.max_iterations.unwrap_or(width + 1)
    }
}

/// A solved assignment together with its cost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub assignment: Assignment,
    pub pairs: Vec<AssignedPair>,
    pub total_cost: f64,
    /// Number of resolve/cover rounds run
    pub iterations: usize,
    /// Number of cost adjustments made across all rounds
    pub adjustments: usize,
}

impl Solution {
    fn new(
        assignment: Assignment,
        cost: &CostMatrix,
        iterations: usize,
        adjustments: usize,
    ) -> Self {
        let pairs = assignment.priced_pairs(cost);
        let total_cost: f64 = pairs.iter().map(|pair| pair.cost).sum();
        Self {
            assignment,
            pairs,
            total_cost,
            iterations,
            adjustments,
        }
    }
}

/// Minimum-cost assignment solver over a single cost matrix.
///
/// The solver owns a private copy of the costs and is consumed by
/// [`MatchingSolver::solve`].
#[derive(Debug, Clone)]
pub struct MatchingSolver {
    cost: CostMatrix,
    config: SolverConfig,
}

impl MatchingSolver {
    /// Create a solver with default configuration
    ///
    /// # Errors
    ///
    /// Returns `SolveError::InvalidInput` if the matrix is empty, has more rows
    /// than columns, or contains negative or non-finite costs.
    pub fn new(cost: &CostMatrix) -> Result<Self, SolveError> {
        Self::with_config(cost, SolverConfig::default())
    }

    /// Create a solver with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `SolveError::InvalidInput` for an invalid matrix or tolerance.
    pub fn with_config(cost: &CostMatrix, config: SolverConfig) -> Result<Self, SolveError> {
        validate_cost_matrix(cost)?;
        validate_tolerance(config.tolerance)?;

        Ok(Self {
            cost: cost.clone(),
            config,
        })
    }

    /// Run the full pipeline: reduce, resolve the zeros, then grow the cover
    /// and adjust until it spans the matrix, and extract one column per row.
    ///
    /// Each round either ends with a cover of `width` lines or matches one
    /// more row, so at most `width + 1` rounds run. Matrices with fewer rows
    /// than columns are padded with zero-cost rows so the cover test runs on
    /// a square matrix; padding rows are dropped from the result.
    ///
    /// # Errors
    ///
    /// Returns `SolveError::InfeasiblePipeline` if the iteration ceiling is
    /// reached or no assignment can be read off the final zeros.
    pub fn solve(self) -> Result<Solution, SolveError> {
        let rows = self.cost.rows();
        let width = self.cost.cols();
        let tolerance = self.config.tolerance;
        let limit = self.config.iteration_limit(width);

        let reduced = reduce(&self.cost.with_padding_rows(width));
        let mut matching = Matching::from_zeros(&resolve_single_zeros(&reduced, tolerance));
        let mut costs = AdjustedCosts::new(reduced);
        let mut adjustments = 0;

        for iteration in 1..=limit {
            let Some(groups) =
                run_round(&mut costs, &mut matching, tolerance, iteration, &mut adjustments)?
            else {
                continue;
            };

            let mut columns = extract_assignment(&groups).ok_or_else(|| {
                SolveError::InfeasiblePipeline(
                    "no complete assignment among the final zeros".to_string(),
                )
            })?;
            columns.truncate(rows);

            let solution =
                Solution::new(Assignment::new(columns), &self.cost, iteration, adjustments);
            info!(
                rows,
                cols = width,
                iterations = iteration,
                adjustments,
                total_cost = solution.total_cost,
                "Solved assignment"
            );
            return Ok(solution);
        }

        Err(SolveError::InfeasiblePipeline(format!(
            "no spanning zero cover after {limit} iterations"
        )))
    }
}

/// Grow a cover from the unmatched rows, adjusting costs until it either spans
/// the matrix or reaches an unmatched column.
///
/// Returns the terminal zero groups in the first case. In the second the
/// matching grows by one row and `None` is returned.
fn run_round(
    costs: &mut AdjustedCosts,
    matching: &mut Matching,
    tolerance: f64,
    iteration: usize,
    adjustments: &mut usize,
) -> Result<Option<ZeroGroups>, SolveError> {
    let mut tree = mark_rows_cols(costs, matching);
    debug!(
        iteration,
        assigned = matching.matched_count(),
        width = costs.cols(),
        "Growing zero cover"
    );

    loop {
        if let Some(col) = tree.extend(costs, matching, tolerance) {
            tree.augment(matching, col);
            return Ok(None);
        }

        match evaluate_cover(costs, &mut tree, matching, tolerance)? {
            CoverOutcome::Adjusted { delta } => {
                *adjustments += 1;
                trace!(
                    iteration,
                    delta,
                    lines = tree.mask().line_count(),
                    "Adjusted uncovered costs"
                );
            }
            CoverOutcome::Complete(groups) => return Ok(Some(groups)),
        }
    }
}

/// Solve the minimum-cost assignment for `cost`, returning one column per row.
///
/// # Errors
///
/// Returns `SolveError::InvalidInput` for invalid matrices; see
/// [`MatchingSolver::solve`] for the remaining cases.
pub fn solve(cost: &CostMatrix) -> Result<Assignment, SolveError> {
    Ok(MatchingSolver::new(cost)?.solve()?.assignment)
}

/// Solve with explicit configuration, returning the assignment with its cost.
///
/// # Errors
///
/// Same as [`solve`], plus `SolveError::InvalidInput` for an invalid tolerance.
pub fn solve_with_config(cost: &CostMatrix, config: SolverConfig) -> Result<Solution, SolveError> {
    MatchingSolver::with_config(cost, config)?.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::sample_cost;

    fn matrix(rows: Vec<Vec<f64>>) -> CostMatrix {
        CostMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_solve_sample() {
        let cost = sample_cost();
        let assignment = solve(&cost).unwrap();
        assert_eq!(assignment.columns(), &[1, 2, 4, 3, 0]);
        assert_eq!(assignment.total_cost(&cost), 32.0);
    }

    #[test]
    fn test_solution_details() {
        let solution = solve_with_config(&sample_cost(), SolverConfig::default()).unwrap();
        assert_eq!(solution.total_cost, 32.0);
        assert_eq!(solution.pairs.len(), 5);
        assert_eq!(solution.pairs[2].column, 4);
        assert_eq!(solution.pairs[2].cost, 9.0);
        // The first cover is one line short; one augmentation completes it
        assert_eq!(solution.iterations, 2);
        assert_eq!(solution.adjustments, 1);
    }

    #[test]
    fn test_solve_single_cell() {
        let assignment = solve(&matrix(vec![vec![5.0]])).unwrap();
        assert_eq!(assignment.columns(), &[0]);
    }

    #[test]
    fn test_solve_all_zero_row() {
        let cost = matrix(vec![
            vec![0.0, 0.0, 0.0],
            vec![3.0, 1.0, 2.0],
            vec![1.0, 4.0, 3.0],
        ]);
        let assignment = solve(&cost).unwrap();
        assert!(assignment.is_valid_for(&cost));
        assert_eq!(assignment.total_cost(&cost), 2.0);
    }

    #[test]
    fn test_solve_rectangular() {
        let cost = matrix(vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![2.0, 4.0, 6.0, 8.0],
            vec![3.0, 6.0, 9.0, 12.0],
        ]);
        let assignment = solve(&cost).unwrap();
        assert_eq!(assignment.len(), 3);
        assert!(assignment.is_valid_for(&cost));
        assert_eq!(assignment.total_cost(&cost), 10.0);
    }

    #[test]
    fn test_solve_rectangular_skips_expensive_column() {
        // Column reduction alone would make both cells zero; padding keeps
        // the cheaper column.
        let cost = matrix(vec![vec![5.0, 3.0]]);
        assert_eq!(solve(&cost).unwrap().columns(), &[1]);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(
            solve(&matrix(vec![])),
            Err(SolveError::InvalidInput(ValidationError::Empty { .. }))
        ));
        assert!(matches!(
            solve(&matrix(vec![vec![1.0, -1.0], vec![0.0, 0.0]])),
            Err(SolveError::InvalidInput(ValidationError::Negative { .. }))
        ));
        assert!(matches!(
            solve(&matrix(vec![vec![1.0], vec![2.0]])),
            Err(SolveError::InvalidInput(ValidationError::MoreRowsThanColumns { .. }))
        ));
    }

    #[test]
    fn test_rejects_invalid_tolerance() {
        let config = SolverConfig {
            tolerance: -1.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            MatchingSolver::with_config(&sample_cost(), config),
            Err(SolveError::InvalidInput(ValidationError::InvalidTolerance(_)))
        ));
    }

    #[test]
    fn test_iteration_ceiling() {
        let config = SolverConfig {
            max_iterations: Some(0),
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_with_config(&sample_cost(), config),
            Err(SolveError::InfeasiblePipeline(_))
        ));
    }

    #[test]
    fn test_iteration_ceiling_counts_rounds() {
        let config = SolverConfig {
            max_iterations: Some(1),
            ..SolverConfig::default()
        };
        assert!(solve_with_config(&sample_cost(), config).is_err());

        let config = SolverConfig {
            max_iterations: Some(2),
            ..SolverConfig::default()
        };
        assert_eq!(solve_with_config(&sample_cost(), config).unwrap().total_cost, 32.0);
    }

    #[test]
    fn test_rounds_stay_within_width() {
        // Products of row and column weights reduce to a single zero column,
        // so nearly every row needs its own round; the optimum pairs heavy
        // rows with light columns.
        let n = 150;
        let cost = CostMatrix::from_fn(n, n, |r, c| ((r + 1) * (c + 1)) as f64);
        let solution = solve_with_config(&cost, SolverConfig::default()).unwrap();

        assert!(solution.iterations <= n + 1, "{} rounds", solution.iterations);
        assert!(solution.adjustments <= n * n);
        let expected: Vec<usize> = (0..n).rev().collect();
        assert_eq!(solution.assignment.columns(), expected.as_slice());
    }

    #[test]
    fn test_solver_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<MatchingSolver>();
    }
}

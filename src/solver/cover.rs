//! Covering the zeros of the working matrix with the fewest lines.
//!
//! Marking starts from the rows the matching leaves unassigned and
//! alternates: a marked row marks every column where it has a zero, and a
//! marked column marks the row matched to it. Unmarked rows plus marked
//! columns then form a minimum line cover of all zeros.
//!
//! The marks form an alternating tree that survives cost adjustments. For each
//! unmarked column the tree keeps the smallest value over the marked rows, so
//! an adjustment finds its delta, and the zeros it creates, without scanning
//! the matrix.

use crate::solver::adjusted::AdjustedCosts;
use crate::solver::engine::SolveError;
use crate::solver::zeros::Matching;
use crate::utils::validation::is_zero;

/// Row and column marks of a cover.
///
/// A cell is covered when its row is unmarked or its column is marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverMask {
    pub row_marked: Vec<bool>,
    pub col_marked: Vec<bool>,
}

impl CoverMask {
    #[must_use]
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        !self.row_marked[row] || self.col_marked[col]
    }

    /// Number of lines in the cover: unmarked rows plus marked columns
    #[must_use]
    pub fn line_count(&self) -> usize {
        let unmarked_rows = self.row_marked.iter().filter(|&&marked| !marked).count();
        let marked_cols = self.col_marked.iter().filter(|&&marked| marked).count();
        unmarked_rows + marked_cols
    }
}

/// Marks grown from the unmatched rows, with per-column slack.
#[derive(Debug, Clone)]
pub struct CoverTree {
    mask: CoverMask,
    /// Marked row whose zero reached each marked column
    parent_row: Vec<Option<usize>>,
    /// Smallest current value over the marked rows, per column
    slack: Vec<f64>,
    slack_row: Vec<usize>,
}

impl CoverTree {
    #[must_use]
    pub fn mask(&self) -> &CoverMask {
        &self.mask
    }

    fn mark_row(&mut self, row: usize, costs: &AdjustedCosts) {
        self.mask.row_marked[row] = true;
        for (col, value) in costs.row_values(row).enumerate() {
            if !self.mask.col_marked[col] && value < self.slack[col] {
                self.slack[col] = value;
                self.slack_row[col] = row;
            }
        }
    }

    /// Follow zeros out of the marked rows until no new column is reached.
    ///
    /// Returns the first unmatched column reached; the tree path back to an
    /// unmatched row is then an augmenting path.
    pub fn extend(
        &mut self,
        costs: &AdjustedCosts,
        matching: &Matching,
        tolerance: f64,
    ) -> Option<usize> {
        loop {
            let col = (0..self.slack.len())
                .find(|&col| !self.mask.col_marked[col] && self.slack[col] <= tolerance)?;

            self.mask.col_marked[col] = true;
            self.parent_row[col] = Some(self.slack_row[col]);

            match matching.row_for(col) {
                None => return Some(col),
                Some(row) => self.mark_row(row, costs),
            }
        }
    }

    /// Flip the matching along the tree path ending at the unmatched column
    /// `col`, matching one more row.
    pub fn augment(&self, matching: &mut Matching, col: usize) {
        let mut next = Some(col);
        while let Some(col) = next {
            let Some(row) = self.parent_row[col] else {
                break;
            };
            next = matching.assign(row, col);
        }
    }

    /// Smallest value among cells the mask leaves uncovered
    fn min_uncovered(&self) -> Option<f64> {
        self.slack
            .iter()
            .zip(&self.mask.col_marked)
            .filter(|&(value, &marked)| !marked && value.is_finite())
            .map(|(&value, _)| value)
            .min_by(f64::total_cmp)
    }
}

/// Candidate zero columns for every row of the terminal matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroGroups {
    groups: Vec<Vec<usize>>,
}

impl ZeroGroups {
    /// Collect each row's zeros in scan order.
    ///
    /// A row's matched column is always included, so the groups keep a
    /// complete assignment even when floating-point shifts leave a matched
    /// cell a hair away from zero.
    #[must_use]
    pub fn collect(costs: &AdjustedCosts, matching: &Matching, tolerance: f64) -> Self {
        let groups = (0..costs.rows())
            .map(|row| {
                let assigned = matching.column_for(row);
                costs
                    .row_values(row)
                    .enumerate()
                    .filter(|&(col, value)| Some(col) == assigned || is_zero(value, tolerance))
                    .map(|(col, _)| col)
                    .collect()
            })
            .collect();
        Self { groups }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn candidates(&self, row: usize) -> &[usize] {
        &self.groups[row]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Vec<usize>] {
        &self.groups
    }
}

impl From<Vec<Vec<usize>>> for ZeroGroups {
    fn from(groups: Vec<Vec<usize>>) -> Self {
        Self { groups }
    }
}

/// Result of evaluating a cover
#[derive(Debug, Clone, PartialEq)]
pub enum CoverOutcome {
    /// The cover was too small; the uncovered costs moved by `delta` and the
    /// tree must be extended again
    Adjusted { delta: f64 },
    /// The cover spans the matrix; a complete assignment exists on these zeros
    Complete(ZeroGroups),
}

/// Start a cover by marking every row the matching leaves unassigned.
///
/// Propagation through zeros happens in [`CoverTree::extend`].
#[must_use]
pub fn mark_rows_cols(costs: &AdjustedCosts, matching: &Matching) -> CoverTree {
    let (rows, cols) = (costs.rows(), costs.cols());
    let mut tree = CoverTree {
        mask: CoverMask {
            row_marked: vec![false; rows],
            col_marked: vec![false; cols],
        },
        parent_row: vec![None; cols],
        slack: vec![f64::INFINITY; cols],
        slack_row: vec![0; cols],
    };

    for row in 0..rows {
        if matching.column_for(row).is_none() {
            tree.mark_row(row, costs);
        }
    }
    tree
}

/// Decide whether a fully extended cover proves an assignment exists,
/// adjusting the costs when it does not.
///
/// With fewer lines than columns, the smallest uncovered value is subtracted
/// from marked rows and added to marked columns. The marks stay valid, and
/// every column whose slack drops to zero is picked up by the next
/// [`CoverTree::extend`].
///
/// # Errors
///
/// Returns `SolveError::InfeasiblePipeline` if the cover is too small yet
/// leaves no cell uncovered.
pub fn evaluate_cover(
    costs: &mut AdjustedCosts,
    tree: &mut CoverTree,
    matching: &Matching,
    tolerance: f64,
) -> Result<CoverOutcome, SolveError> {
    let width = costs.cols();
    let lines = tree.mask.line_count();

    if lines >= width {
        return Ok(CoverOutcome::Complete(ZeroGroups::collect(
            costs, matching, tolerance,
        )));
    }

    let delta = tree.min_uncovered().ok_or_else(|| {
        SolveError::InfeasiblePipeline(format!(
            "cover of {lines} lines leaves no uncovered cell in a {}x{width} matrix",
            costs.rows()
        ))
    })?;

    costs.adjust(&tree.mask, delta);
    for (slack, &marked) in tree.slack.iter_mut().zip(&tree.mask.col_marked) {
        if !marked {
            *slack -= delta;
        }
    }

    Ok(CoverOutcome::Adjusted { delta })
}

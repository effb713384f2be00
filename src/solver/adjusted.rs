//! The working matrix of the cover loop.

use crate::core::matrix::CostMatrix;
use crate::solver::cover::CoverMask;

/// Reduced costs with cover adjustments folded in on read.
///
/// An adjustment subtracts a delta from every cell of a marked row and adds it
/// to every cell of a marked column. Instead of rewriting the matrix, the
/// deltas are summed per row and per column:
/// `value(r, c) = base[r, c] - row_shift[r] + col_shift[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedCosts {
    base: CostMatrix,
    row_shift: Vec<f64>,
    col_shift: Vec<f64>,
}

impl AdjustedCosts {
    #[must_use]
    pub fn new(base: CostMatrix) -> Self {
        Self {
            row_shift: vec![0.0; base.rows()],
            col_shift: vec![0.0; base.cols()],
            base,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.base.rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.base.cols()
    }

    #[inline]
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.base[(row, col)] - self.row_shift[row] + self.col_shift[col]
    }

    /// Current values of one row, left to right
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = f64> + '_ {
        let shift = self.row_shift[row];
        self.base
            .row(row)
            .iter()
            .zip(&self.col_shift)
            .map(move |(&value, &col_shift)| value - shift + col_shift)
    }

    /// Subtract `delta` from marked rows and add it to marked columns.
    ///
    /// Cells in a marked row and a marked column keep their value.
    pub fn adjust(&mut self, mask: &CoverMask, delta: f64) {
        for (shift, &marked) in self.row_shift.iter_mut().zip(&mask.row_marked) {
            if marked {
                *shift += delta;
            }
        }
        for (shift, &marked) in self.col_shift.iter_mut().zip(&mask.col_marked) {
            if marked {
                *shift += delta;
            }
        }
    }

    /// Materialize the current values
    #[must_use]
    pub fn to_matrix(&self) -> CostMatrix {
        CostMatrix::from_fn(self.rows(), self.cols(), |row, col| self.value(row, col))
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::utils::validation::ValidationError;

/// A dense, row-major matrix of assignment costs.
///
/// Rows are the agents being assigned and columns the tasks they are assigned
/// to. Serializes as an array of row arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ShapeMismatch` if `data` does not hold exactly
    /// `rows * cols` values, including when that product overflows.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ValidationError> {
        let found = data.len();
        let expected = rows.checked_mul(cols);
        if expected != Some(found) {
            return Err(ValidationError::ShapeMismatch {
                expected: expected.unwrap_or(usize::MAX),
                found,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix by evaluating `f(row, col)` for every cell.
    #[must_use]
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Build a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RaggedRows` if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ValidationError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix has no cells at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// All values in row-major order
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().skip(col).step_by(self.cols.max(1)).copied()
    }

    /// Smallest value in a row (`f64::INFINITY` for a zero-width matrix)
    #[must_use]
    pub fn row_min(&self, row: usize) -> f64 {
        self.row(row).iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Smallest value in a column (`f64::INFINITY` for a zero-height matrix)
    #[must_use]
    pub fn col_min(&self, col: usize) -> f64 {
        self.column(col).fold(f64::INFINITY, f64::min)
    }

    /// Copy the matrix, appending zero-cost rows until it has `target_rows` rows.
    ///
    /// Does nothing beyond cloning when the matrix already has that many rows.
    #[must_use]
    pub fn with_padding_rows(&self, target_rows: usize) -> Self {
        let mut padded = self.clone();
        if target_rows > self.rows {
            padded.data.resize(target_rows * self.cols, 0.0);
            padded.rows = target_rows;
        }
        padded
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for CostMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        &mut self.data[row * self.cols + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CostMatrix) -> Self {
        matrix.to_rows()
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.data.iter().map(ToString::to_string).collect();
        let width = cells.iter().map(String::len).max().unwrap_or(0);

        for row in 0..self.rows {
            let line: Vec<String> = cells[row * self.cols..(row + 1) * self.cols]
                .iter()
                .map(|cell| format!("{cell:>width$}"))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

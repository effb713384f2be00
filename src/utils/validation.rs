//! Centralized validation and helper functions.

use crate::core::matrix::CostMatrix;

/// Maximum number of rows or columns accepted in a cost matrix (DOS protection)
pub const MAX_DIMENSION: usize = 1_000;

/// Largest zero tolerance accepted; anything looser lets genuinely positive
/// reduced costs pass as zeros and the result stops being optimal
pub const MAX_ZERO_TOLERANCE: f64 = 1e-6;

/// Cost matrix validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Cost matrix is empty ({rows}x{cols})")]
    Empty { rows: usize, cols: usize },
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Matrix data has {found} values, expected {expected} for its shape")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("Cost at ({row}, {col}) is not finite: {value}")]
    NonFinite { row: usize, col: usize, value: f64 },
    #[error("Cost at ({row}, {col}) is negative: {value}")]
    Negative { row: usize, col: usize, value: f64 },
    #[error("Matrix has more rows ({rows}) than columns ({cols}); transpose it first")]
    MoreRowsThanColumns { rows: usize, cols: usize },
    #[error("Matrix dimension {0} exceeds maximum of {MAX_DIMENSION}")]
    TooLarge(usize),
    #[error("Zero tolerance must be between 0 and {MAX_ZERO_TOLERANCE}, got {0}")]
    InvalidTolerance(f64),
}

/// Check if adding another row or column to `count` would exceed
/// [`MAX_DIMENSION`].
#[must_use]
pub fn at_dimension_limit(count: usize) -> bool {
    count >= MAX_DIMENSION
}

/// Whether a reduced cost counts as zero under `tolerance`.
///
/// # Examples
///
/// ```
/// use munkres_solver::utils::validation::is_zero;
///
/// assert!(is_zero(0.0, 1e-9));
/// assert!(is_zero(-1e-12, 1e-9));
/// assert!(!is_zero(0.5, 1e-9));
/// ```
#[inline]
#[must_use]
pub fn is_zero(value: f64, tolerance: f64) -> bool {
    value.abs() <= tolerance
}

/// Validate a cost matrix before solving.
///
/// Accepts non-empty matrices with at most as many rows as columns, every
/// entry finite and non-negative, and both dimensions within
/// [`MAX_DIMENSION`].
///
/// # Errors
///
/// Returns the first violated condition as a `ValidationError`.
pub fn validate_cost_matrix(cost: &CostMatrix) -> Result<(), ValidationError> {
    let (rows, cols) = (cost.rows(), cost.cols());

    if cost.is_empty() {
        return Err(ValidationError::Empty { rows, cols });
    }

    if let Some(&too_large) = [rows, cols].iter().find(|&&n| n > MAX_DIMENSION) {
        return Err(ValidationError::TooLarge(too_large));
    }

    if rows > cols {
        return Err(ValidationError::MoreRowsThanColumns { rows, cols });
    }

    for (i, &value) in cost.values().iter().enumerate() {
        let (row, col) = (i / cols, i % cols);
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { row, col, value });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { row, col, value });
        }
    }

    Ok(())
}

/// Validate the zero tolerance used when scanning reduced costs.
///
/// # Errors
///
/// Returns `ValidationError::InvalidTolerance` unless the value lies in
/// `[0, MAX_ZERO_TOLERANCE]`.
pub fn validate_tolerance(tolerance: f64) -> Result<(), ValidationError> {
    if (0.0..=MAX_ZERO_TOLERANCE).contains(&tolerance) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTolerance(tolerance))
    }
}

//! Parser for JSON cost matrices.
//!
//! The expected shape is an array of row arrays, e.g. `[[1, 2], [3, 4]]`,
//! which is also how [`CostMatrix`] serializes.

use crate::core::matrix::CostMatrix;
use crate::parsing::text::ParseError;
use crate::utils::validation::MAX_DIMENSION;

/// Parse a JSON array of row arrays into a cost matrix
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, `ParseError::Shape` for
/// ragged rows, `ParseError::InvalidFormat` for an empty array, or
/// `ParseError::TooLarge` if the dimension limit is exceeded.
pub fn parse_json_text(text: &str) -> Result<CostMatrix, ParseError> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(text)?;

    if rows.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No matrix rows found in JSON array".to_string(),
        ));
    }

    if let Some(too_large) = std::iter::once(rows.len())
        .chain(rows.iter().map(Vec::len))
        .find(|&n| n > MAX_DIMENSION)
    {
        return Err(ParseError::TooLarge(too_large));
    }

    Ok(CostMatrix::from_rows(rows)?)
}

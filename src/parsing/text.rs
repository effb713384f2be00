use thiserror::Error;

use crate::core::matrix::CostMatrix;
use crate::utils::validation::{at_dimension_limit, ValidationError, MAX_DIMENSION};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid matrix format: {0}")]
    InvalidFormat(String),

    #[error("Invalid JSON matrix: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid matrix shape: {0}")]
    Shape(#[from] ValidationError),

    #[error("Too many rows or columns: {0} exceeds maximum allowed ({MAX_DIMENSION})")]
    TooLarge(usize),
}

/// Field separator for delimited matrix text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    /// Any run of spaces or tabs
    Whitespace,
}

impl Delimiter {
    fn split<'a>(self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Tab => line.split('\t').map(str::trim).collect(),
            Self::Comma => line.split(',').map(str::trim).collect(),
            Self::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Parse delimited text with one matrix row per line.
///
/// Blank lines and lines starting with `#` are skipped. A first data line made
/// entirely of non-numeric fields is treated as a header.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for non-numeric values or when no rows
/// are found, `ParseError::Shape` for rows of different lengths, or
/// `ParseError::TooLarge` if the dimension limit is exceeded.
pub fn parse_delimited_text(text: &str, delimiter: Delimiter) -> Result<CostMatrix, ParseError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = delimiter.split(line);

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            if fields.iter().all(|field| field.parse::<f64>().is_err()) {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() > MAX_DIMENSION {
            return Err(ParseError::TooLarge(fields.len()));
        }

        let values = fields
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|_| {
                    ParseError::InvalidFormat(format!("Invalid number on line {line_num}: '{field}'"))
                })
            })
            .collect::<Result<Vec<f64>, ParseError>>()?;

        // Check row limit for DOS protection
        if at_dimension_limit(rows.len()) {
            return Err(ParseError::TooLarge(rows.len() + 1));
        }

        rows.push(values);
    }

    if rows.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No matrix rows found in input".to_string(),
        ));
    }

    Ok(CostMatrix::from_rows(rows)?)
}

//! Parsers for reading cost matrices from files and text.
//!
//! Supported formats:
//!
//! - **TSV / CSV**: one row per line, tab or comma separated
//! - **Whitespace separated text**: one row per line, any run of spaces/tabs
//! - **JSON**: an array of row arrays
//!
//! Any of these may be gzip-compressed (`.gz`). Blank lines and `#` comments
//! are ignored in the text formats.
//!
//! ## Example
//!
//! ```rust
//! use munkres_solver::parsing::parse_matrix_text;
//!
//! let matrix = parse_matrix_text("12 7 9\n8 9 6\n", None).unwrap();
//! assert_eq!(matrix.rows(), 2);
//! assert_eq!(matrix.cols(), 3);
//! ```

pub mod json;
pub mod text;

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::core::matrix::CostMatrix;
use text::{parse_delimited_text, Delimiter, ParseError};

/// On-disk representation of a cost matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    Tsv,
    Csv,
    Whitespace,
    Json,
}

impl MatrixFormat {
    /// Guess the format from a file name, looking through a `.gz` suffix.
    ///
    /// Returns `None` for extensions that do not pin down a format.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let ext = Path::new(name).extension()?.to_str()?;

        match ext {
            "tsv" | "tab" => Some(Self::Tsv),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Guess the format from content: JSON if it opens with `[`, otherwise
    /// the separator found on the first data line.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with('[') {
            return Self::Json;
        }

        let first_data_line = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .unwrap_or("");

        if first_data_line.contains('\t') {
            Self::Tsv
        } else if first_data_line.contains(',') {
            Self::Csv
        } else {
            Self::Whitespace
        }
    }
}

/// Read a file's text, decompressing it when the name ends in `.gz`
fn read_text(path: &Path) -> Result<String, ParseError> {
    let gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if gzipped {
        let mut text = String::new();
        GzDecoder::new(std::fs::File::open(path)?).read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse a cost matrix from text in the given format, or a detected one.
///
/// # Errors
///
/// Returns a `ParseError` describing why the text is not a matrix.
pub fn parse_matrix_text(text: &str, format: Option<MatrixFormat>) -> Result<CostMatrix, ParseError> {
    match format.unwrap_or_else(|| MatrixFormat::detect(text)) {
        MatrixFormat::Tsv => parse_delimited_text(text, Delimiter::Tab),
        MatrixFormat::Csv => parse_delimited_text(text, Delimiter::Comma),
        MatrixFormat::Whitespace => parse_delimited_text(text, Delimiter::Whitespace),
        MatrixFormat::Json => json::parse_json_text(text),
    }
}

/// Parse a cost matrix file.
///
/// The format is taken from `format` if given, then from the file extension,
/// then from the content.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_matrix_file(path: &Path, format: Option<MatrixFormat>) -> Result<CostMatrix, ParseError> {
    let text = read_text(path)?;
    parse_matrix_text(&text, format.or_else(|| MatrixFormat::from_path(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    #[test]
    fn test_format_from_path() {
        assert_eq!(MatrixFormat::from_path(Path::new("a.tsv")), Some(MatrixFormat::Tsv));
        assert_eq!(MatrixFormat::from_path(Path::new("a.CSV")), Some(MatrixFormat::Csv));
        assert_eq!(
            MatrixFormat::from_path(Path::new("dir/costs.json.gz")),
            Some(MatrixFormat::Json)
        );
        assert_eq!(MatrixFormat::from_path(Path::new("costs.txt")), None);
        assert_eq!(MatrixFormat::from_path(Path::new("costs")), None);
    }

    #[test]
    fn test_detect() {
        assert_eq!(MatrixFormat::detect("  [[1, 2]]"), MatrixFormat::Json);
        assert_eq!(MatrixFormat::detect("# c\n1\t2\n"), MatrixFormat::Tsv);
        assert_eq!(MatrixFormat::detect("1,2\n"), MatrixFormat::Csv);
        assert_eq!(MatrixFormat::detect("1 2\n"), MatrixFormat::Whitespace);
    }

    #[test]
    fn test_parse_matrix_text_detects() {
        let from_json = parse_matrix_text("[[1, 2], [3, 4]]", None).unwrap();
        let from_csv = parse_matrix_text("1,2\n3,4\n", None).unwrap();
        assert_eq!(from_json, from_csv);
    }

    #[test]
    fn test_parse_matrix_file_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costs.tsv");
        std::fs::write(&path, "1\t2\n3\t4\n").unwrap();

        let matrix = parse_matrix_file(&path, None).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_parse_matrix_file_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costs.json.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"[[5, 1], [2, 7]]").unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let matrix = parse_matrix_file(&path, None).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![5.0, 1.0], vec![2.0, 7.0]]);
    }

    #[test]
    fn test_parse_matrix_file_missing() {
        let err = parse_matrix_file(Path::new("/nonexistent/costs.tsv"), None).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}

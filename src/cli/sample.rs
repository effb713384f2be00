//! Sample command - print the built-in demonstration matrix.
//!
//! The TSV and JSON renderings can be piped straight back into `solve -`.

use crate::cli::OutputFormat;
use crate::core::sample::sample_cost;

/// Execute the sample command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    let cost = sample_cost();

    match format {
        OutputFormat::Text => print!("{cost}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(&cost)?),
        OutputFormat::Tsv => {
            for row in cost.to_rows() {
                let fields: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!("{}", fields.join("\t"));
            }
        }
    }

    Ok(())
}

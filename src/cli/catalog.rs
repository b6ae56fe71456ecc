//! Catalog command implementation.

use super::output::{catalog_entries, format_catalog_text};
use super::{CliError, OutputFormat, to_json};

/// Execute the catalog command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn execute(format: OutputFormat) -> Result<(), CliError> {
    let entries = catalog_entries();
    match format {
        OutputFormat::Text => print!("{}", format_catalog_text(&entries)),
        OutputFormat::Json => println!("{}", to_json(&entries)?),
    }
    Ok(())
}

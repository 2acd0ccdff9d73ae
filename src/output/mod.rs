//! Output writers
//!
//! Serializes a completed export either as CSV (header = accumulated field
//! order, blank cells for absent fields) or as a JSON array of flat
//! string-valued objects. An absent export result writes nothing and raises
//! nothing, in either format.

pub mod csv;
pub mod json;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::record::ExportResult;
use std::path::Path;
use tracing::info;

/// Write the export in the requested format. Returns whether a file was
/// actually produced (an absent result is a silent no-op).
pub fn write_export(
    result: Option<&ExportResult>,
    format: OutputFormat,
    path: &Path,
) -> Result<bool> {
    let Some(result) = result else {
        return Ok(false);
    };

    info!(path = %path.display(), format = %format, "Writing output file");
    match format {
        OutputFormat::Csv => csv::write_file(result, path)?,
        OutputFormat::Json => json::write_file(result, path)?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_absent_result_writes_nothing() {
        let dir = tempdir().unwrap();

        for format in [OutputFormat::Csv, OutputFormat::Json] {
            let path = dir.path().join(format!("out.{}", format.extension()));
            let written = write_export(None, format, &path).unwrap();
            assert!(!written);
            assert!(!path.exists());
        }
    }
}

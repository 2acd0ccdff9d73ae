//! CSV serialization
//!
//! Comma-delimited, double-quote quoting with the writer's standard minimal
//! escaping. The header row is the accumulated field order; fields absent
//! from a record are written as empty cells.

use crate::error::Result;
use crate::record::{value_to_text, ExportResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the export as a CSV file at the given path
pub fn write_file(result: &ExportResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_to(result, BufWriter::new(file))
}

/// Write the export as CSV to any writer
pub fn write_to<W: Write>(result: &ExportResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(result.field_order.iter())?;

    for record in &result.records {
        let row: Vec<String> = result
            .field_order
            .iter()
            .map(|name| record.get(name).map(value_to_text).unwrap_or_default())
            .collect();
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

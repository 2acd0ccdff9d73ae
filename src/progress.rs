//! Progress reporting for the export
//!
//! Provides a real-time progress line using an indicatif spinner, plus the
//! styled header and summary blocks printed around the run.

use crate::scan::PageProgress;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays scan status
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the display after a page
    pub fn update(&self, progress: &PageProgress) {
        let msg = format!(
            "{} records ..... {:.2}% | Total: {}",
            format_number(progress.page_records as u64),
            progress.percent,
            format_number(progress.total_records as u64),
        );
        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .map(|&b| b as char)
                .collect::<String>()
        })
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the export
pub fn print_header(table: &str, profile: &str, output: &str) {
    println!();
    println!(
        "{} {}",
        style("dynamodb-export").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Table:").bold(), table);
    println!("  {} {}", style("Profile:").bold(), profile);
    println!("  {} {}", style("Output:").bold(), output);
    println!();
}

/// Print a summary of the export results
pub fn print_summary(
    records: u64,
    fields: u64,
    duration: Duration,
    output: &str,
    file_size: Option<u64>,
) {
    println!();
    println!("{}", style("Export Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Total downloaded records:").bold(),
        format_number(records)
    );
    println!("  {} {}", style("Fields:").bold(), format_number(fields));
    println!(
        "  {} {:.1}s",
        style("Duration:").bold(),
        duration.as_secs_f64()
    );
    if let Some(size) = file_size {
        println!(
            "  {} {} ({} bytes)",
            style("File:").bold(),
            output,
            format_number(size)
        );
    } else {
        println!("  {} {}", style("File:").bold(), output);
    }
    println!();
}

/// Print a notice when the scan produced nothing to write
pub fn print_empty_result() {
    println!();
    println!(
        "{}",
        style("Scan returned no result - no file written").yellow()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.set_status("Downloading...");
        reporter.update(&PageProgress {
            page_records: 10,
            total_records: 10,
            percent: 50.0,
        });
        reporter.finish("Downloaded 10 records");

        let reporter = ProgressReporter::new();
        reporter.finish_and_clear();
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}

//! dynamodb-export - DynamoDB table snapshot tool
//!
//! Exports every matching record from one DynamoDB table into a flat file
//! (CSV or JSON) for ad-hoc operator snapshots.
//!
//! # Behavior
//!
//! - **Filtered scan**: records are filtered server-side, either on
//!   `codeRecette == <value>` (with `--recette`) or on the step-zero marker
//!   `noEtape == "0"` (default).
//!
//! - **Pagination**: the scan follows continuation keys one page at a time
//!   until the table is exhausted, with a progress line per page.
//!
//! - **Cleaning**: `<...>` tags are stripped from each record's `message`
//!   field and the `audiourl` field is removed before accumulation.
//!
//! - **Schema accumulation**: records may have differing shapes, so the
//!   output schema is the union of field names seen across all records -
//!   declared key attributes first, extras in first-seen order.
//!
//! The run is strictly sequential: one request in flight at a time, and the
//! fetch completes fully before any writing begins. Errors are not retried;
//! the first failure aborts the run.
//!
//! # Example
//!
//! ```bash
//! # Default: step-zero records, CSV to recipes.csv
//! dynamodb-export -t recipes
//!
//! # One recipe as JSON, explicit path
//! dynamodb-export -t recipes -r R42 -f json -o /tmp/r42.json
//! ```

pub mod clean;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod record;
pub mod scan;

pub use config::{CliArgs, ExportConfig, OutputFormat};
pub use error::{ExportError, Result};
pub use record::{ExportResult, FieldOrder, Record};
pub use scan::{Fetcher, PageProgress, ScanFilter, TableSource};

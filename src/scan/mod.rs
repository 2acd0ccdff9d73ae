//! Table scanning
//!
//! This module defines:
//! - `TableSource`: the seam between the fetch loop and the remote store
//! - `ScanFilter`: the server-side predicate applied to the scan
//! - `Fetcher`: the paginated read loop that accumulates records
//!
//! The DynamoDB-backed source lives in `dynamo`; tests drive the fetcher
//! through in-memory sources instead.

pub mod dynamo;
mod fetcher;

pub use fetcher::{Fetcher, PageProgress};

use crate::error::ScanResult;
use crate::record::Record;
use async_trait::async_trait;

/// Attribute filtered on when a recipe code is supplied
pub const RECIPE_CODE_ATTR: &str = "codeRecette";

/// Attribute filtered on by default
pub const STEP_NUMBER_ATTR: &str = "noEtape";

/// Declared table metadata used to seed the export
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Declared key attribute names, in declaration order
    pub key_attributes: Vec<String>,

    /// Approximate total row count, used only for progress estimation.
    /// May be stale; the percentage is capped accordingly.
    pub item_count: u64,
}

/// Server-side predicate restricting which items a scan returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFilter {
    /// `codeRecette == <value>`
    RecipeCode(String),

    /// `noEtape == "0"` - the "step zero" marker
    StepZero,
}

impl ScanFilter {
    /// Build the filter from the optional `--recette` value
    pub fn from_recette(recette: Option<String>) -> Self {
        match recette {
            Some(code) => ScanFilter::RecipeCode(code),
            None => ScanFilter::StepZero,
        }
    }

    /// Attribute name the filter compares against
    pub fn attribute(&self) -> &'static str {
        match self {
            ScanFilter::RecipeCode(_) => RECIPE_CODE_ATTR,
            ScanFilter::StepZero => STEP_NUMBER_ATTR,
        }
    }

    /// Value the attribute must equal
    pub fn value(&self) -> &str {
        match self {
            ScanFilter::RecipeCode(code) => code,
            ScanFilter::StepZero => "0",
        }
    }
}

/// One page of scan results
#[derive(Debug)]
pub struct ScanPage<K> {
    /// Items returned in this page, in source order
    pub records: Vec<Record>,

    /// Continuation token; more data remains while this is `Some`
    pub last_key: Option<K>,
}

/// A paginated, filterable view of one table.
///
/// The continuation key type is source-specific and opaque to the fetch
/// loop: it is handed back to the next `scan_page` call unchanged.
#[async_trait]
pub trait TableSource {
    /// Opaque pagination token
    type Key: Send + Sync;

    /// Resolve declared key attributes and the approximate item count
    async fn describe(&self) -> ScanResult<TableInfo>;

    /// Fetch one page. `None` means the store produced no result object
    /// at all (distinct from an empty page), which ends the export with
    /// an empty result rather than an error.
    async fn scan_page(
        &self,
        filter: Option<&ScanFilter>,
        start_key: Option<Self::Key>,
    ) -> ScanResult<Option<ScanPage<Self::Key>>>;
}

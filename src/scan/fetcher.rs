//! Paginated fetch loop
//!
//! The fetcher owns one export run's accumulation state: the record list
//! and the ordered field-name set. It is strictly sequential - one page in
//! flight at a time, each page cleaned and folded in before the next
//! request is issued.

use crate::clean::clean_record;
use crate::error::Result;
use crate::record::{ExportResult, FieldOrder};
use crate::scan::{ScanFilter, TableSource};
use tracing::{debug, info};

/// Progress cap used when the declared item count lags the actual data
const PERCENT_CAP: f64 = 99.99;

/// Progress snapshot reported after each page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageProgress {
    /// Records returned by this page
    pub page_records: usize,

    /// Records accumulated so far, this page included
    pub total_records: usize,

    /// `min(99.99, 100 * total / declared_item_count)`; monotone
    /// non-decreasing across pages
    pub percent: f64,
}

/// Drives the scan of one table to exhaustion
pub struct Fetcher<'a, S: TableSource> {
    source: &'a S,
    filter: ScanFilter,
}

impl<'a, S: TableSource> Fetcher<'a, S> {
    /// Create a fetcher for the given source and filter
    pub fn new(source: &'a S, filter: ScanFilter) -> Self {
        Self { source, filter }
    }

    /// Fetch every matching record, cleaning each one and accumulating the
    /// field-name order as pages arrive. `on_page` is invoked once per page
    /// with the running progress.
    ///
    /// Returns `Ok(None)` when the store yields no result object for the
    /// initial scan. Any scan or cleaning failure aborts the run; progress
    /// made before the failure is discarded.
    pub async fn fetch_all<F>(&self, mut on_page: F) -> Result<Option<ExportResult>>
    where
        F: FnMut(&PageProgress),
    {
        let info = self.source.describe().await?;
        debug!(
            keys = ?info.key_attributes,
            item_count = info.item_count,
            "Resolved table metadata"
        );

        let mut field_order = FieldOrder::with_declared_keys(info.key_attributes.clone());

        let Some(mut page) = self
            .source
            .scan_page(Some(&self.filter), None)
            .await?
        else {
            return Ok(None);
        };

        let mut records = Vec::new();
        loop {
            let page_count = page.records.len();
            for mut record in page.records {
                clean_record(&mut record)?;
                field_order.observe(&record);
                records.push(record);
            }

            on_page(&PageProgress {
                page_records: page_count,
                total_records: records.len(),
                percent: progress_percent(records.len() as u64, info.item_count),
            });

            // Continuation requests carry only the pagination token; the
            // filter expression is not resent on subsequent pages.
            let Some(key) = page.last_key.take() else {
                break;
            };
            match self.source.scan_page(None, Some(key)).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        info!(records = records.len(), "Scan complete");
        Ok(Some(ExportResult {
            records,
            field_order,
        }))
    }
}

/// Cumulative progress against the declared item count, capped at 99.99
/// when the declared count is stale (smaller than what was actually read,
/// or zero while records exist).
fn progress_percent(cumulative: u64, declared: u64) -> f64 {
    if declared == 0 {
        if cumulative > 0 {
            PERCENT_CAP
        } else {
            0.0
        }
    } else {
        f64::min(PERCENT_CAP, cumulative as f64 * 100.0 / declared as f64)
    }
}

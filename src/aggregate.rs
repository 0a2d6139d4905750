//! Month-range iteration and row-count aggregation.
//!
//! Walks a sequence of dataset refs strictly in order, measures each one,
//! and folds the outcomes into a [`RangeSummary`]. One failed partition is
//! recorded and skipped over, never fatal to the rest of the range.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

use crate::analyzer;
use crate::archive::CleanupPolicy;
use crate::dataset::DatasetRef;
use crate::error::AnalyzeError;
use crate::fetch::HttpClient;
use crate::stats::AnalysisResult;

/// One row of the run report: a partition either measured or failed.
#[derive(Debug, Serialize)]
pub struct PartitionReport {
    pub dataset: String,
    pub timestamp: DateTime<Utc>,

    pub row_count: Option<u64>,
    pub byte_size: Option<u64>,

    pub error_type: Option<String>,
    pub error_message: Option<String>,
}

impl PartitionReport {
    pub fn measured(dataset: &DatasetRef, result: &AnalysisResult) -> Self {
        Self {
            dataset: dataset.resource_name(),
            timestamp: Utc::now(),
            row_count: Some(result.row_count),
            byte_size: Some(result.byte_size),
            error_type: None,
            error_message: None,
        }
    }

    pub fn failed(dataset: &DatasetRef, error: &AnalyzeError) -> Self {
        Self {
            dataset: dataset.resource_name(),
            timestamp: Utc::now(),
            row_count: None,
            byte_size: None,
            error_type: Some(error.kind().to_string()),
            error_message: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error_type.is_some()
    }
}

/// Totals accumulated over one range run.
#[derive(Debug, Default, Serialize)]
pub struct RangeSummary {
    pub total_rows: u64,
    pub completed: usize,
    pub failed: usize,
    pub reports: Vec<PartitionReport>,
}

impl RangeSummary {
    /// Folds one partition outcome into the running totals.
    fn record(mut self, report: PartitionReport) -> Self {
        match report.row_count {
            Some(rows) => {
                self.total_rows += rows;
                self.completed += 1;
            }
            None => self.failed += 1,
        }
        self.reports.push(report);
        self
    }

    pub fn all_failed(&self) -> bool {
        self.completed == 0 && self.failed > 0
    }
}

/// Processes `refs` one at a time, in order, and sums row counts across the
/// partitions that succeed.
///
/// Failures are logged and reported per partition; the range keeps going.
pub async fn analyze_range<C: HttpClient>(
    client: &C,
    refs: &[DatasetRef],
    base_url: &str,
    workdir: &Path,
    cleanup: CleanupPolicy,
) -> RangeSummary {
    let mut summary = RangeSummary::default();

    for dataset in refs {
        let report = match analyzer::analyze(client, dataset, base_url, workdir, cleanup).await {
            Ok(result) => {
                info!(%dataset, rows = result.row_count, "Partition analyzed");
                PartitionReport::measured(dataset, &result)
            }
            Err(e) => {
                error!(%dataset, error = %e, "Partition failed, continuing with the rest");
                PartitionReport::failed(dataset, &e)
            }
        };
        summary = summary.record(report);
    }

    if summary.all_failed() {
        warn!(
            partitions = summary.failed,
            "Every partition in the range failed"
        );
    }

    summary
}

//! Output formatting and persistence for run results.
//!
//! Human-readable summaries go to stdout; per-partition report rows are
//! appended to a CSV file; JSON output is available for the range summary.

use anyhow::Result;
use tracing::debug;

use crate::aggregate::{PartitionReport, RangeSummary};
use crate::dataset::DatasetRef;
use crate::stats::AnalysisResult;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Prints the per-file summary block for one measured partition.
pub fn print_analysis(dataset: &DatasetRef, result: &AnalysisResult) {
    let bar = "=".repeat(60);
    println!("\n{bar}");
    println!("File: {}", dataset.csv_file_name());
    println!("{bar}");
    println!(
        "Uncompressed file size: {:.1} MiB ({} bytes)",
        result.size_mib(),
        group_digits(result.byte_size)
    );
    println!("Row count: {}", group_digits(result.row_count));
    println!("Columns: {}", result.column_names.len());
    println!("Column names:");
    for col in &result.column_names {
        println!("  - {col}");
    }
    println!("{bar}\n");
}

/// Prints per-month lines and range totals for one category/year run.
pub fn print_range_summary(category: &str, year: u16, summary: &RangeSummary) {
    for report in &summary.reports {
        match report.row_count {
            Some(rows) => println!("  {}: {} rows", report.dataset, group_digits(rows)),
            None => println!(
                "  {}: failed ({})",
                report.dataset,
                report.error_message.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let bar = "=".repeat(60);
    println!("\n{bar}");
    println!("TOTAL for {category} taxi {year}:");
    println!("Total rows: {}", group_digits(summary.total_rows));
    println!("Files processed: {}", summary.completed);
    if summary.failed > 0 {
        println!("Files failed: {}", summary.failed);
    }
    println!("{bar}\n");
}

/// Prints the range summary as pretty JSON.
pub fn print_json(summary: &RangeSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Appends a [`PartitionReport`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, report: &PartitionReport) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(report)?;
    writer.flush()?;

    Ok(())
}

/// Renders `n` with thousands separators: `1234567` becomes `"1,234,567"`.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_report() -> PartitionReport {
        let dataset = DatasetRef::new("yellow", 2020, 12).unwrap();
        let result = AnalysisResult {
            row_count: 3,
            column_names: vec!["a".into(), "b".into()],
            byte_size: 42,
        };
        PartitionReport::measured(&dataset, &result)
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_461_897), "1,461,897");
        assert_eq!(group_digits(24_648_499), "24,648,499");
    }

    #[test]
    fn test_print_analysis_does_not_panic() {
        let dataset = DatasetRef::new("yellow", 2020, 12).unwrap();
        let result = AnalysisResult {
            row_count: 5,
            column_names: vec!["a".into(), "b".into(), "c".into()],
            byte_size: 100,
        };
        print_analysis(&dataset, &result);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let summary = RangeSummary::default();
        print_json(&summary).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("tripdata_stats_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &sample_report()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("tripdata_stats_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_report()).unwrap();
        append_record(&path, &sample_report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("timestamp")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_keeps_failure_rows() {
        let path = temp_path("tripdata_stats_test_failure.csv");
        let _ = fs::remove_file(&path);

        let dataset = DatasetRef::new("green", 2020, 7).unwrap();
        let error = AnalyzeError::Retrieval {
            url: "http://release.test/green/green_tripdata_2020-07.csv.gz".into(),
            reason: "HTTP 404 Not Found".into(),
        };
        append_record(&path, &sample_report()).unwrap();
        append_record(&path, &PartitionReport::failed(&dataset, &error)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + 2 data rows
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("retrieval_error"));

        fs::remove_file(&path).unwrap();
    }
}

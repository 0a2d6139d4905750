use std::fs::{self, File};
use std::path::Path;

use serde::Serialize;

use crate::error::AnalyzeError;

/// Descriptive statistics for one decompressed trip-data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Number of data rows, excluding the header.
    pub row_count: u64,
    /// Header tokens in original order.
    pub column_names: Vec<String>,
    /// Exact length of the uncompressed file.
    pub byte_size: u64,
}

impl AnalysisResult {
    pub fn size_mib(&self) -> f64 {
        self.byte_size as f64 / (1024.0 * 1024.0)
    }
}

/// Reads `path` as headered CSV and measures it.
///
/// The header row defines the column names; every subsequent row is one
/// record. A row whose column count differs from the header is an
/// [`AnalyzeError::Parse`] failure.
pub fn scan_csv(path: &Path) -> Result<AnalysisResult, AnalyzeError> {
    let byte_size = fs::metadata(path)
        .map_err(|source| AnalyzeError::Filesystem {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let file = File::open(path).map_err(|source| AnalyzeError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let column_names: Vec<String> = reader
        .headers()
        .map_err(|source| AnalyzeError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut row_count = 0u64;
    for record in reader.records() {
        record.map_err(|source| AnalyzeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        row_count += 1;
    }

    Ok(AnalysisResult {
        row_count,
        column_names,
        byte_size,
    })
}

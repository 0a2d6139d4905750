use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of one partition analysis.
///
/// Every variant is recoverable at the granularity of a single
/// [`DatasetRef`](crate::dataset::DatasetRef): the range aggregator records
/// the failure and moves on to the next partition.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The remote host answered with a non-success status, or the transfer
    /// itself failed.
    #[error("failed to retrieve {url}: {reason}")]
    Retrieval { url: String, reason: String },

    /// The downloaded bytes are not a valid gzip stream.
    #[error("failed to decompress {}: {source}", .path.display())]
    Decompression {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The decompressed content is not well-formed delimited data.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A transient file could not be written or removed.
    #[error("filesystem operation on {} failed: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyzeError {
    /// Stable machine-readable tag, used for the `error_type` column of
    /// report rows.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::Retrieval { .. } => "retrieval_error",
            AnalyzeError::Decompression { .. } => "decompression_error",
            AnalyzeError::Parse { .. } => "parse_error",
            AnalyzeError::Filesystem { .. } => "filesystem_error",
        }
    }
}

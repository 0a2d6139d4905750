//! Transient on-disk artifacts: the compressed download and the
//! decompressed CSV. Neither is a cache; both belong to a single analysis
//! pass and are removed when it ends.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::dataset::DatasetRef;
use crate::error::AnalyzeError;

/// A file written for the duration of one analysis call.
#[derive(Debug)]
pub struct RetrievedArtifact {
    pub path: PathBuf,
    pub byte_size: u64,
}

impl RetrievedArtifact {
    /// Deletes the backing file, consuming the artifact.
    pub fn remove(self) -> Result<(), AnalyzeError> {
        debug!(path = %self.path.display(), "Removing transient artifact");
        fs::remove_file(&self.path).map_err(|source| AnalyzeError::Filesystem {
            path: self.path,
            source,
        })
    }
}

/// What happens to the decompressed CSV once measurement is done.
///
/// The compressed download is always removed regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupPolicy {
    RemoveAll,
    KeepCsv,
}

/// Persists the raw compressed bytes as `{resource}.csv.gz` under `dir`.
pub fn write_compressed(
    dir: &Path,
    dataset: &DatasetRef,
    bytes: &[u8],
) -> Result<RetrievedArtifact, AnalyzeError> {
    let path = dir.join(dataset.gz_file_name());
    fs::write(&path, bytes).map_err(|source| AnalyzeError::Filesystem {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "Compressed artifact written");

    Ok(RetrievedArtifact {
        path,
        byte_size: bytes.len() as u64,
    })
}

/// Inflates `gz` into `{resource}.csv` under `dir`.
///
/// A corrupt gzip stream is an [`AnalyzeError::Decompression`]; plain I/O
/// trouble reading or writing the files is [`AnalyzeError::Filesystem`].
pub fn decompress(
    gz: &RetrievedArtifact,
    dir: &Path,
    dataset: &DatasetRef,
) -> Result<RetrievedArtifact, AnalyzeError> {
    let compressed = fs::read(&gz.path).map_err(|source| AnalyzeError::Filesystem {
        path: gz.path.clone(),
        source,
    })?;

    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(|source| AnalyzeError::Decompression {
            path: gz.path.clone(),
            source,
        })?;

    let path = dir.join(dataset.csv_file_name());
    fs::write(&path, &inflated).map_err(|source| AnalyzeError::Filesystem {
        path: path.clone(),
        source,
    })?;
    debug!(
        path = %path.display(),
        compressed = compressed.len(),
        inflated = inflated.len(),
        "Artifact decompressed"
    );

    Ok(RetrievedArtifact {
        path,
        byte_size: inflated.len() as u64,
    })
}

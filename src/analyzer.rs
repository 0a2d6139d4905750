//! The download-decompress-measure pipeline.

use std::path::Path;

use tracing::{debug, info};

use crate::archive::{self, CleanupPolicy};
use crate::dataset::DatasetRef;
use crate::error::AnalyzeError;
use crate::fetch::{self, HttpClient};
use crate::stats::{self, AnalysisResult};

/// Retrieves one dataset partition and computes its descriptive statistics.
///
/// Transient files are written under `workdir`. The compressed download
/// never outlives this call; the decompressed CSV survives it only under
/// [`CleanupPolicy::KeepCsv`]. Reprocessing the same ref against a stable
/// remote resource yields an identical result.
#[tracing::instrument(skip(client, base_url, workdir, cleanup), fields(dataset = %dataset))]
pub async fn analyze<C: HttpClient>(
    client: &C,
    dataset: &DatasetRef,
    base_url: &str,
    workdir: &Path,
    cleanup: CleanupPolicy,
) -> Result<AnalysisResult, AnalyzeError> {
    let url = dataset.url(base_url);
    info!(url, "Downloading");
    let body = fetch::fetch_bytes(client, &url).await?;

    let gz = archive::write_compressed(workdir, dataset, &body)?;
    let inflated = archive::decompress(&gz, workdir, dataset);
    // The compressed download is deleted whether or not inflation worked.
    gz.remove()?;
    let csv = inflated?;

    debug!(path = %csv.path.display(), "Measuring");
    let measured = stats::scan_csv(&csv.path);

    if cleanup == CleanupPolicy::RemoveAll {
        csv.remove()?;
    }

    let result = measured?;
    info!(
        rows = result.row_count,
        bytes = result.byte_size,
        columns = result.column_names.len(),
        "Partition measured"
    );
    Ok(result)
}

//! Machine-readable run report for `--json`.

use std::path::PathBuf;

use serde::Serialize;

use crate::admission::AdmittedDocument;
use crate::merge::MergeStatistics;

/// Summary of a stacking run, printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// Whether the run stopped before merging.
    pub dry_run: bool,

    /// Display names of the documents in merge order.
    pub order: Vec<String>,

    /// Name suggested for the artifact.
    pub suggested_name: String,

    /// Where the artifact was (or would be) written.
    pub output_path: PathBuf,

    /// Merge statistics, absent for dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<MergeStatistics>,

    /// Size of the written file in bytes, absent for dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl MergeReport {
    /// Report for a run that stopped before merging.
    pub fn dry_run(
        order: &[AdmittedDocument],
        suggested_name: impl Into<String>,
        output_path: PathBuf,
    ) -> Self {
        Self {
            dry_run: true,
            order: display_names(order),
            suggested_name: suggested_name.into(),
            output_path,
            statistics: None,
            file_size: None,
        }
    }

    /// Report for a completed merge.
    pub fn completed(
        order: &[AdmittedDocument],
        suggested_name: impl Into<String>,
        output_path: PathBuf,
        statistics: MergeStatistics,
        file_size: u64,
    ) -> Self {
        Self {
            dry_run: false,
            order: display_names(order),
            suggested_name: suggested_name.into(),
            output_path,
            statistics: Some(statistics),
            file_size: Some(file_size),
        }
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn display_names(order: &[AdmittedDocument]) -> Vec<String> {
    order.iter().map(|d| d.display_name().to_string()).collect()
}

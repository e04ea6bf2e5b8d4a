//! Core merge implementation.
//!
//! The merge walks a snapshot of the collection strictly in order. For each
//! document it reads the blob, decodes it, copies all of its pages into the
//! output and appends them, and only then moves on to the next document.
//! Reading a blob is the only point where the merge suspends.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};

use crate::admission::AdmittedDocument;
use crate::codec::DocumentCodec;
use crate::error::{PdfStackError, Result};
use crate::merge::naming;
use crate::utils::format_file_size;

/// Smallest number of documents a merge accepts.
pub const MIN_DOCUMENTS: usize = 2;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the inputs in bytes.
    pub input_size: u64,

    /// Size of the merged document in bytes.
    pub output_size: u64,

    /// Total time taken for the merge.
    #[serde(rename = "merge_time_ms", serialize_with = "serialize_millis")]
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Result of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeResult {
    artifact_bytes: Arc<[u8]>,
    suggested_name: String,
    statistics: MergeStatistics,
}

impl MergeResult {
    /// The serialized merged document.
    pub fn artifact_bytes(&self) -> &Arc<[u8]> {
        &self.artifact_bytes
    }

    /// File name suggested for the merged document.
    pub fn suggested_name(&self) -> &str {
        &self.suggested_name
    }

    /// Statistics about the merge.
    pub fn statistics(&self) -> &MergeStatistics {
        &self.statistics
    }
}

/// Merges ordered documents into one through a [`DocumentCodec`].
#[derive(Debug, Clone, Default)]
pub struct Merger<C> {
    codec: C,
}

impl<C: DocumentCodec> Merger<C> {
    /// Create a merger driving `codec`.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// The codec used by this merger.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The name a merge started now would suggest for its artifact.
    pub fn suggested_name(&self, requested_name: Option<&str>) -> String {
        naming::suggested_name(
            requested_name,
            Local::now().date_naive(),
            self.codec.extension(),
        )
    }

    /// Merge `order` into a single document, named after today's local date
    /// unless `requested_name` has content.
    ///
    /// # Errors
    ///
    /// See [`merge_on`](Self::merge_on).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfstack::admission::AdmittedDocument;
    /// # use pdfstack::codec::PdfCodec;
    /// # use pdfstack::merge::Merger;
    /// # async fn example(order: Vec<AdmittedDocument>) -> pdfstack::Result<()> {
    /// let merger = Merger::new(PdfCodec::new());
    /// let result = merger.merge(&order, Some("report")).await?;
    /// println!("{} pages in {}",
    ///          result.statistics().total_pages,
    ///          result.suggested_name());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(
        &self,
        order: &[AdmittedDocument],
        requested_name: Option<&str>,
    ) -> Result<MergeResult> {
        self.merge_on(order, requested_name, Local::now().date_naive())
            .await
    }

    /// Merge `order` into a single document, using `today` for the default
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than [`MIN_DOCUMENTS`] documents are given
    /// - A document cannot be read ([`PdfStackError::ReadFailed`])
    /// - A document cannot be decoded or its pages copied
    ///   ([`PdfStackError::Decode`], naming the document)
    /// - The output cannot be assembled or serialized
    ///
    /// No partial result is produced on failure.
    pub async fn merge_on(
        &self,
        order: &[AdmittedDocument],
        requested_name: Option<&str>,
        today: NaiveDate,
    ) -> Result<MergeResult> {
        if order.len() < MIN_DOCUMENTS {
            return Err(PdfStackError::insufficient_input(MIN_DOCUMENTS, order.len()));
        }

        let merge_start = Instant::now();
        tracing::info!(documents = order.len(), "starting merge");

        let mut output = self
            .codec
            .create_empty()
            .map_err(|e| PdfStackError::merge_failed(format!("failed to create output: {e}")))?;

        let mut input_size = 0u64;
        let mut total_pages = 0usize;

        for document in order {
            let name = document.display_name();

            let bytes = document
                .source()
                .read()
                .await
                .map_err(|source| PdfStackError::ReadFailed {
                    name: name.to_string(),
                    source,
                })?;
            input_size += bytes.len() as u64;

            let source = self
                .codec
                .decode(&bytes)
                .map_err(|e| PdfStackError::decode(name, e.to_string()))?;

            let indices = self.codec.page_indices(&source);
            let pages = self
                .codec
                .copy_pages(&mut output, &source, &indices)
                .map_err(|e| PdfStackError::decode(name, e.to_string()))?;

            for page in pages {
                self.codec.append_page(&mut output, page).map_err(|e| {
                    PdfStackError::merge_failed(format!("failed to append page of '{name}': {e}"))
                })?;
                total_pages += 1;
            }

            tracing::debug!(name, pages = indices.len(), "appended document");
        }

        let artifact_bytes: Arc<[u8]> = self
            .codec
            .serialize(&mut output)
            .map_err(|e| PdfStackError::merge_failed(format!("failed to serialize output: {e}")))?
            .into();

        let statistics = MergeStatistics {
            files_merged: order.len(),
            total_pages,
            input_size,
            output_size: artifact_bytes.len() as u64,
            merge_time: merge_start.elapsed(),
        };

        tracing::info!(
            pages = statistics.total_pages,
            size = statistics.output_size,
            elapsed_ms = statistics.merge_time.as_millis() as u64,
            "merge complete"
        );

        Ok(MergeResult {
            artifact_bytes,
            suggested_name: naming::suggested_name(requested_name, today, self.codec.extension()),
            statistics,
        })
    }
}

//! Input admission.
//!
//! Raw inputs arrive from a file picker, a drag-and-drop gesture or the
//! command line, each carrying a declared media type. The [`AdmissionFilter`]
//! keeps only those whose media type matches the target document type and
//! turns them into [`AdmittedDocument`]s with freshly minted identities.
//!
//! Rejection is a filtering step, not an error: unsupported inputs are dropped
//! without surfacing anything to the user.
//!
//! # Examples
//!
//! ```
//! use pdfstack::admission::{AdmissionFilter, RawInput, PDF_MEDIA_TYPE};
//!
//! let filter = AdmissionFilter::pdf();
//! let admitted = filter.admit(vec![
//!     RawInput::from_bytes("a.pdf", PDF_MEDIA_TYPE, b"%PDF-1.7".to_vec()),
//!     RawInput::from_bytes("notes.txt", "text/plain", b"hello".to_vec()),
//! ]);
//! assert_eq!(admitted.len(), 1);
//! assert_eq!(admitted[0].display_name(), "a.pdf");
//! ```

pub mod identity;

pub use identity::DocumentId;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::{PdfStackError, Result};

/// Media type of PDF documents.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type declared for files whose type cannot be determined.
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Binary content backing an input.
///
/// Cloning is cheap: in-memory content is shared, file content is read lazily.
#[derive(Debug, Clone)]
pub enum SourceBlob {
    /// Content already held in memory.
    Memory(Arc<[u8]>),
    /// Content stored in a file, read on demand.
    File(PathBuf),
}

impl SourceBlob {
    /// Read the full content of the blob.
    ///
    /// This is a suspension point: file-backed blobs are read asynchronously.
    pub async fn read(&self) -> std::io::Result<Arc<[u8]>> {
        match self {
            Self::Memory(bytes) => Ok(Arc::clone(bytes)),
            Self::File(path) => Ok(tokio::fs::read(path).await?.into()),
        }
    }
}

impl From<Vec<u8>> for SourceBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Memory(bytes.into())
    }
}

/// A file-like input as delivered by the host's input surface.
#[derive(Debug, Clone)]
pub struct RawInput {
    /// Declared media type.
    pub media_type: String,
    /// Binary content.
    pub content: SourceBlob,
    /// File name shown to the user.
    pub name: String,
    /// Last modification time reported by the host.
    pub last_modified: SystemTime,
}

impl RawInput {
    /// Create an input from bytes held in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            media_type: media_type.into(),
            content: SourceBlob::from(bytes.into()),
            name: name.into(),
            last_modified: SystemTime::now(),
        }
    }

    /// Create an input from a file on disk.
    ///
    /// The media type is declared from the file extension and the content is
    /// not read until a merge needs it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a regular file.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfStackError::file_not_found(path.to_path_buf())
            } else {
                PdfStackError::Io { source: e }
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfStackError::not_a_file(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            media_type: media_type_for_path(path).to_string(),
            content: SourceBlob::File(path.to_path_buf()),
            name,
            last_modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        })
    }
}

/// Declare a media type from a file extension, the way a browser does.
pub fn media_type_for_path(path: &Path) -> &'static str {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => UNKNOWN_MEDIA_TYPE,
    }
}

/// A document that passed admission and is eligible for merging.
#[derive(Debug, Clone)]
pub struct AdmittedDocument {
    id: DocumentId,
    source: SourceBlob,
    display_name: String,
}

impl AdmittedDocument {
    /// Admit content under a new identity.
    pub fn new(display_name: impl Into<String>, source: SourceBlob) -> Self {
        Self {
            id: DocumentId::new(),
            source,
            display_name: display_name.into(),
        }
    }

    /// Identity of this document.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Binary content of this document.
    pub fn source(&self) -> &SourceBlob {
        &self.source
    }

    /// Name shown to the user.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Filter that admits inputs of a single media type.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    target: String,
}

impl AdmissionFilter {
    /// Create a filter admitting `target` media types only.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Create a filter admitting PDF documents.
    pub fn pdf() -> Self {
        Self::new(PDF_MEDIA_TYPE)
    }

    /// The media type this filter admits.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Check whether a candidate would be admitted.
    pub fn accepts(&self, candidate: &RawInput) -> bool {
        candidate.media_type == self.target
    }

    /// Admit the matching candidates, preserving their relative order.
    pub fn admit<I>(&self, candidates: I) -> Vec<AdmittedDocument>
    where
        I: IntoIterator<Item = RawInput>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                if self.accepts(&candidate) {
                    Some(AdmittedDocument::new(candidate.name, candidate.content))
                } else {
                    tracing::debug!(
                        name = %candidate.name,
                        media_type = %candidate.media_type,
                        "skipping input with unsupported media type"
                    );
                    None
                }
            })
            .collect()
    }
}

impl Default for AdmissionFilter {
    fn default() -> Self {
        Self::pdf()
    }
}

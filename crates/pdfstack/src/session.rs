//! The merge session.
//!
//! [`MergeSession`] is the surface a presentation layer talks to. It owns the
//! admission filter, the ordered collection, the merger and the live artifact,
//! and keeps them consistent: a failed merge leaves the collection and the
//! previous artifact exactly as they were, and records a single user-facing
//! message instead.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::admission::RawInput;
//! use pdfstack::codec::PdfCodec;
//! use pdfstack::session::MergeSession;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new(PdfCodec::new());
//! session.admit(vec![
//!     RawInput::from_path(Path::new("a.pdf")).await?,
//!     RawInput::from_path(Path::new("b.pdf")).await?,
//! ]);
//! session.move_to(1, 0)?;
//!
//! let handle = session.merge().await?;
//! println!("ready: {}", handle.uri());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::admission::{AdmissionFilter, AdmittedDocument, DocumentId, RawInput};
use crate::artifact::{ArtifactHandle, ArtifactManager};
use crate::codec::DocumentCodec;
use crate::collection::{DragSession, OrderedCollection};
use crate::error::{PdfStackError, Result};
use crate::merge::{MIN_DOCUMENTS, MergeStatistics, Merger};

/// Ordered collection, merge pipeline and artifact lifecycle for one user.
#[derive(Debug)]
pub struct MergeSession<C> {
    filter: AdmissionFilter,
    collection: OrderedCollection,
    merger: Merger<C>,
    artifacts: ArtifactManager,
    requested_name: String,
    last_error: Option<String>,
    drag: Option<DragSession>,
}

impl<C: DocumentCodec> MergeSession<C> {
    /// Create an empty session admitting the codec's media type.
    pub fn new(codec: C) -> Self {
        Self {
            filter: AdmissionFilter::new(codec.media_type()),
            collection: OrderedCollection::new(),
            merger: Merger::new(codec),
            artifacts: ArtifactManager::new(),
            requested_name: String::new(),
            last_error: None,
            drag: None,
        }
    }

    /// Admit raw inputs and append the accepted ones to the collection.
    ///
    /// Inputs of another media type are dropped silently. When anything is
    /// appended the current artifact no longer matches the collection, so it
    /// is revoked and the last error is cleared. Returns the number of
    /// documents appended.
    pub fn admit<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = RawInput>,
    {
        let admitted = self.filter.admit(inputs);
        let count = admitted.len();
        if count == 0 {
            return 0;
        }

        self.collection.append(admitted);
        self.artifacts.reset();
        self.last_error = None;

        tracing::debug!(count, total = self.collection.len(), "admitted documents");
        count
    }

    /// Remove the document with the given identity.
    pub fn remove(&mut self, id: &DocumentId) -> Option<AdmittedDocument> {
        let removed = self.collection.remove_by_identity(id);
        if removed.is_some() {
            self.drag = None;
        }
        removed
    }

    /// Move the document at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfStackError::InvalidMove`] if either index is out of
    /// bounds; nothing changes in that case.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        self.collection.move_to(from, to)
    }

    /// Start dragging the document at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfStackError::InvalidMove`] if `index` is out of bounds.
    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        if index >= self.collection.len() {
            return Err(PdfStackError::InvalidMove {
                index,
                len: self.collection.len(),
            });
        }
        self.drag = Some(DragSession::start(index));
        Ok(())
    }

    /// The dragged document is hovering over position `index`.
    ///
    /// Ignored when no drag is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`PdfStackError::InvalidMove`] if `index` is out of bounds.
    pub fn drag_over(&mut self, index: usize) -> Result<()> {
        match self.drag.as_mut() {
            Some(drag) => drag.enter(&mut self.collection, index),
            None => Ok(()),
        }
    }

    /// Finish the current drag, returning the final position of the dragged
    /// document.
    pub fn end_drag(&mut self) -> Option<usize> {
        self.drag.take().map(|drag| drag.index())
    }

    /// Set the base name for the next artifact. Blank means "use the date".
    pub fn set_requested_name(&mut self, name: impl Into<String>) {
        self.requested_name = name.into();
    }

    /// The base name requested for the next artifact, as entered.
    pub fn requested_name(&self) -> &str {
        &self.requested_name
    }

    /// The artifact name a merge would suggest right now.
    pub fn suggested_name(&self) -> String {
        self.merger.suggested_name(Some(&self.requested_name))
    }

    /// Merge the current order and publish the result.
    ///
    /// The merge works on a snapshot of the order taken when it starts. On
    /// success the previous artifact is revoked and the new one becomes
    /// current. On failure the collection and the previous artifact are left
    /// untouched and [`last_error`](Self::last_error) holds the message for
    /// the user.
    ///
    /// # Errors
    ///
    /// Returns the merge error; see [`Merger::merge_on`].
    pub async fn merge(&mut self) -> Result<ArtifactHandle> {
        let order = self.collection.snapshot();
        let requested_name = self.requested_name.as_str();

        match self.merger.merge(&order, Some(requested_name)).await {
            Ok(result) => {
                self.last_error = None;
                Ok(self.artifacts.publish(result))
            }
            Err(err) => {
                tracing::warn!(error = %err, "merge failed");
                self.last_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Return to the initial state: no artifact, documents, name or error.
    pub fn reset(&mut self) {
        self.artifacts.reset();
        self.collection.reset();
        self.requested_name.clear();
        self.last_error = None;
        self.drag = None;
    }

    /// The documents in merge order.
    pub fn current_order(&self) -> &[AdmittedDocument] {
        self.collection.current_order()
    }

    /// Handle of the live artifact, if any.
    pub fn current_artifact(&self) -> Option<&ArtifactHandle> {
        self.artifacts.current()
    }

    /// Bytes of `handle`, or `None` once it has been revoked.
    pub fn resolve_artifact(&self, handle: &ArtifactHandle) -> Option<Arc<[u8]>> {
        self.artifacts.resolve(handle)
    }

    /// Statistics of the merge that produced `handle`, while it is live.
    pub fn artifact_statistics(&self, handle: &ArtifactHandle) -> Option<&MergeStatistics> {
        self.artifacts.statistics(handle)
    }

    /// Revoke `handle`, releasing its bytes. Safe to repeat.
    pub fn revoke_artifact(&mut self, handle: &ArtifactHandle) -> bool {
        self.artifacts.revoke(handle)
    }

    /// Message describing why the last merge failed, if it did.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the collection holds enough documents to merge.
    pub fn can_merge(&self) -> bool {
        self.collection.len() >= MIN_DOCUMENTS
    }

    /// The codec used for merging.
    pub fn codec(&self) -> &C {
        self.merger.codec()
    }
}

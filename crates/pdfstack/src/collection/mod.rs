//! The ordered collection of admitted documents.
//!
//! [`OrderedCollection`] owns the sequence the user arranges. Its order at the
//! moment a merge starts is exactly the order the merge uses: every mutation is
//! synchronous and only the declared operations change it.
//!
//! # Examples
//!
//! ```
//! use pdfstack::admission::{AdmittedDocument, SourceBlob};
//! use pdfstack::collection::OrderedCollection;
//!
//! let mut collection = OrderedCollection::new();
//! collection.append(vec![
//!     AdmittedDocument::new("a.pdf", SourceBlob::from(Vec::new())),
//!     AdmittedDocument::new("b.pdf", SourceBlob::from(Vec::new())),
//! ]);
//!
//! collection.move_to(1, 0).unwrap();
//! let names: Vec<_> = collection.current_order().iter().map(|d| d.display_name()).collect();
//! assert_eq!(names, ["b.pdf", "a.pdf"]);
//! ```

pub mod reorder;

pub use reorder::DragSession;

use crate::admission::{AdmittedDocument, DocumentId};
use crate::error::{PdfStackError, Result};

/// User-arranged sequence of admitted documents with unique identities.
#[derive(Debug, Clone, Default)]
pub struct OrderedCollection {
    documents: Vec<AdmittedDocument>,
}

impl OrderedCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents to the end, preserving their incoming order.
    ///
    /// A document whose identity is already present is ignored.
    pub fn append<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = AdmittedDocument>,
    {
        for document in documents {
            if self.position(&document.id()).is_some() {
                tracing::warn!(id = %document.id(), "ignoring document already in collection");
                continue;
            }
            self.documents.push(document);
        }
    }

    /// Remove the document with the given identity.
    ///
    /// Returns the removed document, or `None` when no document matches. The
    /// remaining documents keep their relative order.
    pub fn remove_by_identity(&mut self, id: &DocumentId) -> Option<AdmittedDocument> {
        let index = self.position(id)?;
        Some(self.documents.remove(index))
    }

    /// Move the document at `from` to `to`, shifting the documents in between.
    ///
    /// `move_to(i, i)` leaves the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PdfStackError::InvalidMove`] if either index is out of bounds;
    /// the collection is not modified in that case.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.documents.len();
        for index in [from, to] {
            if index >= len {
                return Err(PdfStackError::InvalidMove { index, len });
            }
        }

        if from != to {
            let document = self.documents.remove(from);
            self.documents.insert(to, document);
        }

        Ok(())
    }

    /// Remove every document.
    pub fn reset(&mut self) {
        self.documents.clear();
    }

    /// The current order.
    pub fn current_order(&self) -> &[AdmittedDocument] {
        &self.documents
    }

    /// An owned copy of the current order.
    pub fn snapshot(&self) -> Vec<AdmittedDocument> {
        self.documents.clone()
    }

    /// Document at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&AdmittedDocument> {
        self.documents.get(index)
    }

    /// Current position of the document with the given identity.
    pub fn position(&self, id: &DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id() == *id)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

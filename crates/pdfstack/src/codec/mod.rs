//! The document codec seam.
//!
//! The merge pipeline never touches the binary document format itself. It
//! drives a [`DocumentCodec`], which knows how to decode inputs, copy their
//! pages into an output document and serialize the result. [`PdfCodec`] is the
//! `lopdf`-backed implementation used for PDF files.

pub mod pdf;

pub use pdf::{CopiedPage, PdfCodec};

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Failures reported by a codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The bytes are not a valid document of the codec's type.
    #[error("{0}")]
    Malformed(String),

    /// The document decoded but its structure cannot be used.
    #[error("{0}")]
    Structure(String),

    /// The output document could not be serialized.
    #[error("{0}")]
    Serialize(String),
}

/// Capability to decode, assemble and encode one document format.
pub trait DocumentCodec {
    /// A decoded or in-construction document.
    type Document;

    /// A page copied into a target document, ready to be appended to it.
    type Page;

    /// Media type of the documents this codec handles.
    fn media_type(&self) -> &'static str;

    /// File extension of the documents this codec handles, without the dot.
    fn extension(&self) -> &'static str;

    /// Create a new document without pages.
    fn create_empty(&self) -> CodecResult<Self::Document>;

    /// Decode a document from its binary form.
    fn decode(&self, bytes: &[u8]) -> CodecResult<Self::Document>;

    /// Indices of every page of `doc`, in document order.
    fn page_indices(&self, doc: &Self::Document) -> Vec<usize>;

    /// Copy the pages at `indices` of `source` into `target`.
    ///
    /// The returned pages belong to `target` but are not part of its page
    /// sequence until passed to [`append_page`](Self::append_page).
    fn copy_pages(
        &self,
        target: &mut Self::Document,
        source: &Self::Document,
        indices: &[usize],
    ) -> CodecResult<Vec<Self::Page>>;

    /// Append a copied page to the end of `target`'s page sequence.
    fn append_page(&self, target: &mut Self::Document, page: Self::Page) -> CodecResult<()>;

    /// Encode `doc` into its binary form.
    fn serialize(&self, doc: &mut Self::Document) -> CodecResult<Vec<u8>>;
}

//! PDF codec backed by `lopdf`.
//!
//! Pages are copied by renumbering a clone of the source document above the
//! target's highest object id and pulling every object the page references
//! into the target. Attributes a page inherits from its page tree are written
//! onto the page itself before the link to the source tree is dropped, so the
//! copy renders the same once it hangs off the output's page tree.

use lopdf::{Document, Object, ObjectId, dictionary};

use super::{CodecError, CodecResult, DocumentCodec};
use crate::admission::PDF_MEDIA_TYPE;
use crate::config::{CompressionLevel, Metadata};
use crate::merge::metadata::MetadataManager;
use crate::utils::copy_references;

/// PDF version written for merged documents.
const OUTPUT_VERSION: &str = "1.7";

/// Page attributes that may be inherited from ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed page trees.
const MAX_TREE_DEPTH: usize = 64;

/// A page copied into a target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedPage {
    id: ObjectId,
}

impl CopiedPage {
    /// Object id of the page inside the target document.
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

/// `lopdf` implementation of [`DocumentCodec`].
#[derive(Debug, Clone, Default)]
pub struct PdfCodec {
    compression: CompressionLevel,
    metadata: Metadata,
}

impl PdfCodec {
    /// Create a codec with standard compression and no extra metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression applied when serializing.
    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    /// Set the document information written when serializing.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Compression applied when serializing.
    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }
}

impl DocumentCodec for PdfCodec {
    type Document = Document;
    type Page = CopiedPage;

    fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn create_empty(&self) -> CodecResult<Document> {
        let mut doc = Document::with_version(OUTPUT_VERSION);

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<Document> {
        Document::load_mem(bytes).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                CodecError::Malformed(format!("document is encrypted: {err_msg}"))
            } else {
                CodecError::Malformed(err_msg)
            }
        })
    }

    fn page_indices(&self, doc: &Document) -> Vec<usize> {
        (0..doc.get_pages().len()).collect()
    }

    fn copy_pages(
        &self,
        target: &mut Document,
        source: &Document,
        indices: &[usize],
    ) -> CodecResult<Vec<CopiedPage>> {
        let mut renumbered = source.clone();
        renumbered.renumber_objects_with(target.max_id + 1);

        let page_ids: Vec<ObjectId> = renumbered.get_pages().into_values().collect();
        let mut copied = Vec::with_capacity(indices.len());

        for &index in indices {
            let page_id = *page_ids.get(index).ok_or_else(|| {
                CodecError::Structure(format!(
                    "page {} does not exist (document has {})",
                    index + 1,
                    page_ids.len()
                ))
            })?;

            let mut page = renumbered
                .get_dictionary(page_id)
                .map_err(|e| CodecError::Structure(format!("failed to get page: {e}")))?
                .clone();

            for key in INHERITABLE_KEYS {
                if !page.has(key)
                    && let Some(value) = inherited_attribute(&renumbered, page_id, key)
                {
                    page.set(key, value);
                }
            }
            page.remove(b"Parent");

            // Insert the page first so back-references (e.g. /P in
            // annotations) resolve to the copy instead of the source page.
            let page = Object::Dictionary(page);
            target.objects.insert(page_id, page.clone());
            copy_references(target, &renumbered, &page);

            copied.push(CopiedPage { id: page_id });
        }

        target.max_id = target.max_id.max(renumbered.max_id);

        Ok(copied)
    }

    fn append_page(&self, target: &mut Document, page: CopiedPage) -> CodecResult<()> {
        let pages_id = page_tree_root(target)?;

        target
            .get_dictionary_mut(page.id)
            .map_err(|e| CodecError::Structure(format!("copied page is missing: {e}")))?
            .set("Parent", pages_id);

        let pages = target
            .get_dictionary_mut(pages_id)
            .map_err(|e| CodecError::Structure(format!("failed to get pages object: {e}")))?;

        pages
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|_| CodecError::Structure("pages dictionary missing Kids array".into()))?
            .push(Object::Reference(page.id));

        let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", count + 1);

        Ok(())
    }

    fn serialize(&self, doc: &mut Document) -> CodecResult<Vec<u8>> {
        MetadataManager::new()
            .set_metadata(doc, &self.metadata)
            .map_err(|e| CodecError::Serialize(e.to_string()))?;

        match self.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => {
                doc.compress();
            }
            CompressionLevel::Maximum => {
                doc.prune_objects();
                doc.compress();
            }
        }
        doc.renumber_objects();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| CodecError::Serialize(e.to_string()))?;

        Ok(buffer)
    }
}

/// Object id of the root of a document's page tree.
fn page_tree_root(doc: &Document) -> CodecResult<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| CodecError::Structure(format!("failed to get pages reference: {e}")))
}

/// Look up `key` on the ancestors of `page_id`, nearest first.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut parent = doc
        .get_dictionary(page_id)
        .ok()?
        .get(b"Parent")
        .and_then(Object::as_reference)
        .ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

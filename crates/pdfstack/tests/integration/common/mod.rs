//! Shared helpers for the integration tests.
//!
//! Test documents are built in memory with `lopdf`. Every page carries a
//! distinct MediaBox width so the order of pages in a merged document can be
//! read back without rendering anything.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pdfstack::admission::{PDF_MEDIA_TYPE, RawInput};
use std::path::{Path, PathBuf};

/// Height shared by every test page.
pub const PAGE_HEIGHT: i64 = 792;

fn catalog(doc: &mut Document, pages_id: ObjectId) {
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
}

fn font(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    })
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("failed to serialize test PDF");
    bytes
}

/// A PDF with one page per entry of `widths`, in order.
///
/// Each page has its own content stream and shares one font resource.
pub fn pdf_with_pages(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = font(&mut doc);

    let mut kids: Vec<Object> = Vec::new();
    for (index, width) in widths.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 720 Td (page {}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), (*width).into(), PAGE_HEIGHT.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }
        .into(),
    );
    catalog(&mut doc, pages_id);

    save(doc)
}

/// A single-page PDF whose page inherits MediaBox and Resources from an
/// intermediate node of the page tree.
pub fn pdf_with_inherited_attributes(width: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let node_id = doc.new_object_id();
    let font_id = font(&mut doc);

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => node_id,
    });

    doc.objects.insert(
        node_id,
        dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        }
        .into(),
    );
    doc.objects.insert(
        root_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![node_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), PAGE_HEIGHT.into()],
        }
        .into(),
    );
    catalog(&mut doc, root_id);

    save(doc)
}

/// A two-page PDF whose first page carries a link to the second.
pub fn pdf_with_internal_link(first_width: i64, second_width: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let second_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), second_width.into(), PAGE_HEIGHT.into()],
    });
    let link_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![0.into(), 0.into(), 100.into(), 20.into()],
        "Dest" => vec![second_id.into(), "Fit".into()],
    });
    let first_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), first_width.into(), PAGE_HEIGHT.into()],
        "Annots" => vec![link_id.into()],
    });

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![first_id.into(), second_id.into()],
            "Count" => 2,
        }
        .into(),
    );
    catalog(&mut doc, pages_id);

    save(doc)
}

/// Number of `/Type /Pages` nodes stored in `bytes`, reachable or not.
pub fn page_tree_nodes(bytes: &[u8]) -> usize {
    let doc = Document::load_mem(bytes).expect("merged output is not a valid PDF");
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| {
            dict.get(b"Type")
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Pages")
        })
        .count()
}

/// A valid PDF without any page.
pub fn pdf_without_pages() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    catalog(&mut doc, pages_id);

    save(doc)
}

/// An in-memory PDF input.
pub fn pdf_input(name: &str, bytes: Vec<u8>) -> RawInput {
    RawInput::from_bytes(name, PDF_MEDIA_TYPE, bytes)
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write test file");
    path
}

/// MediaBox widths of the pages of `bytes`, in page order.
pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
    let doc = Document::load_mem(bytes).expect("merged output is not a valid PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_dictionary(page_id).expect("page is not a dictionary");
            let media_box = page
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .expect("page has no MediaBox");
            media_box[2].as_i64().expect("MediaBox width is not an integer")
        })
        .collect()
}

/// Whether every page of `bytes` can reach its `F1` font.
pub fn every_page_has_font(bytes: &[u8]) -> bool {
    let doc = Document::load_mem(bytes).expect("merged output is not a valid PDF");
    doc.get_pages().into_values().all(|page_id| {
        doc.get_dictionary(page_id)
            .and_then(|page| page.get(b"Resources"))
            .and_then(|resources| match resources {
                Object::Reference(id) => doc.get_dictionary(*id),
                other => other.as_dict(),
            })
            .and_then(|resources| resources.get(b"Font"))
            .and_then(Object::as_dict)
            .and_then(|fonts| fonts.get(b"F1"))
            .and_then(Object::as_reference)
            .and_then(|font_id| doc.get_dictionary(font_id))
            .is_ok()
    })
}

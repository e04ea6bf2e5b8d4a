//! PDF document information management.
//!
//! Every merged document is stamped with a producer, a creator and creation
//! and modification dates. Title, author, subject and keywords are only written
//! when configured.

use crate::config::Metadata;
use crate::error::{PdfStackError, Result};
use chrono::{DateTime, Local, Offset, TimeZone};
use lopdf::{Dictionary, Document, Object, StringFormat};
use std::fmt;

/// Name written to the `Producer` and `Creator` entries.
const PRODUCER: &str = concat!("pdfstack ", env!("CARGO_PKG_VERSION"));

/// Manager for the PDF `Info` dictionary.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Stamp `doc` with `metadata` and the current local time.
    ///
    /// # Errors
    ///
    /// Returns an error if the `Info` dictionary cannot be created.
    pub fn set_metadata(&self, doc: &mut Document, metadata: &Metadata) -> Result<()> {
        self.set_metadata_at(doc, metadata, Local::now())
    }

    /// Stamp `doc` with `metadata`, dated `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `Info` dictionary cannot be created.
    pub fn set_metadata_at<Tz: TimeZone>(
        &self,
        doc: &mut Document,
        metadata: &Metadata,
        now: DateTime<Tz>,
    ) -> Result<()>
    where
        Tz::Offset: fmt::Display,
    {
        let info_dict = info_dictionary_mut(doc)?;

        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                info_dict.set(key, text(value));
            }
        }

        info_dict.set("Creator", text(PRODUCER));
        info_dict.set("Producer", text(PRODUCER));

        let date = format_pdf_date(&now);
        info_dict.set("CreationDate", text(&date));
        info_dict.set("ModDate", text(&date));

        Ok(())
    }

    /// Read the descriptive fields back from a document.
    pub fn get_metadata(&self, doc: &Document) -> Metadata {
        let Some(info_dict) = doc
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok()
        else {
            return Metadata::default();
        };

        Metadata::new(
            string_field(info_dict, b"Title"),
            string_field(info_dict, b"Author"),
            string_field(info_dict, b"Subject"),
            string_field(info_dict, b"Keywords"),
        )
    }
}

/// The `Info` dictionary of `doc`, created when missing.
fn info_dictionary_mut(doc: &mut Document) -> Result<&mut Dictionary> {
    let existing = doc
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok()
        .filter(|id| doc.get_dictionary(*id).is_ok());

    let info_id = match existing {
        Some(id) => id,
        None => {
            let id = doc.add_object(Dictionary::new());
            doc.trailer.set("Info", Object::Reference(id));
            id
        }
    };

    doc.get_dictionary_mut(info_id)
        .map_err(|e| PdfStackError::merge_failed(format!("failed to create Info dictionary: {e}")))
}

fn text(value: &str) -> Object {
    Object::String(value.as_bytes().to_vec(), StringFormat::Literal)
}

fn string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Format a timestamp as a PDF date: `D:YYYYMMDDHHmmSS+HH'mm'`.
fn format_pdf_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let offset_secs = time.offset().fix().local_minus_utc();
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let offset_mins = offset_secs.abs() / 60;

    format!(
        "D:{}{sign}{:02}'{:02}'",
        time.format("%Y%m%d%H%M%S"),
        offset_mins / 60,
        offset_mins % 60
    )
}

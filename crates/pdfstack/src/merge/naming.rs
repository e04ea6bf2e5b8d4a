//! Artifact naming.

use chrono::NaiveDate;

/// Base name used when no name was requested: the date as `YYYYMMDD`.
pub fn date_basename(today: NaiveDate) -> String {
    today.format("%Y%m%d").to_string()
}

/// Name suggested for a merged artifact.
///
/// The requested name is trimmed and used verbatim; when it is missing or
/// blank the date of `today` is used instead. The codec's `extension` is
/// always appended.
pub fn suggested_name(requested: Option<&str>, today: NaiveDate, extension: &str) -> String {
    let base = match requested.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => date_basename(today),
    };

    format!("{base}.{extension}")
}

//! Utilities for path collection, object graph copying and size formatting.

use crate::error::{PdfStackError, Result};
use lopdf::{Dictionary, Document, Object};
use std::path::PathBuf;

/// Expand glob patterns into filesystem paths.
///
/// Arguments without glob metacharacters are passed through untouched, so a
/// missing file is reported later with its own name rather than silently
/// expanding to nothing. Matches of one pattern are returned sorted, and
/// patterns keep the order they were given in.
///
/// # Errors
///
/// Returns an error if a pattern is malformed or a match cannot be read.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if is_glob_pattern(pattern) {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

fn is_glob_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| {
        PdfStackError::invalid_config(format!("Invalid glob pattern '{pattern}': {err}"))
    })?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfStackError::other(err.to_string()))?;
        resolved_paths.push(path);
    }
    resolved_paths.sort();

    Ok(resolved_paths)
}

/// Copy the objects reachable from `obj` out of `source` into `target`.
///
/// Walks references recursively and inserts every object `target` does not
/// have yet. Object ids are kept, so the caller must make sure the id ranges
/// of both documents do not collide.
///
/// Pages reached through other objects (link destinations, annotation `/P`
/// entries) are copied without their `Parent`, so the source page tree never
/// follows them into `target`.
pub fn copy_references(target: &mut Document, source: &Document, obj: &Object) {
    match obj {
        Object::Reference(ref_id) => {
            if !target.objects.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                let mut copied = referenced_obj.clone();
                if let Object::Dictionary(dict) = &mut copied
                    && is_page(dict)
                {
                    dict.remove(b"Parent");
                }
                target.objects.insert(*ref_id, copied.clone());
                copy_references(target, source, &copied);
            }
        }
        Object::Dictionary(dict) => {
            let skip_parent = is_page(dict);
            for (key, value) in dict.iter() {
                if skip_parent && key.as_slice() == b"Parent" {
                    continue;
                }
                copy_references(target, source, value);
            }
        }
        Object::Array(arr) => {
            for item in arr {
                copy_references(target, source, item);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                copy_references(target, source, value);
            }
        }
        _ => {}
    }
}

fn is_page(dict: &Dictionary) -> bool {
    dict.get(b"Type")
        .and_then(Object::as_name)
        .is_ok_and(|name| name == b"Page")
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

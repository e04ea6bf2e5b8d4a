//! Configuration module for pdfstack.
//!
//! This module holds the validated, normalized configuration that drives a
//! stacking run. It handles:
//! - Validation of option combinations
//! - Parsing of reorder commands
//! - Application of defaults
//! - Resolution of the output path from the suggested artifact name

use crate::error::{PdfStackError, Result};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::str::FromStr;

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact quality and structure.
    None,
    /// Balanced compression - good trade-off between size and processing time.
    #[default]
    Standard,
    /// Maximum compression - smallest file size, longer processing time.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfStackError;

    /// Parse compression level from "none", "standard", or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfStackError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// A single reorder command: move the document at `from` to `to`.
///
/// Parsed from the 1-based `FROM:TO` form used on the command line and stored
/// zero-based, the way [`OrderedCollection::move_to`] expects it.
///
/// [`OrderedCollection::move_to`]: crate::collection::OrderedCollection::move_to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderCommand {
    /// Zero-based position of the document to move.
    pub from: usize,
    /// Zero-based destination position.
    pub to: usize,
}

impl FromStr for ReorderCommand {
    type Err = PdfStackError;

    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s.split_once(':').ok_or_else(|| {
            PdfStackError::invalid_config(format!(
                "Invalid move: {s}. Expected format like '3:1'"
            ))
        })?;

        Ok(Self {
            from: parse_position(from)?,
            to: parse_position(to)?,
        })
    }
}

/// Parse a 1-based position into a zero-based index.
pub fn parse_position(s: &str) -> Result<usize> {
    let position: usize = s
        .trim()
        .parse()
        .map_err(|_| PdfStackError::invalid_config(format!("Invalid position: {s}")))?;

    if position == 0 {
        return Err(PdfStackError::invalid_config(
            "Positions must be positive (1-indexed)",
        ));
    }

    Ok(position - 1)
}

/// PDF metadata to set on the output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject.
    pub subject: Option<String>,
    /// Document keywords (comma-separated).
    pub keywords: Option<String>,
}

impl Metadata {
    /// Check if any metadata fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }

    /// Create metadata from optional strings, trimming whitespace.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        subject: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        let to_string_opt = |opt: Option<String>| {
            opt.filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
        };

        Self {
            title: to_string_opt(title),
            author: to_string_opt(author),
            subject: to_string_opt(subject),
            keywords: to_string_opt(keywords),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a stacking run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input file paths, in admission order.
    pub inputs: Vec<PathBuf>,

    /// Output file or directory. `None` writes into the current directory.
    pub output: Option<PathBuf>,

    /// Requested base name for the artifact.
    pub name: Option<String>,

    /// Zero-based positions to remove, applied before any reorder.
    pub removals: Vec<usize>,

    /// Reorder commands, applied in the order given.
    pub moves: Vec<ReorderCommand>,

    /// Dry run mode - show the final order without merging.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON report instead of human-readable text.
    pub json: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Metadata to set on output document.
    pub metadata: Metadata,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// The requested name, if it has any content once trimmed.
    pub fn requested_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The requested name contains a path separator
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfStackError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(PdfStackError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if let Some(name) = self.requested_name()
            && (name.contains('/') || name.contains(MAIN_SEPARATOR))
        {
            return Err(PdfStackError::invalid_config(format!(
                "Output name must not contain path separators: {name}"
            )));
        }

        if let Some(output) = &self.output
            && self.inputs.iter().any(|input| input == output)
        {
            return Err(PdfStackError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                output.display()
            )));
        }

        Ok(())
    }

    /// Pick the path the artifact is written to.
    ///
    /// An explicit output that is an existing directory (or ends with a path
    /// separator) receives the suggested name; any other explicit output is
    /// used as-is. Without an output the suggested name lands in `cwd`.
    pub fn resolve_output(&self, cwd: &Path, suggested_name: &str) -> PathBuf {
        match &self.output {
            None => cwd.join(suggested_name),
            Some(output) if is_directory_like(output) => output.join(suggested_name),
            Some(output) => output.clone(),
        }
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        (!self.quiet || self.dry_run) && !self.json
    }
}

fn is_directory_like(path: &Path) -> bool {
    let raw = path.as_os_str().to_string_lossy();
    path.is_dir() || raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR)
}

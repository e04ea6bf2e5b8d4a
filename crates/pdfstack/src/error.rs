//! Error types for pdfstack.
//!
//! Every fallible operation in the crate returns [`PdfStackError`]. Errors are
//! grouped by where they originate:
//!
//! - **Input errors**: missing files, unreadable input lists
//! - **Document errors**: inputs the codec cannot decode
//! - **Merge errors**: too few documents, output assembly failures
//! - **Output errors**: the artifact cannot be written
//!
//! Merge failures are surfaced to users as a single sentence through
//! [`PdfStackError::user_message`].

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfstack operations.
pub type Result<T> = std::result::Result<T, PdfStackError>;

/// Main error type for pdfstack operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfStackError {
    /// A merge was requested with fewer documents than required.
    #[error("At least {required} documents are required to merge, got {actual}")]
    InsufficientInput {
        /// Minimum number of documents for a merge.
        required: usize,
        /// Number of documents in the collection.
        actual: usize,
    },

    /// An input could not be decoded as a document of the target type.
    #[error("Failed to decode document: {name}\n  Reason: {reason}")]
    Decode {
        /// Display name of the offending document.
        name: String,
        /// Reason reported by the codec.
        reason: String,
    },

    /// The contents of an admitted document could not be read.
    #[error("Failed to read document: {name}\n  Reason: {source}")]
    ReadFailed {
        /// Display name of the document.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A reorder referenced a position outside the collection.
    #[error("Invalid move: position {index} is out of bounds for {len} document(s)")]
    InvalidMove {
        /// The offending zero-based index.
        index: usize,
        /// Number of documents in the collection.
        len: usize,
    },

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Input list file contains an invalid entry.
    #[error(
        "Invalid entry in input list file: {} at line {line_number}\n  Details: {details}",
        .path.display()
    )]
    InvalidInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Line number with the error.
        line_number: usize,
        /// Details about what's invalid.
        details: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Building or serializing the output document failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfStackError {
    /// Create an InsufficientInput error for a collection of `actual` documents.
    pub fn insufficient_input(required: usize, actual: usize) -> Self {
        Self::InsufficientInput { required, actual }
    }

    /// Create a Decode error.
    pub fn decode(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// The single sentence shown to a user when this error ends an operation.
    ///
    /// Merge failures name the document the user has to remove or replace;
    /// everything else falls back to the full error text.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientInput { required, .. } => {
                format!("Select at least {required} PDF files to merge.")
            }
            Self::Decode { name, .. } => format!(
                "An error occurred while merging: '{name}' is not a valid PDF. \
                 Remove or replace it and try again."
            ),
            Self::ReadFailed { name, .. } => format!(
                "An error occurred while merging: '{name}' could not be read. \
                 Remove or replace it and try again."
            ),
            Self::MergeFailed { .. } => {
                "An error occurred while merging. Make sure every file is a valid PDF.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InsufficientInput { .. } => 1,
            Self::InvalidMove { .. } => 1,
            Self::InvalidInputList { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::Other { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadInputList { .. } => 2,
            Self::ReadFailed { .. } => 2,
            Self::Decode { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}

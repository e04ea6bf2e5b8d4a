//! pdfstack - Arrange PDF files in order and merge them into one document.
//!
//! This library manages a user-ordered collection of documents and merges it
//! into a single artifact. It provides:
//!
//! - Admission of raw inputs filtered by media type
//! - An ordered collection with removal, reordering and drag tracking
//! - Strictly sequential, order-preserving merging over a codec seam
//! - A single live output artifact with a suggested file name
//! - Comprehensive error handling with user-facing messages
//!
//! # Examples
//!
//! ## Session
//!
//! ```no_run
//! use pdfstack::admission::RawInput;
//! use pdfstack::codec::PdfCodec;
//! use pdfstack::io::ArtifactWriter;
//! use pdfstack::session::MergeSession;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = MergeSession::new(PdfCodec::new());
//! session.admit(vec![
//!     RawInput::from_path(Path::new("a.pdf")).await?,
//!     RawInput::from_path(Path::new("b.pdf")).await?,
//! ]);
//! session.set_requested_name("combined");
//!
//! let handle = session.merge().await?;
//! if let Some(bytes) = session.resolve_artifact(&handle) {
//!     ArtifactWriter::new()
//!         .write(bytes, Path::new(handle.suggested_name()))
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfstack::admission::{AdmissionFilter, RawInput};
//! use pdfstack::codec::PdfCodec;
//! use pdfstack::collection::OrderedCollection;
//! use pdfstack::merge::Merger;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut collection = OrderedCollection::new();
//! collection.append(AdmissionFilter::pdf().admit(vec![
//!     RawInput::from_path(Path::new("a.pdf")).await?,
//!     RawInput::from_path(Path::new("b.pdf")).await?,
//! ]));
//! collection.move_to(1, 0)?;
//!
//! let result = Merger::new(PdfCodec::new())
//!     .merge(&collection.snapshot(), None)
//!     .await?;
//! println!("{} -> {}", result.statistics().total_pages, result.suggested_name());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod admission;
pub mod artifact;
pub mod codec;
pub mod collection;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfStackError, Result};
pub use session::MergeSession;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Merge orchestration.
//!
//! This module turns an ordered list of admitted documents into one document:
//! - Strictly sequential, order-preserving page concatenation
//! - Artifact naming from a requested name or the current date
//! - Document information stamping for PDF output
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::admission::{AdmissionFilter, RawInput};
//! use pdfstack::codec::PdfCodec;
//! use pdfstack::merge::Merger;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![
//!     RawInput::from_path(Path::new("a.pdf")).await?,
//!     RawInput::from_path(Path::new("b.pdf")).await?,
//! ];
//! let order = AdmissionFilter::pdf().admit(inputs);
//!
//! let merger = Merger::new(PdfCodec::new());
//! let result = merger.merge(&order, None).await?;
//! println!("Merged {} pages", result.statistics().total_pages);
//! # Ok(())
//! # }
//! ```

pub mod merger;
pub mod metadata;
pub mod naming;

pub use merger::{MIN_DOCUMENTS, MergeResult, MergeStatistics, Merger};
pub use metadata::MetadataManager;

//! File I/O for pdfstack.
//!
//! Inputs are read lazily through [`SourceBlob`](crate::admission::SourceBlob);
//! this module covers the other direction, exporting artifacts to disk.

pub mod writer;

pub use writer::{ArtifactWriter, WriteStatistics};

//! Output formatting and display for pdfstack.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The merge order listing
//! - Summary reports, human-readable or JSON
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::output::OutputFormatter;
//! use pdfstack::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod report;

pub use formatter::{MessageLevel, OutputFormatter, Verbosity};
pub use report::MergeReport;

use crate::admission::AdmittedDocument;
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;

/// Display the documents in the order they will be merged.
pub fn display_order(formatter: &OutputFormatter, order: &[AdmittedDocument]) {
    formatter.section(&format!("Merge order ({} files):", order.len()));
    for (index, document) in order.iter().enumerate() {
        formatter.list_item(index + 1, document.display_name());
        formatter.detail("id", &document.id().to_string());
    }
}

/// Display the final summary after a successful merge and write.
pub fn display_summary(
    formatter: &OutputFormatter,
    merge_stats: &MergeStatistics,
    write_stats: &WriteStatistics,
) {
    formatter.blank_line();
    formatter.success(&format!(
        "Merged {} files ({} pages) into {}",
        merge_stats.files_merged,
        merge_stats.total_pages,
        write_stats.output_path.display()
    ));

    formatter.detail("Input size", &merge_stats.format_input_size());
    formatter.detail("Output size", &write_stats.format_file_size());
    formatter.detail("Merge time", &format!("{:.2?}", merge_stats.merge_time));
    formatter.detail("Write time", &format!("{:.2?}", write_stats.write_time));
}

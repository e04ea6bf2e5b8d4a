//! CLI argument parsing for pdfstack.
//!
//! This module defines the command-line interface structure using `clap`.
//! File arguments stand in for a file picker, `--remove` and `--move` stand in
//! for list editing and drag-reordering.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pdfstack::config::{CompressionLevel, Config, Metadata, OverwriteMode, ReorderCommand};
use pdfstack::error::{PdfStackError, Result};
use pdfstack::utils::collect_paths_for_patterns;

/// Arrange PDF files in any order and stack them into a single document.
///
/// Inputs are admitted in the order given. Anything that is not a PDF is
/// skipped. Documents can then be removed or moved before merging, and the
/// result is written next to the current directory under a name derived from
/// `--name` or today's date.
#[derive(Parser, Debug)]
#[command(name = "pdfstack")]
#[command(version)]
#[command(about = "Arrange PDF files in any order and stack them into one", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input files or glob patterns, in admission order
    ///
    /// Matches of a single pattern are sorted by path. Files that are not
    /// PDFs (by extension) are skipped.
    ///
    /// Examples:
    ///   pdfstack cover.pdf chapter*.pdf appendix.pdf
    ///   pdfstack scans/*.pdf --name archive
    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Read more inputs from a file (one path per line, '#' for comments)
    ///
    /// Paths from the list are appended after direct inputs.
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Output file or directory
    ///
    /// A directory (existing, or ending with a separator) receives the
    /// suggested name. Defaults to the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Base name for the merged file, without extension
    ///
    /// The extension is always appended. Defaults to today's date as
    /// YYYYMMDD.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Remove the document at position N before merging (1-indexed)
    ///
    /// Positions refer to the admitted list. Removals happen before moves.
    #[arg(short, long = "remove", value_name = "N")]
    pub removals: Vec<usize>,

    /// Move the document at position FROM to position TO (1-indexed)
    ///
    /// May be repeated; moves are applied in the order given.
    ///
    /// Examples:
    ///   --move 3:1          # bring the third document to the front
    ///   --move 1:2 --move 4:3
    #[arg(short, long = "move", value_name = "FROM:TO")]
    pub moves: Vec<String>,

    /// Compression level for output PDF
    ///
    /// - none: No compression
    /// - standard: Compress streams (default)
    /// - maximum: Compress streams and drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(env = "PDFSTACK_COMPRESSION")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Set title metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Set author metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub author: Option<String>,

    /// Set subject metadata for output PDF
    #[arg(long, value_name = "TEXT")]
    pub subject: Option<String>,

    /// Set keywords metadata for output PDF (comma-separated)
    #[arg(long, value_name = "TEXT")]
    pub keywords: Option<String>,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Show the final order and output name without merging
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show document ids and detailed statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON report to stdout instead of human-readable output
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// `inputs` are the expanded input paths, see
    /// [`get_all_inputs`](Self::get_all_inputs).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is invalid
    /// - A removal position or move command is malformed
    /// - Configuration validation fails
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let removals = self
            .removals
            .iter()
            .map(|&position| {
                position.checked_sub(1).ok_or_else(|| {
                    PdfStackError::invalid_config("Positions must be positive (1-indexed)")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let moves = self
            .moves
            .iter()
            .map(|command| ReorderCommand::from_str(command))
            .collect::<Result<Vec<_>>>()?;

        let metadata = Metadata::new(
            self.title.clone(),
            self.author.clone(),
            self.subject.clone(),
            self.keywords.clone(),
        );

        let config = Config {
            inputs,
            output: self.output.clone(),
            name: self.name.clone(),
            removals,
            moves,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            overwrite_mode,
            compression,
            metadata,
        };

        config.validate().map_err(|e| {
            PdfStackError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to read inputs from, or the
    /// compression level is unknown.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.input_list.is_none() {
            return Err(PdfStackError::invalid_config("No input files specified"));
        }

        if !["none", "standard", "maximum"].contains(&self.compression.as_str()) {
            return Err(PdfStackError::invalid_config(format!(
                "Invalid compression level: {}",
                self.compression
            )));
        }

        Ok(())
    }

    /// Get all input paths: expanded patterns followed by the input list.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed, the input list cannot be
    /// read, or no input remains.
    pub async fn get_all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = collect_paths_for_patterns(&self.inputs)?;

        if let Some(ref input_list_path) = self.input_list {
            let additional_inputs = read_input_list(input_list_path).await?;
            all_inputs.extend(additional_inputs);
        }

        if all_inputs.is_empty() {
            return Err(PdfStackError::invalid_config(
                "No input files matched the given arguments",
            ));
        }

        Ok(all_inputs)
    }
}

/// Read input paths from a file, one per line.
///
/// Lines starting with '#' are comments. Empty lines are skipped.
async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    use tokio::fs::File;
    use tokio::io::{AsyncBufReadExt, BufReader};

    let file = File::open(path)
        .await
        .map_err(|e| PdfStackError::FailedToReadInputList {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut lines = BufReader::new(file).lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) =
        lines
            .next_line()
            .await
            .map_err(|e| PdfStackError::FailedToReadInputList {
                path: path.to_path_buf(),
                source: e,
            })?
    {
        line_number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(PdfStackError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}

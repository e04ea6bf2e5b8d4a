//! pdfstack - Arrange PDF files in any order and stack them into one document.

mod cli;
mod telemetry;

use clap::Parser;
use std::path::Path;
use std::process;

use crate::cli::Cli;
use pdfstack::MergeSession;
use pdfstack::admission::RawInput;
use pdfstack::codec::{DocumentCodec, PdfCodec};
use pdfstack::config::{Config, OverwriteMode};
use pdfstack::error::PdfStackError;
use pdfstack::io::ArtifactWriter;
use pdfstack::output::{MergeReport, OutputFormatter, display_order, display_summary};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    if let Err(err) = run(cli).await {
        process::exit(report_error(&OutputFormatter::default(), &err));
    }
}

/// Show the user-facing message for `err` and return its exit code.
fn report_error(formatter: &OutputFormatter, err: &PdfStackError) -> i32 {
    formatter.error(&format!("Error: {}", err.user_message()));
    err.exit_code()
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfStackError> {
    cli.validate()?;

    let all_inputs = cli.get_all_inputs().await?;
    let config = cli.to_config(all_inputs)?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfstack::NAME, pdfstack::VERSION));
        formatter.blank_line();
    }

    let mut raw_inputs = Vec::with_capacity(config.inputs.len());
    for path in config.inputs() {
        raw_inputs.push(RawInput::from_path(path).await?);
    }

    let codec = PdfCodec::new()
        .with_compression(config.compression)
        .with_metadata(config.metadata.clone());
    let mut session = MergeSession::new(codec);

    let admitted = session.admit(raw_inputs);
    let skipped = config.inputs.len() - admitted;
    if skipped > 0 {
        formatter.debug(&format!("Skipped {skipped} input(s) that are not PDFs"));
    }
    if let Some(name) = config.requested_name() {
        session.set_requested_name(name);
    }

    arrange(&mut session, &config)?;

    if formatter.should_print() {
        display_order(&formatter, session.current_order());
        formatter.blank_line();
    }

    let cwd = std::env::current_dir()?;

    if config.dry_run {
        let suggested_name = session.suggested_name();
        let output_path = config.resolve_output(&cwd, &suggested_name);

        if config.json {
            let report = MergeReport::dry_run(session.current_order(), suggested_name, output_path);
            print_json(&report)?;
            return Ok(());
        }

        if !session.can_merge() {
            formatter.warning(&format!(
                "At least {} PDF files are needed to merge",
                pdfstack::merge::MIN_DOCUMENTS
            ));
        }
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output_path.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    formatter.info("Merging documents...");

    let handle = session.merge().await?;

    let output_path = config.resolve_output(&cwd, handle.suggested_name());
    let writer = ArtifactWriter::new();

    handle_output_overwrite(&config, &formatter, &writer, &output_path).await?;
    writer.can_write(&output_path).await?;

    let bytes = session
        .resolve_artifact(&handle)
        .ok_or_else(|| PdfStackError::other("Merged document is no longer available"))?;
    let statistics = session
        .artifact_statistics(&handle)
        .cloned()
        .ok_or_else(|| PdfStackError::other("Merged document is no longer available"))?;

    formatter.info(&format!("Writing to: {}", output_path.display()));
    let write_stats = writer.write(bytes, &output_path).await?;

    let report = MergeReport::completed(
        session.current_order(),
        handle.suggested_name(),
        output_path,
        statistics.clone(),
        write_stats.file_size,
    );
    session.revoke_artifact(&handle);

    if config.json {
        print_json(&report)?;
    } else if formatter.should_print() {
        display_summary(&formatter, &statistics, &write_stats);
        if formatter.is_verbose() {
            formatter.detail("Compression", &format!("{:?}", session.codec().compression()));
            formatter.detail("Media type", session.codec().media_type());
            if !config.metadata.is_empty() {
                formatter.detail("Metadata", "Set");
            }
        }
    }

    Ok(())
}

/// Apply removals, then moves, to the admitted order.
///
/// Removal positions all refer to the order as admitted.
fn arrange<C: DocumentCodec>(
    session: &mut MergeSession<C>,
    config: &Config,
) -> Result<(), PdfStackError> {
    let order = session.current_order();
    let len = order.len();

    let mut doomed = Vec::with_capacity(config.removals.len());
    for &index in &config.removals {
        let document = order
            .get(index)
            .ok_or(PdfStackError::InvalidMove { index, len })?;
        doomed.push(document.id());
    }

    for id in &doomed {
        if let Some(document) = session.remove(id) {
            tracing::debug!(name = document.display_name(), "removed from order");
        }
    }

    for command in &config.moves {
        session.move_to(command.from, command.to)?;
    }

    Ok(())
}

fn print_json(report: &MergeReport) -> Result<(), PdfStackError> {
    let json = report
        .to_json()
        .map_err(|err| PdfStackError::other(format!("Failed to render report: {err}")))?;
    println!("{json}");
    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
    writer: &ArtifactWriter,
    output: &Path,
) -> Result<(), PdfStackError> {
    if !writer.exists(output).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfStackError::output_exists(output.to_path_buf())),
        OverwriteMode::Prompt => {
            // Nobody to ask without visible output
            if formatter.is_quiet() {
                return Err(PdfStackError::output_exists(output.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfStackError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfStackError::Cancelled)
            }
        }
    }
}

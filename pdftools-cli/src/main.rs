//! pdftools - Merge, split, re-arrange and rasterize PDF files.

mod cli;

use clap::Parser;
use std::process;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Command};
use pdftools::config::GlobalOptions;
use pdftools::error::PdfToolsError;
use pdftools::insert::Inserter;
use pdftools::merge::Merger;
use pdftools::output::{
    OutputFormatter, display_imageify_summary, display_insert_summary, display_merge_summary,
    display_split_summary,
};
use pdftools::raster::imageify;
use pdftools::split::split_pdf;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let options = cli.global_options();

    FmtSubscriber::builder()
        .with_max_level(log_level(&options))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli, &options).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Diagnostics below warnings are shown only with `--debug`.
fn log_level(options: &GlobalOptions) -> Level {
    if options.debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Main application logic.
async fn run(cli: Cli, options: &GlobalOptions) -> Result<(), PdfToolsError> {
    let formatter = OutputFormatter::from_options(options);
    debug!(command = ?cli.command, "{} v{}", pdftools::NAME, pdftools::VERSION);

    match cli.command {
        Command::Merge(args) => {
            let config = args.to_config()?;
            let (stats, write_stats) = Merger::new().merge_to_file(&config).await?;
            display_merge_summary(&formatter, &stats, &write_stats);
        }
        Command::Split(args) => {
            let result = split_pdf(&args.to_config()?).await?;
            display_split_summary(&formatter, &result);
        }
        Command::Insert(args) => {
            let result = Inserter::new().insert(&args.to_config()?).await?;
            display_insert_summary(&formatter, &result);
        }
        Command::Imageify(args) => {
            let result = imageify(&args.to_config()?).await?;
            display_imageify_summary(&formatter, &result);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pdftools").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(&GlobalOptions { debug: true }), Level::DEBUG);
        assert_eq!(log_level(&GlobalOptions::default()), Level::WARN);
    }

    #[tokio::test]
    async fn test_run_merge_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.pdf");
        let output = dir.path().join("out.pdf");

        let cli = parse(&["merge", missing.to_str().unwrap(), output.to_str().unwrap()]);
        let options = cli.global_options();
        let err = run(cli, &options).await.unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_merge_without_inputs() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.pdf");

        let cli = parse(&["merge", output.to_str().unwrap()]);
        let options = cli.global_options();
        let err = run(cli, &options).await.unwrap_err();

        assert!(matches!(err, PdfToolsError::NoInputFiles));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_insert_mismatched_selections() {
        let cli = parse(&["insert", "t.pdf", "s.pdf", "o.pdf", "1,2", "3"]);
        let options = cli.global_options();
        let err = run(cli, &options).await.unwrap_err();

        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_run_split_not_a_pdf() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.pdf");
        std::fs::write(&input, b"plain text").unwrap();

        let cli = parse(&["split", input.to_str().unwrap()]);
        let options = cli.global_options();
        let err = run(cli, &options).await.unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(!dir.path().join("notes-p1.pdf").exists());
    }
}

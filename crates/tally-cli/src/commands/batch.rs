//! Batch command - extract fields from many OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use tally_core::{ExtractionResult, ReceiptExtractor};

use super::output::{OutputFormat, Report};
use super::{build_extractor, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching OCR text files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Lexicon JSON file overriding the configured one
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Date treated as today when penalizing future dates (YYYY-MM-DD)
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Add a VAT split based on the matched category
    #[arg(long)]
    show_vat: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let extractor = build_extractor(&config, args.lexicon.as_deref(), args.reference_date)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = fs::read_to_string(&path).map(|text| extractor.extract(&text));
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => results.push(FileResult {
                path,
                result: Some(result),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to read {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to read {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        let pretty = config.output.pretty;
        for file in &results {
            let Some(result) = &file.result else {
                continue;
            };

            let stem = file
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("receipt");
            let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

            let content = Report::new(&extractor, result, args.show_vat).render(
                args.format,
                pretty,
                args.show_vat,
            )?;
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &extractor, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let detected = results
        .iter()
        .filter(|r| r.result.as_ref().is_some_and(|x| !x.is_empty()))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} with fields detected, {} failed",
        style(detected).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for file in &failed {
            println!(
                "  - {}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(
    path: &Path,
    extractor: &ReceiptExtractor,
    results: &[FileResult],
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "amount",
        "display",
        "date",
        "category",
        "category_name",
        "processing_time_ms",
        "error",
    ])?;

    for file in results {
        let filename = file.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time = file.processing_time_ms.to_string();

        if let Some(result) = &file.result {
            let category_name = extractor
                .category_of(result)
                .map(|c| c.name.as_str())
                .unwrap_or("");
            wtr.write_record([
                filename,
                "success",
                &result.money.value.map(|v| v.to_string()).unwrap_or_default(),
                result.money.display.as_deref().unwrap_or(""),
                &result.date_string().unwrap_or_default(),
                &result.category_code().to_string(),
                category_name,
                &time,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "-1",
                "",
                &time,
                file.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

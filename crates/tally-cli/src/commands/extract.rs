//! Extract command - read amount, date, and category from one OCR text file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use super::output::{OutputFormat, Report};
use super::{build_extractor, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR text file, or "-" to read standard input
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Lexicon JSON file overriding the configured one
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Date treated as today when penalizing future dates (YYYY-MM-DD)
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Add a VAT split based on the matched category
    #[arg(long)]
    show_vat: bool,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let extractor = build_extractor(&config, args.lexicon.as_deref(), args.reference_date)?;

    let text = read_input(&args.input).await?;
    info!("Extracting from {} characters", text.len());

    let result = extractor.extract(&text);
    let report = Report::new(&extractor, &result, args.show_vat);
    let pretty = config.output.pretty && !args.compact;
    let output = report.render(args.format, pretty, args.show_vat)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(tokio::fs::read_to_string(input).await?)
}

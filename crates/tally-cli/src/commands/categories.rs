//! Categories command - list the active lexicon's category table.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use super::{load_config, load_lexicon};

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Lexicon JSON file overriding the configured one
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    index: usize,
    name: &'a str,
    keywords: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    vat_rate: Option<f64>,
}

pub async fn run(args: CategoriesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let lexicon = load_lexicon(&config, args.lexicon.as_deref())?;

    let rows: Vec<CategoryRow> = lexicon
        .categories
        .iter()
        .enumerate()
        .map(|(index, c)| CategoryRow {
            index,
            name: &c.name,
            keywords: &c.keywords,
            vat_rate: c.vat_rate,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        let rate = row
            .vat_rate
            .map(|r| format!("{}%", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}  {:<20} {:>5}  {}",
            row.index,
            style(row.name).bold(),
            rate,
            row.keywords.join(", ")
        );
    }

    Ok(())
}

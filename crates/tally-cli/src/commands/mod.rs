//! Subcommands and the helpers they share.

pub mod batch;
pub mod categories;
pub mod config;
pub mod extract;
pub mod output;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use tally_core::{Lexicon, ReceiptExtractor, TallyConfig};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("config.json")
}

/// Configuration file to use: the `--config` flag or the default location.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; the default location
/// falls back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    match config_path {
        Some(path) => Ok(TallyConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                Ok(TallyConfig::from_file(&path)?)
            } else {
                Ok(TallyConfig::default())
            }
        }
    }
}

/// Resolve the lexicon: the command-line override, then the configured file,
/// then the built-in table.
pub fn load_lexicon(config: &TallyConfig, lexicon: Option<&Path>) -> anyhow::Result<Lexicon> {
    let lexicon = match lexicon {
        Some(path) => Lexicon::from_json_file(path)?,
        None => config.load_lexicon()?,
    };
    debug!("Lexicon has {} categories", lexicon.categories.len());
    Ok(lexicon)
}

/// Build the extractor from configuration and command-line overrides.
pub fn build_extractor(
    config: &TallyConfig,
    lexicon: Option<&Path>,
    reference_date: Option<NaiveDate>,
) -> anyhow::Result<ReceiptExtractor> {
    let lexicon = load_lexicon(config, lexicon)?;
    let extractor = ReceiptExtractor::with_config(lexicon, &config.extraction)?;

    Ok(match reference_date {
        Some(date) => extractor.with_reference_date(date),
        None => extractor,
    })
}

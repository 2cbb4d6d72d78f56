//! Configuration structures for extraction and the CLI.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::lexicon::Lexicon;

/// Main configuration for tally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Extraction tuning.
    pub extraction: ExtractionConfig,

    /// Where the category lexicon comes from.
    pub lexicon: LexiconConfig,

    /// Output formatting.
    pub output: OutputConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Candidate scoring weights.
    pub scoring: ScoringConfig,

    /// Date treated as "today" for the future-date penalty.
    /// Uses the local calendar date when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

/// Scoring weights for the amount and date extractors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub amount: AmountScoring,
    pub date: DateScoring,
}

/// Amount candidate weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountScoring {
    /// Starting score of every candidate.
    pub base: f64,

    /// Added when the candidate's line carries a total keyword.
    pub total_hint_bonus: f64,

    /// Multiplied by the character offset of the match.
    pub position_weight: f64,

    /// Subtracted when the candidate's line looks like a per-unit price.
    pub per_unit_penalty: f64,
}

impl Default for AmountScoring {
    fn default() -> Self {
        Self {
            base: 1.0,
            total_hint_bonus: 2.0,
            position_weight: 0.001,
            per_unit_penalty: 0.6,
        }
    }
}

/// Date candidate weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateScoring {
    /// Starting score of every candidate.
    pub base: f64,

    /// Added when the candidate's line carries a date keyword.
    pub keyword_bonus: f64,

    /// Subtracted for dates after the reference date.
    pub future_penalty: f64,

    /// Subtracted for years outside `min_year..=max_year`.
    pub out_of_range_penalty: f64,

    pub min_year: i32,
    pub max_year: i32,
}

impl Default for DateScoring {
    fn default() -> Self {
        Self {
            base: 1.0,
            keyword_bonus: 1.2,
            future_penalty: 1.0,
            out_of_range_penalty: 1.5,
            min_year: 2000,
            max_year: 2100,
        }
    }
}

/// Lexicon source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// JSON lexicon file replacing the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the configured lexicon, falling back to the built-in table.
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon.path {
            Some(path) => Lexicon::from_json_file(path).map_err(|e| {
                TallyError::Config(format!("lexicon.path {}: {}", path.display(), e))
            }),
            None => Ok(Lexicon::builtin()),
        }
    }
}

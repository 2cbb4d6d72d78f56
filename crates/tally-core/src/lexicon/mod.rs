//! Static reference data consumed by the extractors.
//!
//! A [`Lexicon`] is plain data: month names, currency markers, keyword
//! hints and the ordered category table. Extractors compile their patterns
//! from it once at construction, so a lexicon can be swapped for a
//! synthetic one in tests or loaded from a JSON file.

mod builtin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// An expense category and the keywords that identify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Display name.
    pub name: String,

    /// Case-insensitive match terms.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// VAT rate as a percentage (20.0 = 20%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
}

impl CategoryDefinition {
    pub fn new<S: Into<String>>(name: impl Into<String>, keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            vat_rate: None,
        }
    }

    pub fn with_vat_rate(mut self, rate: f64) -> Self {
        self.vat_rate = Some(rate);
        self
    }
}

/// Reference tables for receipt extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Full month names, January first.
    pub months: Vec<String>,

    /// Currency symbols and ISO codes that may surround an amount.
    pub currency_markers: Vec<String>,

    /// Keywords marking a line as carrying the receipt total.
    pub total_keywords: Vec<String>,

    /// Keywords marking a line as carrying the transaction date.
    #[serde(default = "builtin::date_keywords")]
    pub date_keywords: Vec<String>,

    /// Keywords marking a line as a per-unit price.
    #[serde(default = "builtin::unit_keywords")]
    pub unit_keywords: Vec<String>,

    /// Ordered category table. Earlier entries win ties.
    pub categories: Vec<CategoryDefinition>,
}

impl Lexicon {
    /// The shipped UK expense lexicon.
    pub fn builtin() -> Self {
        builtin::lexicon()
    }

    /// Parse and validate a lexicon from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Load and validate a lexicon from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save the lexicon as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check structural constraints the extractors rely on.
    pub fn validate(&self) -> std::result::Result<(), LexiconError> {
        if self.months.len() != 12 {
            return Err(LexiconError::MonthCount(self.months.len()));
        }
        if self.currency_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(LexiconError::EmptyMarkers("currency markers"));
        }
        if self.total_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(LexiconError::EmptyMarkers("total keywords"));
        }

        for (index, category) in self.categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(LexiconError::EmptyCategoryName(index));
            }
            if let Some(rate) = category.vat_rate {
                if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
                    return Err(LexiconError::InvalidVatRate {
                        category: category.name.clone(),
                        rate,
                    });
                }
            }
        }

        Ok(())
    }

    /// Look up a category by its table index.
    pub fn category(&self, index: usize) -> Option<&CategoryDefinition> {
        self.categories.get(index)
    }

    /// Find the index of a category by case-insensitive name.
    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Extraction façade: raw OCR text in, [`ExtractionResult`] out.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::error::LexiconError;
use crate::lexicon::{CategoryDefinition, Lexicon};
use crate::models::config::ExtractionConfig;
use crate::models::receipt::{ExtractionResult, Money, VatEstimate};

use super::rules::{
    estimate_vat, AmountExtractor, CategoryMatcher, DateExtractor, FieldExtractor,
};

/// Runs the amount, date and category extractors over one piece of text.
///
/// Stateless between calls; a single instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReceiptExtractor {
    lexicon: Lexicon,
    amounts: AmountExtractor,
    dates: DateExtractor,
    categories: CategoryMatcher,
}

impl ReceiptExtractor {
    /// Build extractors for a lexicon with default scoring.
    pub fn new(lexicon: Lexicon) -> Result<Self, LexiconError> {
        Self::with_config(lexicon, &ExtractionConfig::default())
    }

    /// Build extractors for a lexicon with explicit scoring.
    pub fn with_config(lexicon: Lexicon, config: &ExtractionConfig) -> Result<Self, LexiconError> {
        lexicon.validate()?;

        let amounts = AmountExtractor::new(&lexicon)?.with_scoring(config.scoring.amount.clone());
        let mut dates = DateExtractor::new(&lexicon)?.with_scoring(config.scoring.date.clone());
        if let Some(date) = config.reference_date {
            dates = dates.with_reference_date(date);
        }
        let categories = CategoryMatcher::new(&lexicon)?;

        Ok(Self {
            lexicon,
            amounts,
            dates,
            categories,
        })
    }

    /// Extractor over the built-in lexicon.
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin()).expect("built-in lexicon is valid")
    }

    /// Fix the date used for the future-date penalty.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.dates = self.dates.with_reference_date(date);
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Extract amount, date and category from OCR text.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let text = text.replace("\r\n", "\n");

        let money = match self.amounts.extract(&text) {
            Some(best) => match best.value.to_string().parse::<f64>() {
                Ok(value) if value.is_finite() => Money::new(value, best.matched),
                _ => Money::none(),
            },
            None => Money::none(),
        };
        let date = self.dates.extract(&text).map(|c| c.value);
        let category = self.categories.extract(&text).map(|m| m.index);

        debug!(
            amount = ?money.value,
            date = ?date,
            category = ?category,
            "extracted receipt fields from {} characters",
            text.len()
        );

        ExtractionResult {
            money,
            date,
            category,
        }
    }

    /// Extract from optional text; `None` yields the empty result.
    pub fn extract_opt(&self, text: Option<&str>) -> ExtractionResult {
        match text {
            Some(text) => self.extract(text),
            None => ExtractionResult::empty(),
        }
    }

    /// Extract from an arbitrary JSON value. Anything but a string yields
    /// the empty result without running the extractors.
    pub fn extract_value(&self, value: &Value) -> ExtractionResult {
        self.extract_opt(value.as_str())
    }

    /// Extract from recognised text lines.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> ExtractionResult {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        self.extract(&text)
    }

    /// The lexicon entry for a result's category.
    pub fn category_of(&self, result: &ExtractionResult) -> Option<&CategoryDefinition> {
        result.category.and_then(|i| self.lexicon.category(i))
    }

    /// Split the detected total using the matched category's VAT rate.
    pub fn estimate_vat(&self, result: &ExtractionResult) -> Option<VatEstimate> {
        let gross = Decimal::from_f64(result.money.value?)?.round_dp(2);
        let rate = Decimal::from_f64(self.category_of(result)?.vat_rate?)?;
        Some(estimate_vat(gross, rate))
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::builtin()
    }
}

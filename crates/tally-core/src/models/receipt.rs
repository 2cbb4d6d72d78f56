//! The extraction result handed back to callers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency sentinel. Currency identity is not modelled; only whether an
/// amount was found.
pub const UNSPECIFIED_CURRENCY: u8 = 0;

/// Detected monetary total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// Signed amount, or `None` when no amount was recognised.
    pub value: Option<f64>,

    /// Always [`UNSPECIFIED_CURRENCY`].
    pub currency: u8,

    /// The matched token as it appeared in the text.
    pub display: Option<String>,
}

impl Money {
    pub fn none() -> Self {
        Self {
            value: None,
            currency: UNSPECIFIED_CURRENCY,
            display: None,
        }
    }

    pub fn new(value: f64, display: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            currency: UNSPECIFIED_CURRENCY,
            display: Some(display.into()),
        }
    }

    pub fn is_detected(&self) -> bool {
        self.value.is_some()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::none()
    }
}

/// Unified output of one extraction pass.
///
/// Serializes as
/// `{"money":{"value":..,"currency":0,"display":..},"date":"YYYY-MM-DD"|null,"category":n|-1}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Most likely transaction total.
    pub money: Money,

    /// Most likely transaction date.
    pub date: Option<NaiveDate>,

    /// Index into the lexicon category table.
    #[serde(with = "category_index")]
    pub category: Option<usize>,
}

impl ExtractionResult {
    /// The result for input that could not be read at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Canonical `YYYY-MM-DD` form of the date.
    pub fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Category index with `-1` standing in for "no match".
    pub fn category_code(&self) -> i64 {
        self.category.map(|i| i as i64).unwrap_or(-1)
    }

    /// True when no field was populated.
    pub fn is_empty(&self) -> bool {
        !self.money.is_detected() && self.date.is_none() && self.category.is_none()
    }
}

/// VAT-inclusive split of a gross amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatEstimate {
    /// Rate as a percentage.
    pub rate: Decimal,
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

/// Serde adapter writing `None` as `-1`.
mod category_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_u64(*index as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}

//! Core library for receipt text extraction.
//!
//! This crate provides:
//! - A configurable lexicon of month names, currency markers, keyword hints
//!   and expense categories
//! - Rule-based extractors for the receipt total, transaction date and
//!   spending category
//! - A façade turning raw OCR text into a single [`ExtractionResult`]

pub mod error;
pub mod lexicon;
pub mod models;
pub mod receipt;

pub use error::{LexiconError, Result, TallyError};
pub use lexicon::{CategoryDefinition, Lexicon};
pub use models::config::TallyConfig;
pub use models::receipt::{ExtractionResult, Money, VatEstimate};
pub use receipt::ReceiptExtractor;

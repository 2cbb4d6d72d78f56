//! Receipt field extraction.

mod parser;
pub mod rules;

pub use parser::ReceiptExtractor;

//! Common regex patterns for receipt extraction.
//!
//! Numeric date shapes are fixed and compiled once. Everything that depends
//! on lexicon words is built by the helpers below when an extractor is
//! constructed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::LexiconError;

lazy_static! {
    // D/M/YY, day first, two-digit year
    pub static ref DATE_DMY_SHORT: Regex = Regex::new(
        r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2})\b"
    ).unwrap();

    // D/M/YYYY, day first
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})\b"
    ).unwrap();

    // YYYY-M-D
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[/.\-](\d{1,2})[/.\-](\d{1,2})\b"
    ).unwrap();

    // "x3", "x 12" quantity multipliers
    pub static ref QUANTITY_MULTIPLIER: Regex = Regex::new(
        r"(?i)\bx\s?\d+\b"
    ).unwrap();
}

/// Escaped alternation of terms, longest first, inner whitespace matching
/// any whitespace run.
pub fn alternation(terms: &[String]) -> String {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    terms
        .iter()
        .map(|t| {
            t.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Case-insensitive, word-bounded keyword matcher.
pub fn keyword_pattern(what: &'static str, keywords: &[String]) -> Result<Regex, LexiconError> {
    compile(what, &format!(r"(?i)\b(?:{})\b", alternation(keywords)))
}

/// Currency symbol or code matcher.
pub fn currency_pattern(markers: &[String]) -> Result<Regex, LexiconError> {
    compile("currency markers", &format!("(?i)(?:{})", alternation(markers)))
}

/// Monetary token matcher.
///
/// Optional leading currency, optional `-` or `(`, integer part with comma
/// or space thousands groups, optional two-digit decimals, optional `)`,
/// optional trailing currency. Digit-run boundaries are checked by the
/// caller since the regex engine has no lookaround.
pub fn amount_pattern(markers: &[String]) -> Result<Regex, LexiconError> {
    let currency = alternation(markers);
    let pattern = format!(
        r"(?i)(?:(?:{currency})[ \t]?)?(?:-[ \t]?|\()?(?:(?:{currency})[ \t]?)?(?:\d{{1,3}}(?:[, ]\d{{3}})+|\d+)(?:\.\d{{2}})?\)?(?:[ \t]?(?:{currency}))?"
    );
    compile("amounts", &pattern)
}

/// Month-name matcher accepting full names and three-letter abbreviations.
pub fn month_alternation(months: &[String]) -> String {
    months
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(|m| {
            let split = m.char_indices().nth(3).map(|(i, _)| i).unwrap_or(m.len());
            let (abbr, rest) = m.split_at(split);
            if rest.is_empty() {
                regex::escape(abbr)
            } else {
                format!("{}(?:{})?", regex::escape(abbr), regex::escape(rest))
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(what: &'static str, pattern: &str) -> Result<Regex, LexiconError> {
    Regex::new(pattern).map_err(|source| LexiconError::InvalidPattern { what, source })
}

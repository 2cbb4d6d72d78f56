//! Amount extraction for receipts.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use crate::error::LexiconError;
use crate::lexicon::Lexicon;
use crate::models::config::AmountScoring;

use super::patterns::{amount_pattern, currency_pattern, keyword_pattern, QUANTITY_MULTIPLIER};
use super::text::{normalize_lines, CharOffsets, LineLookup};
use super::{pick_best, Candidate, FieldExtractor};

/// Amount field extractor.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    token: Regex,
    currency: Regex,
    total_hint: Regex,
    per_unit: Regex,
    scoring: AmountScoring,
}

impl AmountExtractor {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        Ok(Self {
            token: amount_pattern(&lexicon.currency_markers)?,
            currency: currency_pattern(&lexicon.currency_markers)?,
            total_hint: keyword_pattern("total keywords", &lexicon.total_keywords)?,
            per_unit: keyword_pattern("unit keywords", &lexicon.unit_keywords)?,
            scoring: AmountScoring::default(),
        })
    }

    pub fn with_scoring(mut self, scoring: AmountScoring) -> Self {
        self.scoring = scoring;
        self
    }

    fn is_per_unit(&self, line: &str) -> bool {
        self.per_unit.is_match(line) || QUANTITY_MULTIPLIER.is_match(line)
    }

    fn score(&self, candidate: &Candidate<Decimal>, offset: usize) -> f64 {
        let s = &self.scoring;
        let mut score = s.base;
        if candidate.hinted {
            score += s.total_hint_bonus;
        }
        score += s.position_weight * offset as f64;
        if self.is_per_unit(&candidate.line) {
            score -= s.per_unit_penalty;
        }
        score
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Candidate<Decimal>;

    /// Amounts on a total-hint line win by value; otherwise the best score.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let candidates = self.extract_all(text);

        let hinted: Vec<&Candidate<Decimal>> = candidates.iter().filter(|c| c.hinted).collect();
        let best = if hinted.is_empty() {
            pick_best(&candidates, |c| c.score)
        } else {
            pick_best(hinted, |c| c.value)
        };

        best.cloned()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines = normalize_lines(text);
        let mut lookup = LineLookup::new(&lines);
        let mut offsets = CharOffsets::new(text);
        let mut results = Vec::new();

        for m in self.token.find_iter(text) {
            if !is_isolated(text, m.start(), m.end()) {
                continue;
            }

            let Some(value) = parse_with(&self.currency, m.as_str()) else {
                trace!("discarding unparseable amount token {:?}", m.as_str());
                continue;
            };

            let line = lookup.containing(m.as_str()).unwrap_or_default();
            let mut candidate = Candidate::new(value, m.as_str().trim(), m.start(), m.end())
                .with_line(line);
            candidate.hinted = self.total_hint.is_match(line);
            candidate.score = self.score(&candidate, offsets.at(m.start()));
            results.push(candidate);
        }

        results
    }
}

/// Reject tokens cut out of a longer digit run, a date or a time.
fn is_isolated(text: &str, start: usize, end: usize) -> bool {
    let mut before = text[..start].chars().rev();
    match before.next() {
        Some(c) if c.is_ascii_digit() => return false,
        Some('.' | ',' | '/' | ':') if matches!(before.next(), Some(c) if c.is_ascii_digit()) => {
            return false;
        }
        _ => {}
    }

    let mut after = text[end..].chars();
    match after.next() {
        Some(c) if c.is_ascii_digit() || c == '/' => false,
        Some('.' | ',' | '-' | ':') => !matches!(after.next(), Some(c) if c.is_ascii_digit()),
        _ => true,
    }
}

/// Parse a monetary token such as `"-£1,234.56"` or `"(12.00)"`.
fn parse_with(currency: &Regex, token: &str) -> Option<Decimal> {
    // markers can contain whitespace ("US Dollar")
    let bare = currency.replace_all(token, "");
    let compact: String = bare.chars().filter(|c| !c.is_whitespace()).collect();

    let negative = compact.starts_with('-') || (compact.starts_with('(') && compact.ends_with(')'));
    let digits: String = compact
        .chars()
        .filter(|c| !matches!(c, '-' | '(' | ')' | ','))
        .collect();

    let value = Decimal::from_str(&digits).ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn extractor() -> AmountExtractor {
        AmountExtractor::new(&Lexicon::builtin()).unwrap()
    }

    fn parse(token: &str) -> Option<Decimal> {
        parse_with(&extractor().currency, token)
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(parse("£1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse("1 234.56"), Some(dec("1234.56")));
        assert_eq!(parse("-£12.50"), Some(dec("-12.50")));
        assert_eq!(parse("(12.00)"), Some(dec("-12.00")));
        assert_eq!(parse("9.99 GBP"), Some(dec("9.99")));
        assert_eq!(parse("£"), None);
    }

    #[test]
    fn test_multiple_currency_markers_in_one_token() {
        let best = extractor().extract("Total £$5.00").unwrap();
        assert_eq!(best.value, dec("5.00"));
        assert_eq!(best.matched, "£$5.00");
    }

    #[test]
    fn test_multi_word_currency_marker() {
        let lexicon = Lexicon {
            currency_markers: vec!["US Dollar".to_string(), "$".to_string()],
            ..Lexicon::builtin()
        };
        let extractor = AmountExtractor::new(&lexicon).unwrap();

        let best = extractor.extract("Total 12.50 US Dollar").unwrap();
        assert_eq!(best.value, dec("12.50"));
        assert_eq!(best.matched, "12.50 US Dollar");

        let best = extractor.extract("Total 8.00 US   Dollar").unwrap();
        assert_eq!(best.value, dec("8.00"));
    }

    #[test]
    fn test_scores_use_character_offsets() {
        let extractor = extractor();
        let candidates = extractor.extract_all("Café 1.00\nThé 2.00");
        let scoring = AmountScoring::default();
        // "1.00" starts at char 5, "2.00" at char 14
        assert_eq!(candidates.len(), 2);
        assert!((candidates[0].score - (scoring.base + 0.005)).abs() < 1e-9);
        assert!((candidates[1].score - (scoring.base + 0.014)).abs() < 1e-9);
    }

    #[test]
    fn test_total_line_beats_earlier_line() {
        let best = extractor().extract("Subtotal 10.00\nTotal £45.67").unwrap();
        assert_eq!(best.value, dec("45.67"));
        assert_eq!(best.matched, "£45.67");
    }

    #[test]
    fn test_largest_value_on_hint_lines() {
        let text = "Coffee 3.20\nSubtotal 12.00 Total 14.40\nThank you";
        let best = extractor().extract(text).unwrap();
        assert_eq!(best.value, dec("14.40"));
    }

    #[test]
    fn test_negative_amount() {
        let best = extractor().extract("Refund: -£12.50").unwrap();
        assert_eq!(best.value, dec("-12.50"));
    }

    #[test]
    fn test_parenthesized_amount() {
        let best = extractor().extract("Adjustment (7.25)").unwrap();
        assert_eq!(best.value, dec("-7.25"));
    }

    #[test]
    fn test_without_hint_prefers_later_amount() {
        let best = extractor().extract("Latte 2.95\nMuffin 1.80").unwrap();
        assert_eq!(best.value, dec("1.80"));
    }

    #[test]
    fn test_per_unit_line_is_penalized() {
        let extractor = extractor();
        let candidates = extractor.extract_all("Apples 0.40 each\nBag 0.10");
        let apples = candidates.iter().find(|c| c.value == dec("0.40")).unwrap();
        let bag = candidates.iter().find(|c| c.value == dec("0.10")).unwrap();
        assert!(apples.score < bag.score);

        let scoring = AmountScoring::default();
        assert!((apples.score - (scoring.base - scoring.per_unit_penalty + 0.007)).abs() < 1e-9);
    }

    #[test]
    fn test_quantity_multiplier_is_per_unit() {
        let extractor = extractor();
        assert!(extractor.is_per_unit("Milk x2 1.10"));
        assert!(extractor.is_per_unit("QTY 3"));
        assert!(!extractor.is_per_unit("Total 4.40"));
    }

    #[test]
    fn test_digit_run_is_not_split() {
        let extractor = extractor();
        let values: Vec<Decimal> = extractor
            .extract_all("Ref 12.345")
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert!(!values.contains(&dec("12.34")));
        assert!(!values.contains(&dec("5")));
    }

    #[test]
    fn test_dates_and_times_are_not_amounts() {
        let extractor = extractor();
        assert!(extractor.extract("24/05/2006 14:32").is_none());
        assert!(extractor.extract("2006-05-24").is_none());
        assert!(extractor.extract("01.02.2023").is_none());
    }

    #[test]
    fn test_amount_after_colon() {
        let best = extractor().extract("TOTAL:£12.50").unwrap();
        assert_eq!(best.value, dec("12.50"));
    }

    #[test]
    fn test_no_amount() {
        assert!(extractor().extract("Thank you for shopping").is_none());
        assert!(extractor().extract("").is_none());
    }

    #[test]
    fn test_custom_scoring() {
        let scoring = AmountScoring {
            position_weight: 0.0,
            ..AmountScoring::default()
        };
        let extractor = extractor().with_scoring(scoring);
        // equal scores: first candidate wins
        let best = extractor.extract("Latte 2.95\nMuffin 1.80").unwrap();
        assert_eq!(best.value, dec("2.95"));
    }
}

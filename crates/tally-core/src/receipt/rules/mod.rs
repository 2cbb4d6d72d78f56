//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod patterns;
pub mod text;
pub mod vat;

use std::cmp::Ordering;

pub use amounts::AmountExtractor;
pub use category::{CategoryMatch, CategoryMatcher};
pub use dates::{DateExtractor, DatePattern};
pub use vat::estimate_vat;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the single best value from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every scored candidate, in the order they were found.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A provisional, scored match produced while scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    /// Parsed value.
    pub value: T,
    /// Text that was matched.
    pub matched: String,
    /// Normalized line the match was found on (empty if none contained it).
    pub line: String,
    /// Whether that line carries the extractor's keyword hint.
    pub hinted: bool,
    /// Heuristic score; higher is more likely.
    pub score: f64,
    /// Byte span in the scanned text.
    pub position: (usize, usize),
}

impl<T> Candidate<T> {
    pub fn new(value: T, matched: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value,
            matched: matched.into(),
            line: String::new(),
            hinted: false,
            score: 0.0,
            position: (start, end),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = line.into();
        self
    }
}

/// Assign every candidate its score.
pub fn score_all<T, F>(candidates: &mut [Candidate<T>], score: F)
where
    F: Fn(&Candidate<T>) -> f64,
{
    for candidate in candidates.iter_mut() {
        candidate.score = score(candidate);
    }
}

/// Pick the candidate with the greatest key.
///
/// Only a strictly greater key replaces the current best, so the first
/// candidate wins among equals.
pub fn pick_best<'a, T, K, F>(
    candidates: impl IntoIterator<Item = &'a Candidate<T>>,
    key: F,
) -> Option<&'a Candidate<T>>
where
    T: 'a,
    K: PartialOrd,
    F: Fn(&Candidate<T>) -> K,
{
    let mut best: Option<(&'a Candidate<T>, K)> = None;

    for candidate in candidates {
        let candidate_key = key(candidate);
        let replace = match &best {
            None => true,
            Some((_, best_key)) => candidate_key.partial_cmp(best_key) == Some(Ordering::Greater),
        };
        if replace {
            best = Some((candidate, candidate_key));
        }
    }

    best.map(|(candidate, _)| candidate)
}

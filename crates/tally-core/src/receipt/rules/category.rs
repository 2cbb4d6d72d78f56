//! Expense category matching by keyword hits.

use regex::Regex;
use tracing::trace;

use crate::error::LexiconError;
use crate::lexicon::Lexicon;

use super::FieldExtractor;

/// A category with at least one keyword hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMatch {
    /// Index into the lexicon category table.
    pub index: usize,
    /// Number of non-overlapping keyword hits.
    pub hits: usize,
}

/// Keyword-count category matcher.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    /// One word-bounded alternation per category, in lexicon order.
    /// Categories without keywords are absent.
    rules: Vec<(usize, Regex)>,
}

impl CategoryMatcher {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let mut rules = Vec::new();

        for (index, category) in lexicon.categories.iter().enumerate() {
            let keywords: Vec<String> = category
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .map(|k| regex::escape(&k))
                .collect();

            if keywords.is_empty() {
                continue;
            }

            let pattern = format!(r"\b(?:{})\b", keywords.join("|"));
            let regex = Regex::new(&pattern).map_err(|source| LexiconError::InvalidPattern {
                what: "category keywords",
                source,
            })?;
            rules.push((index, regex));
        }

        Ok(Self { rules })
    }

    /// Count keyword hits for every category in already lower-cased text.
    fn hits<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = CategoryMatch> + 'a {
        self.rules.iter().map(move |(index, regex)| CategoryMatch {
            index: *index,
            hits: regex.find_iter(lowered).count(),
        })
    }
}

impl FieldExtractor for CategoryMatcher {
    type Output = CategoryMatch;

    /// The category with the most hits; earlier categories win ties.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lowered = text.to_lowercase();
        let mut best: Option<CategoryMatch> = None;

        for current in self.hits(&lowered) {
            let best_hits = best.map(|b| b.hits).unwrap_or(0);
            if current.hits > best_hits {
                best = Some(current);
            }
        }

        if let Some(found) = best {
            trace!("category {} won with {} hits", found.index, found.hits);
        }
        best
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lowered = text.to_lowercase();
        self.hits(&lowered).filter(|m| m.hits > 0).collect()
    }
}

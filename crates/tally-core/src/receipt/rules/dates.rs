//! Date extraction for receipts.

use chrono::{Datelike, Local, NaiveDate};
use regex::{Captures, Regex};
use tracing::trace;

use crate::error::LexiconError;
use crate::lexicon::Lexicon;
use crate::models::config::DateScoring;

use super::patterns::{keyword_pattern, month_alternation, DATE_DMY, DATE_DMY_SHORT, DATE_YMD};
use super::text::{normalize_lines, LineLookup};
use super::{pick_best, score_all, Candidate, FieldExtractor};

/// The date shapes recognised on receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `24/05/06`, year = 2000 + YY.
    DayMonthShortYear,
    /// `24/05/2006`.
    DayMonthYear,
    /// `2006-05-24`.
    YearMonthDay,
    /// `24 May 2006`, `24 May. 2006`, `24 May, 2006`.
    DayMonthName,
    /// `May 24, 2006`.
    MonthNameDay,
}

impl DatePattern {
    /// Every pattern, in the order candidates are collected.
    pub const ALL: [DatePattern; 5] = [
        DatePattern::DayMonthShortYear,
        DatePattern::DayMonthYear,
        DatePattern::YearMonthDay,
        DatePattern::DayMonthName,
        DatePattern::MonthNameDay,
    ];

    /// Resolve captures to a (year, month, day) triple.
    fn resolve(self, caps: &Captures, months: &[String]) -> Option<(i32, u32, u32)> {
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        match self {
            DatePattern::DayMonthShortYear => {
                Some((2000 + num(3)? as i32, num(2)?, num(1)?))
            }
            DatePattern::DayMonthYear => Some((num(3)? as i32, num(2)?, num(1)?)),
            DatePattern::YearMonthDay => Some((num(1)? as i32, num(2)?, num(3)?)),
            DatePattern::DayMonthName => {
                let month = month_number(months, caps.get(2)?.as_str())?;
                Some((num(3)? as i32, month, num(1)?))
            }
            DatePattern::MonthNameDay => {
                let month = month_number(months, caps.get(1)?.as_str())?;
                Some((num(3)? as i32, month, num(2)?))
            }
        }
    }
}

/// Date field extractor.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    day_month_name: Regex,
    month_name_day: Regex,
    date_hint: Regex,
    months: Vec<String>,
    scoring: DateScoring,
    reference_date: Option<NaiveDate>,
}

impl DateExtractor {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let months = month_alternation(&lexicon.months);
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| LexiconError::InvalidPattern {
                what: "month names",
                source,
            })
        };

        Ok(Self {
            day_month_name: compile(format!(
                r"(?i)\b(\d{{1,2}})\s+({months})[.,]?\s+(\d{{4}})\b"
            ))?,
            month_name_day: compile(format!(
                r"(?i)\b({months})\.?\s+(\d{{1,2}}),?\s+(\d{{4}})\b"
            ))?,
            date_hint: keyword_pattern("date keywords", &lexicon.date_keywords)?,
            months: lexicon.months.iter().map(|m| m.trim().to_lowercase()).collect(),
            scoring: DateScoring::default(),
            reference_date: None,
        })
    }

    pub fn with_scoring(mut self, scoring: DateScoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Fix "today" instead of reading the local clock.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn regex(&self, pattern: DatePattern) -> &Regex {
        match pattern {
            DatePattern::DayMonthShortYear => &*DATE_DMY_SHORT,
            DatePattern::DayMonthYear => &*DATE_DMY,
            DatePattern::YearMonthDay => &*DATE_YMD,
            DatePattern::DayMonthName => &self.day_month_name,
            DatePattern::MonthNameDay => &self.month_name_day,
        }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn score(&self, candidate: &Candidate<NaiveDate>, today: NaiveDate) -> f64 {
        let s = &self.scoring;
        let mut score = s.base;
        if candidate.hinted {
            score += s.keyword_bonus;
        }
        if candidate.value > today {
            score -= s.future_penalty;
        }
        if !(s.min_year..=s.max_year).contains(&candidate.value.year()) {
            score -= s.out_of_range_penalty;
        }
        score
    }
}

impl FieldExtractor for DateExtractor {
    type Output = Candidate<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let candidates = self.extract_all(text);
        pick_best(&candidates, |c| c.score).cloned()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines = normalize_lines(text);
        let mut lookup = LineLookup::new(&lines);
        let mut results = Vec::new();

        for pattern in DatePattern::ALL {
            for caps in self.regex(pattern).captures_iter(text) {
                let Some(full_match) = caps.get(0) else {
                    continue;
                };

                let date = pattern
                    .resolve(&caps, &self.months)
                    .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
                let Some(date) = date else {
                    trace!("discarding invalid date {:?}", full_match.as_str());
                    continue;
                };

                let line = lookup.containing(full_match.as_str()).unwrap_or_default();
                let mut candidate =
                    Candidate::new(date, full_match.as_str(), full_match.start(), full_match.end())
                        .with_line(line);
                candidate.hinted = self.date_hint.is_match(line);
                results.push(candidate);
            }
        }

        let today = self.today();
        score_all(&mut results, |c| self.score(c, today));
        results
    }
}

/// 1-based month number for a full or abbreviated month name.
fn month_number(months: &[String], token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.').to_lowercase();
    if token.chars().count() < 3 {
        return None;
    }
    months
        .iter()
        .position(|m| *m == token || m.starts_with(&token))
        .map(|i| i as u32 + 1)
}

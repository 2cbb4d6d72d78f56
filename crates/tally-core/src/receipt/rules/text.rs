//! Line handling shared by the extractors.

use std::collections::HashMap;

/// Split text on newlines, collapsing whitespace runs and trimming each line.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split('\n').map(collapse_whitespace).collect()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First-line-containing lookups over normalized lines, remembered per needle.
pub struct LineLookup<'a> {
    lines: &'a [String],
    seen: HashMap<String, Option<usize>>,
}

impl<'a> LineLookup<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            seen: HashMap::new(),
        }
    }

    /// First line containing `needle` once its whitespace is collapsed.
    pub fn containing(&mut self, needle: &str) -> Option<&'a str> {
        let needle = collapse_whitespace(needle);
        if needle.is_empty() {
            return None;
        }

        let lines = self.lines;
        let index = *self
            .seen
            .entry(needle)
            .or_insert_with_key(|needle| lines.iter().position(|line| line.contains(needle.as_str())));
        index.map(|i| lines[i].as_str())
    }
}

/// Byte-to-character offset conversion for non-decreasing byte indices,
/// counting each stretch of text once.
pub struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    /// Character offset of `byte_index`. Earlier indices than the last one
    /// asked for return the last offset.
    pub fn at(&mut self, byte_index: usize) -> usize {
        if byte_index > self.byte {
            if let Some(gap) = self.text.get(self.byte..byte_index) {
                self.chars += gap.chars().count();
                self.byte = byte_index;
            }
        }
        self.chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lines() {
        let lines = normalize_lines("  TESCO   EXPRESS \n\tTotal\t £4.50  ");
        assert_eq!(lines, vec!["TESCO EXPRESS", "Total £4.50"]);
    }

    #[test]
    fn test_line_lookup_first_match() {
        let lines = normalize_lines("Item 4.50\nTotal 4.50");
        let mut lookup = LineLookup::new(&lines);
        assert_eq!(lookup.containing("4.50"), Some("Item 4.50"));
        assert_eq!(lookup.containing("4.50"), Some("Item 4.50"));
        assert_eq!(lookup.containing("9.99"), None);
        assert_eq!(lookup.containing("  "), None);
    }

    #[test]
    fn test_line_lookup_collapses_needle() {
        let lines = normalize_lines("Paid   12.50  GBP");
        let mut lookup = LineLookup::new(&lines);
        assert_eq!(lookup.containing("12.50  GBP"), Some("Paid 12.50 GBP"));
    }

    #[test]
    fn test_char_offsets_multibyte() {
        let text = "££12 €3";
        let mut offsets = CharOffsets::new(text);
        assert_eq!(offsets.at(0), 0);
        assert_eq!(offsets.at(4), 2);
        assert_eq!(offsets.at(4), 2);
        assert_eq!(offsets.at(7), 5);
        assert_eq!(offsets.at(10), 6);
    }
}

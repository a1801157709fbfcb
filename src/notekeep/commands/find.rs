//! Find-in-note: every case-insensitive occurrence of a query in one note's
//! content, with a cursor that wraps in both directions.
//!
//! Offsets are char positions in the lowercased content, in document order.
//! Overlapping occurrences count separately ("aa" occurs twice in "aaa").

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCursor {
    query: String,
    offsets: Vec<usize>,
    current: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl MatchCursor {
    pub fn new(content: &str, query: &str) -> Self {
        Self {
            query: query.to_string(),
            offsets: match_offsets(content, query),
            current: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn total(&self) -> usize {
        self.offsets.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.offsets.is_empty()).then_some(self.current)
    }

    /// Char range of the current match, for the editor's selection.
    pub fn current_range(&self) -> Option<Range<usize>> {
        let start = *self.offsets.get(self.current)?;
        Some(start..start + self.query.chars().count())
    }

    pub fn step(&mut self, direction: Direction) -> Option<Range<usize>> {
        let total = self.offsets.len();
        if total == 0 {
            return None;
        }
        self.current = match direction {
            Direction::Next => (self.current + 1) % total,
            Direction::Previous => (self.current + total - 1) % total,
        };
        self.current_range()
    }
}

pub fn match_offsets(content: &str, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack = content.to_lowercase();
    let needle = query.to_lowercase();

    let mut offsets = Vec::new();
    let mut byte_start = 0;
    let mut chars_before = 0;
    let mut counted_to = 0;

    while let Some(pos) = haystack[byte_start..].find(&needle) {
        let at = byte_start + pos;
        chars_before += haystack[counted_to..at].chars().count();
        counted_to = at;
        offsets.push(chars_before);

        // Step one char so overlapping matches are found.
        let width = haystack[at..].chars().next().map_or(1, char::len_utf8);
        byte_start = at + width;
    }

    offsets
}

//! Whole-word literal matching.
//!
//! Each configured word is escaped and matched as a literal, so `a.b` never
//! matches `axb`. A candidate only counts when both of its ends sit on a word
//! boundary: a place where the character class (alphanumeric or `_` vs.
//! anything else) changes, or the start or end of the text. That keeps `cat`
//! from matching inside `category`.
//!
//! The scan is leftmost-first and never returns overlapping matches. A
//! rejected candidate resumes the search one character after its start.

use regex::Regex;
use wordlight_buffer::CharRange;

/// Word-constituent characters.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A boundary exists between `before` and `after` when their classes differ.
/// The start and end of the text always count as a boundary.
fn is_boundary(before: Option<char>, after: Option<char>) -> bool {
    match (before, after) {
        (Some(b), Some(a)) => is_word_char(b) != is_word_char(a),
        _ => true,
    }
}

/// A compiled matcher for one configured word.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    word: String,
    regex: Regex,
    char_len: usize,
}

impl WordMatcher {
    /// Compiles a matcher for `word`.
    ///
    /// Fails only when the escaped pattern exceeds the regex size limit.
    pub fn new(word: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            word: word.to_string(),
            regex: Regex::new(&regex::escape(word))?,
            char_len: word.chars().count(),
        })
    }

    /// The word this matcher looks for.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns every whole-token occurrence in `text` as character ranges.
    ///
    /// Ranges are in ascending order and never overlap.
    pub fn find_all(&self, text: &str) -> Vec<CharRange> {
        let mut ranges = Vec::new();
        let (Some(first), Some(last)) = (self.word.chars().next(), self.word.chars().next_back())
        else {
            return ranges;
        };

        // Byte offsets from the regex are turned into character offsets by
        // counting only the gap since the previous candidate.
        let mut byte_cursor = 0;
        let mut char_cursor = 0;
        let mut search_from = 0;

        while let Some(m) = self.regex.find_at(text, search_from) {
            char_cursor += text[byte_cursor..m.start()].chars().count();
            byte_cursor = m.start();

            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if is_boundary(before, Some(first)) && is_boundary(Some(last), after) {
                ranges.push(CharRange::new(char_cursor, char_cursor + self.char_len));
                search_from = m.end();
            } else {
                search_from = m.start() + first.len_utf8();
            }
        }

        tracing::trace!(word = %self.word, matches = ranges.len(), "scanned");
        ranges
    }
}

/// Finds all whole-token occurrences of `word` in `text`.
///
/// Convenience for one-off scans; an empty word or an uncompilable pattern
/// yields no matches.
pub fn find_occurrences(text: &str, word: &str) -> Vec<CharRange> {
    if word.is_empty() {
        return Vec::new();
    }
    match WordMatcher::new(word) {
        Ok(matcher) => matcher.find_all(text),
        Err(err) => {
            tracing::warn!(word, %err, "Cannot build matcher");
            Vec::new()
        }
    }
}

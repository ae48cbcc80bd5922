//! Document text backed by a rope.
//!
//! ## Why Rope?
//!
//! Highlights are recomputed on every keystroke, and each match offset has to
//! be turned into a line/column position. A rope answers `char_to_line` in
//! O(log n), so converting every match stays cheap even for long documents.

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::{BufferError, BufferResult, Position};

/// A text buffer backed by a rope data structure.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Associated file path (if any)
    file_path: Option<PathBuf>,
}

impl TextBuffer {
    /// Loads a buffer from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        Ok(Self {
            rope: Rope::from_str(&content),
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Replaces the whole content with the file's current content.
    ///
    /// Used when the file changes on disk underneath us.
    pub fn reload(&mut self) -> BufferResult<()> {
        let path = self.file_path.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No file path set")
        })?;
        let content = std::fs::read_to_string(&path)?;
        self.rope = Rope::from_str(&content);
        Ok(())
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    ///
    /// # Learning: Cow (Clone-on-Write)
    ///
    /// For small buffers, this returns a borrowed reference (cheap).
    /// For large buffers spanning multiple rope chunks, it allocates.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a slice of text by character range.
    pub fn slice(&self, range: Range<usize>) -> BufferResult<Cow<'_, str>> {
        if range.start > range.end {
            return Err(BufferError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        Ok(self.rope.slice(range).into())
    }

    // ==================== Measurements ====================

    /// Returns the number of characters (Unicode scalar values) in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines in the buffer.
    ///
    /// An empty buffer has 1 line. A buffer ending with `\n` counts
    /// the empty line after it.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Replaces the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    // ==================== Position Conversion ====================

    /// Converts a Position (line, column) to a character index.
    pub fn position_to_char_idx(&self, pos: Position) -> BufferResult<usize> {
        if pos.line >= self.len_lines() {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        let line_start = self.rope.line_to_char(pos.line);
        let line_len = self.rope.line(pos.line).len_chars();

        // The column just past the last character is still valid
        if pos.column > line_len {
            return Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            });
        }

        Ok(line_start + pos.column)
    }

    /// Converts a character index to a Position (line, column).
    ///
    /// The end-of-text offset is valid and maps to the position after the
    /// last character.
    pub fn char_idx_to_position(&self, char_idx: usize) -> BufferResult<Position> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        Ok(self.position_at(char_idx))
    }

    /// Like [`char_idx_to_position`](Self::char_idx_to_position), but offsets
    /// past the end clamp to the end of the text instead of failing.
    pub fn position_at(&self, char_idx: usize) -> Position {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        Position {
            line,
            column: char_idx - self.rope.line_to_char(line),
        }
    }

    /// Returns the associated file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            file_path: None,
        }
    }
}

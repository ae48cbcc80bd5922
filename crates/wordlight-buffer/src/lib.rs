//! # Wordlight Buffer
//!
//! Document text backed by a rope data structure.
//!
//! ## Key Concepts
//!
//! ### Offsets vs Positions
//! - Offsets are linear character indices into the whole text
//! - Positions are 0-indexed line/column pairs, used by renderers
//! - `TextBuffer` converts between them in O(log n)
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns the rope
//! - `text()` borrows when the rope is a single chunk
//! - Replacing the content requires `&mut self`

mod buffer;
mod position;
mod range;

pub use buffer::TextBuffer;
pub use position::Position;
pub use range::{CharRange, PositionRange};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_from_string() {
        let buffer = TextBuffer::from("// TODO: fix");
        assert_eq!(buffer.len_chars(), 12);
        assert_eq!(buffer.text(), "// TODO: fix");
    }

    #[test]
    fn test_match_offsets_to_positions() {
        let buffer = TextBuffer::from("// TODO: fix\nfunc TODOList(){}");
        let range = PositionRange::new(buffer.position_at(18), buffer.position_at(22));
        assert_eq!(range.start, Position::new(1, 5));
        assert_eq!(range.end, Position::new(1, 9));
        assert_eq!(range.to_string(), "2:6-2:10");
    }

    #[test]
    fn test_error_messages() {
        let err = BufferError::PositionOutOfBounds { line: 3, column: 9 };
        assert_eq!(err.to_string(), "Position 3:9 is out of bounds");
    }
}

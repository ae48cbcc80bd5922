//! Recomputing highlight ranges.
//!
//! Every trigger rescans the whole document for every configured word.
//! Nothing is cached between runs and results are never diffed; the
//! renderer replaces each style's ranges wholesale.

use std::borrow::Cow;

use wordlight_buffer::{CharRange, Position, PositionRange, TextBuffer};

use crate::mapping::WordColorMapping;
use crate::matcher::{find_occurrences, WordMatcher};
use crate::store::ConfigStore;
use crate::style::{Renderer, StyleHandle};

/// Read access to a document, as the host provides it.
pub trait DocumentSource {
    /// Current full text.
    fn text(&self) -> Cow<'_, str>;

    /// Converts a character offset into a line/column position.
    ///
    /// Offsets past the end clamp to the end of the document.
    fn position_at(&self, offset: usize) -> Position;
}

impl DocumentSource for TextBuffer {
    fn text(&self) -> Cow<'_, str> {
        TextBuffer::text(self)
    }

    fn position_at(&self, offset: usize) -> Position {
        TextBuffer::position_at(self, offset)
    }
}

/// Occurrences of one word in one document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    pub word: String,
    pub color: String,
    pub ranges: Vec<CharRange>,
}

/// Computes the highlight requests for `text` under `mapping`.
///
/// One request per configured word, in mapping order, including words with
/// no occurrence so that their stale highlights get cleared.
pub fn compute(text: &str, mapping: &WordColorMapping) -> Vec<HighlightRequest> {
    mapping
        .iter()
        .map(|(word, color)| HighlightRequest {
            word: word.to_string(),
            color: color.to_string(),
            ranges: find_occurrences(text, word),
        })
        .collect()
}

/// Ranges for one live style, ready to hand to the renderer.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    pub handle: &'a StyleHandle,
    pub word: &'a str,
    pub ranges: Vec<PositionRange>,
}

/// Scans `document` with every styled word in `store`.
///
/// The result borrows the store, not the document, so the caller is free to
/// hand it to a renderer that also owns the document.
pub fn recompute<'a, D>(store: &'a ConfigStore, document: &D) -> Vec<RenderRequest<'a>>
where
    D: DocumentSource + ?Sized,
{
    if store.is_empty() {
        return Vec::new();
    }

    let text = document.text();
    store
        .styles()
        .iter()
        .map(|styled| RenderRequest {
            handle: styled.handle(),
            word: styled.word(),
            ranges: to_positions(styled.matcher(), &text, document),
        })
        .collect()
}

/// Sends every request to the renderer. Returns the total range count.
pub fn render<R>(requests: &[RenderRequest<'_>], renderer: &mut R) -> usize
where
    R: Renderer + ?Sized,
{
    let mut total = 0;
    for request in requests {
        renderer.set_highlights(request.handle, &request.ranges);
        total += request.ranges.len();
    }
    tracing::debug!(styles = requests.len(), ranges = total, "Rendered highlights");
    total
}

fn to_positions<D>(matcher: &WordMatcher, text: &str, document: &D) -> Vec<PositionRange>
where
    D: DocumentSource + ?Sized,
{
    matcher
        .find_all(text)
        .into_iter()
        .map(|range| {
            PositionRange::new(
                document.position_at(range.start),
                document.position_at(range.end),
            )
        })
        .collect()
}

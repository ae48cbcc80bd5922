//! Render styles and the host rendering service.
//!
//! ## Learning: Ownership as a Resource Contract
//!
//! A [`StyleHandle`] is deliberately neither `Clone` nor `Copy`.
//! [`Renderer::release_style`] takes it by value, so once a handle has
//! been released the compiler refuses any further use of it. Releasing the
//! same handle twice cannot be written.

use serde::{Deserialize, Serialize};
use wordlight_buffer::PositionRange;

/// Lane of the scrollbar overview ruler where a marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverviewRulerLane {
    Left,
    Center,
    #[default]
    Right,
    Full,
}

/// Visual description of a highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Background color of highlighted text
    pub background_color: String,
    /// Marker color in the overview ruler
    pub overview_ruler_color: String,
    /// Marker lane in the overview ruler
    pub overview_ruler_lane: OverviewRulerLane,
}

impl RenderStyle {
    /// Style used for a configured word: the color paints both the
    /// background and the overview ruler marker.
    pub fn for_color(color: &str) -> Self {
        Self {
            background_color: color.to_string(),
            overview_ruler_color: color.to_string(),
            overview_ruler_lane: OverviewRulerLane::Right,
        }
    }
}

/// Opaque handle to a style created by the host.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StyleHandle(u64);

impl StyleHandle {
    /// Wraps a host-assigned identifier. Only renderers create handles.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for StyleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "style#{}", self.0)
    }
}

/// Host rendering service.
pub trait Renderer {
    /// Allocates a host style.
    fn create_style(&mut self, style: &RenderStyle) -> StyleHandle;

    /// Marks `ranges` in the active document with `handle`'s style,
    /// replacing whatever that style marked before. An empty slice clears it.
    fn set_highlights(&mut self, handle: &StyleHandle, ranges: &[PositionRange]);

    /// Frees a host style. Its highlights disappear with it.
    fn release_style(&mut self, handle: StyleHandle);
}

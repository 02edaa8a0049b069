use glam::Vec2;

use super::LabelElement;

/// Approximate glyph advance used to size text labels, in pixels.
const GLYPH_WIDTH: f32 = 7.0;
/// Label height in pixels.
const LINE_HEIGHT: f32 = 18.0;
/// Horizontal padding on each side.
const PADDING: f32 = 6.0;

/// In-memory label element: remembers where it was placed and whether it
/// is shown. The renderer draws these as screen-space markers.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLabel {
    position: Vec2,
    size: Vec2,
    visible: bool,
}

impl OverlayLabel {
    /// A visible element of fixed `size` at the origin.
    #[must_use]
    pub fn new(size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            size,
            visible: true,
        }
    }

    /// An element sized to fit `text` on one line.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        let width = text.chars().count() as f32 * GLYPH_WIDTH + 2.0 * PADDING;
        Self::new(Vec2::new(width, LINE_HEIGHT))
    }

    /// Top-left corner in pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the element is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl LabelElement for OverlayLabel {
    fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn rendered_size(&self) -> Vec2 {
        self.size
    }
}

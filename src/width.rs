//! Per-line width policies.

/// The width available to each line of a paragraph, as a pure function of
/// the line index.
pub trait LineWidthPolicy {
    /// The total width of the given line.
    fn width_at(&self, line: usize) -> f32;

    /// The smallest *available* width over all lines. Used to decide
    /// whether a word can fit anywhere in the paragraph at all.
    fn min_width(&self) -> f32;

    /// Reserved space at the line start.
    fn left_padding(&self, _line: usize) -> f32 {
        0.0
    }

    /// Reserved space at the line end.
    fn right_padding(&self, _line: usize) -> f32 {
        0.0
    }

    /// The width usable for text on the given line.
    fn available(&self, line: usize) -> f32 {
        self.width_at(line) - self.left_padding(line) - self.right_padding(line)
    }
}

/// A policy that gives every line the same width with no padding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectangleWidth {
    width: f32,
}

impl RectangleWidth {
    /// Creates a constant-width policy.
    pub fn new(width: f32) -> Self {
        Self { width }
    }
}

impl LineWidthPolicy for RectangleWidth {
    fn width_at(&self, _line: usize) -> f32 {
        self.width
    }

    fn min_width(&self) -> f32 {
        self.width
    }
}

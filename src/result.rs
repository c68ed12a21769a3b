//! The output of a line breaking pass.

use crate::hyphenate::HyphenEdit;

/// The lines chosen by a breaker, in buffer order.
///
/// The three vectors are parallel: entry `i` describes the line ending at
/// `break_points[i]`. Line `i` spans from the previous break point (or
/// zero) to `break_points[i]`; its reported width excludes trailing
/// collapsible whitespace but includes any hyphen the edits add.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineBreakResult {
    /// The exclusive end offset of each line, in UTF-16 code units.
    pub break_points: Vec<usize>,
    /// The rendered width of each line.
    pub widths: Vec<f32>,
    /// The hyphen edits applied to each line.
    pub hyphen_edits: Vec<HyphenEdit>,
}

impl LineBreakResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The number of lines.
    pub fn len(&self) -> usize {
        self.break_points.len()
    }

    /// Whether no lines were produced. True only for an empty buffer.
    pub fn is_empty(&self) -> bool {
        self.break_points.is_empty()
    }

    pub(crate) fn push(&mut self, offset: usize, width: f32, edit: HyphenEdit) {
        debug_assert!(
            self.break_points.last().map_or(true, |&prev| prev < offset),
            "break points must be strictly increasing"
        );
        self.break_points.push(offset);
        self.widths.push(width);
        self.hyphen_edits.push(edit);
    }
}

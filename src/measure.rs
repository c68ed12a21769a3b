//! Measured text runs.
//!
//! A [`MeasuredText`] couples a UTF-16 buffer's per-code-unit advance
//! widths with the [`Run`]s that produced them and, optionally, with
//! precomputed hyphenation opportunities for every word. It is built once
//! and then shared read-only across any number of breaking calls.

use std::fmt::{self, Debug, Formatter};
use std::ops::Range;

use crate::breakpoint::{self, Boundary};
use crate::hyphenate::{
    repeats_hyphen, EndHyphenEdit, HyphenBreak, HyphenatorMap, StartHyphenEdit,
};
use crate::locale::{LocaleCache, LocaleId};

/// A contiguous sub-range of the buffer measured with one policy.
///
/// Runs are immutable after construction and must tolerate measurement
/// queries for ranges that extend past their own range: hyphenation of a
/// word straddling a run boundary is keyed to the run containing the
/// word's start.
pub trait Run: Send + Sync {
    /// The buffer range this run covers.
    fn range(&self) -> Range<usize>;

    /// The interned locale list for this run.
    fn locale(&self) -> LocaleId;

    /// Whether the run's text is right-to-left.
    fn is_rtl(&self) -> bool {
        false
    }

    /// Whether words in this run may be hyphenated.
    fn can_hyphenate(&self) -> bool {
        true
    }

    /// The text size, used to scale layout penalties.
    fn size(&self) -> f32;

    /// Fills `out` with the advance width of each code unit in `range`.
    ///
    /// Continuation units of a cluster (e.g. low surrogates) must report
    /// zero so that clusters stay atomic for breaking.
    fn advances(&self, buffer: &[u16], range: Range<usize>, out: &mut [f32]);

    /// The width of `range` rendered with the given hyphen edits.
    ///
    /// This must be answered by the run because the hyphen glyph's width
    /// depends on the font and locale, not on a constant.
    fn hyphen_piece_width(
        &self,
        buffer: &[u16],
        range: Range<usize>,
        start: StartHyphenEdit,
        end: EndHyphenEdit,
    ) -> f32;
}

/// A run that measures every code unit at one fixed width.
///
/// The hyphen glyph is measured at the same width. Low surrogates report
/// zero so surrogate pairs act as a single cluster. This is the minimal
/// conforming [`Run`] and the reference for the measurement contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantRun {
    range: Range<usize>,
    locale: LocaleId,
    char_width: f32,
}

impl ConstantRun {
    /// Creates a constant-width run.
    pub fn new(range: Range<usize>, locale: LocaleId, char_width: f32) -> Self {
        assert!(range.start <= range.end, "invalid run range");
        assert!(char_width >= 0.0, "negative advance width");
        Self { range, locale, char_width }
    }

    fn unit_width(&self, buffer: &[u16], offset: usize) -> f32 {
        // A low surrogate continues the cluster started by its high
        // surrogate and carries no advance of its own.
        if (0xDC00..0xE000).contains(&buffer[offset]) {
            0.0
        } else {
            self.char_width
        }
    }
}

impl Run for ConstantRun {
    fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    fn locale(&self) -> LocaleId {
        self.locale
    }

    fn size(&self) -> f32 {
        self.char_width
    }

    fn advances(&self, buffer: &[u16], range: Range<usize>, out: &mut [f32]) {
        for (slot, offset) in out.iter_mut().zip(range) {
            *slot = self.unit_width(buffer, offset);
        }
    }

    fn hyphen_piece_width(
        &self,
        buffer: &[u16],
        range: Range<usize>,
        start: StartHyphenEdit,
        end: EndHyphenEdit,
    ) -> f32 {
        let mut width: f32 = range
            .clone()
            .map(|offset| self.unit_width(buffer, offset))
            .sum();
        if start == StartHyphenEdit::InsertHyphen {
            width += self.char_width;
        }
        if end == EndHyphenEdit::InsertHyphen {
            width += self.char_width;
        }
        width
    }
}

/// An intra-word break opportunity located in the buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct HyphenationPoint {
    /// The absolute buffer offset of the break.
    pub offset: usize,
    /// The edit for the line ending at this break.
    pub end: EndHyphenEdit,
    /// The edit for the line starting at this break.
    pub start: StartHyphenEdit,
}

/// An ordered sequence of runs covering a buffer, with precomputed
/// advances and (optionally) hyphenation opportunities.
pub struct MeasuredText {
    runs: Vec<Box<dyn Run>>,
    advances: Vec<f32>,
    /// Cumulative advance widths; `cumulative[i]` is the width of
    /// `[0, i)`. Accumulated in `f64` so long paragraphs stay exact
    /// enough for byte-stable breaking.
    cumulative: Vec<f64>,
    /// All hyphenation opportunities, sorted by offset.
    hyphenations: Vec<HyphenationPoint>,
}

impl MeasuredText {
    /// The number of code units covered.
    pub fn len(&self) -> usize {
        self.advances.len()
    }

    /// Whether the measured range is empty.
    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }

    /// The advance width of each code unit.
    pub fn advances(&self) -> &[f32] {
        &self.advances
    }

    /// The summed advance width of a sub-range.
    pub fn width_of(&self, range: Range<usize>) -> f32 {
        assert!(range.start <= range.end && range.end <= self.len(), "range out of bounds");
        (self.cumulative[range.end] - self.cumulative[range.start]) as f32
    }

    /// The width of `[0, offset)` as an `f64` running sum.
    pub(crate) fn prefix(&self, offset: usize) -> f64 {
        self.cumulative[offset]
    }

    /// The runs, in buffer order.
    pub(crate) fn runs(&self) -> &[Box<dyn Run>] {
        &self.runs
    }

    /// The run containing the given offset.
    pub(crate) fn run_at(&self, offset: usize) -> &dyn Run {
        debug_assert!(offset < self.len());
        let index = self
            .runs
            .partition_point(|run| run.range().end <= offset);
        self.runs[index].as_ref()
    }

    /// The hyphenation opportunities with offsets in the given range.
    pub(crate) fn hyphenations_in(&self, range: Range<usize>) -> &[HyphenationPoint] {
        if range.start >= range.end {
            return &[];
        }
        let lo = self.hyphenations.partition_point(|p| p.offset < range.start);
        let hi = self.hyphenations.partition_point(|p| p.offset < range.end);
        &self.hyphenations[lo..hi]
    }
}

impl Debug for MeasuredText {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("MeasuredText")
            .field("len", &self.len())
            .field("runs", &self.runs.len())
            .field("hyphenations", &self.hyphenations.len())
            .finish()
    }
}

/// Builds a [`MeasuredText`] from custom runs.
#[derive(Default)]
pub struct MeasuredTextBuilder {
    runs: Vec<Box<dyn Run>>,
}

impl MeasuredTextBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run. Runs must be added in buffer order.
    pub fn add_custom_run(&mut self, run: impl Run + 'static) {
        self.runs.push(Box::new(run));
    }

    /// Measures the buffer and, if requested, precomputes hyphenation
    /// opportunities for every word.
    ///
    /// The runs must contiguously cover `[0, buffer.len())`; anything
    /// else is a caller bug and panics. `compute_full_layout` is accepted
    /// for API parity with layout consumers and has no effect here.
    pub fn build(
        self,
        buffer: &[u16],
        hyphenators: &HyphenatorMap,
        locales: &LocaleCache,
        compute_hyphenation: bool,
        compute_full_layout: bool,
    ) -> MeasuredText {
        let _ = compute_full_layout;
        let runs = self.runs;

        // The runs must partition the buffer.
        let mut expected = 0;
        for run in &runs {
            let range = run.range();
            assert!(
                range.start == expected && range.end >= range.start,
                "runs must contiguously cover the buffer"
            );
            expected = range.end;
        }
        assert!(expected == buffer.len(), "runs must cover the whole buffer");

        // Per-code-unit advances and their running sum.
        let mut advances = vec![0.0; buffer.len()];
        for run in &runs {
            let range = run.range();
            run.advances(buffer, range.clone(), &mut advances[range]);
        }

        let mut cumulative = Vec::with_capacity(buffer.len() + 1);
        let mut sum = 0.0f64;
        cumulative.push(sum);
        for &advance in &advances {
            assert!(advance >= 0.0, "negative advance width from a measurer");
            sum += advance as f64;
            cumulative.push(sum);
        }

        let mut measured = MeasuredText {
            runs,
            advances,
            cumulative,
            hyphenations: Vec::new(),
        };

        if compute_hyphenation {
            measured.hyphenations =
                compute_hyphenations(buffer, &measured, hyphenators, locales);
        }

        measured
    }
}

/// Collects the hyphenation opportunities of every word in the buffer.
fn compute_hyphenations(
    buffer: &[u16],
    measured: &MeasuredText,
    hyphenators: &HyphenatorMap,
    locales: &LocaleCache,
) -> Vec<HyphenationPoint> {
    let mut points = Vec::new();

    breakpoint::boundaries(buffer, |boundary: Boundary| {
        let word = boundary.word.clone();
        if word.is_empty() || !boundary.hyphenatable {
            return;
        }

        // Hyphenation inside a word is keyed by the run containing the
        // word's start, even if the word straddles a run boundary.
        let run = measured.run_at(word.start);
        if !run.can_hyphenate() {
            return;
        }
        let tag = locales.resolve(run.locale());

        // Hard hyphens already carry their glyph; breaking after one
        // needs no end edit, but some languages repeat the hyphen on the
        // next line.
        let hyphen = u16::from(b'-');
        for offset in word.clone() {
            if buffer[offset] == hyphen && offset + 1 < word.end {
                let rest = &buffer[offset + 1..word.end];
                let start = if repeats_hyphen(tag, rest) {
                    StartHyphenEdit::InsertHyphen
                } else {
                    StartHyphenEdit::NoEdit
                };
                points.push(HyphenationPoint {
                    offset: offset + 1,
                    end: EndHyphenEdit::NoEdit,
                    start,
                });
            }
        }

        // Pattern breaks from the registered hyphenator, if any is
        // present for this locale. Absence is a silent degrade.
        let Some(hyphenator) = hyphenators.get(tag) else { return };

        // Trim non-alphabetic affixes before consulting the patterns.
        // Surrogate pairs decode to one char, so astral letters count
        // both of their code units toward the core.
        let head: usize =
            char::decode_utf16(buffer[word.clone()].iter().copied())
                .map_while(Result::ok)
                .take_while(|c| c.is_alphabetic())
                .map(char::len_utf16)
                .sum();
        let core = word.start..word.start + head;
        if core.is_empty() {
            return;
        }

        for HyphenBreak { offset, end, start } in
            hyphenator.hyphenate(&buffer[core.clone()])
        {
            debug_assert!(offset > 0 && offset < core.len());
            points.push(HyphenationPoint {
                offset: core.start + offset,
                end,
                start,
            });
        }
    });

    points.sort_by_key(|p| p.offset);
    points.dedup_by_key(|p| p.offset);
    points
}

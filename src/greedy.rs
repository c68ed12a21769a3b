//! First-fit line breaking.
//!
//! The greedy breaker walks the paragraph's break opportunities once,
//! packing as many words as fit onto each line and breaking at the last
//! opportunity that still fit. When even a single word overflows a fresh
//! line, it falls back to hyphenation and then to per-cluster emergency
//! breaks. This is the fast path: a single pass, no lookahead.

use crate::breakpoint::{self, Boundary, TAB};
use crate::hyphenate::{EndHyphenEdit, HyphenEdit, StartHyphenEdit};
use crate::measure::MeasuredText;
use crate::result::LineBreakResult;
use crate::tabs::TabStops;
use crate::width::LineWidthPolicy;

/// Absorbs rounding drift between `f64` running sums and `f32` widths.
const FIT_TOLERANCE: f64 = 1e-4;

/// Breaks a paragraph into lines, first-fit.
///
/// Tabs advance the pen to the next stop in `tab_stops` and act as break
/// opportunities like spaces. When `do_hyphenation` is false, overlong
/// words skip straight to emergency breaking. A non-positive available
/// width puts every word on its own line.
pub fn break_line_greedy(
    buffer: &[u16],
    measured: &MeasuredText,
    policy: &dyn LineWidthPolicy,
    tab_stops: &TabStops,
    do_hyphenation: bool,
) -> LineBreakResult {
    assert!(
        measured.len() == buffer.len(),
        "measured text does not match the buffer"
    );

    let mut boundaries = Vec::new();
    breakpoint::boundaries(buffer, |b| boundaries.push(b));

    let mut result = LineBreakResult::new();
    let mut line = LineState::fresh(0);

    let mut i = 0;
    while i < boundaries.len() {
        let boundary = &boundaries[i];
        let frag_start = line.start.max(boundary.word.start);
        let frag_width = measured.width_of(frag_start..boundary.word.end) as f64;
        let content = line.pen + frag_width;
        let available = policy.available(result.len()) as f64;

        // Degenerate lines still make progress: a word that can never
        // fit is accepted alone and broken off by the next word.
        let forced = available <= 0.0 && line.last_fit.is_none();

        if content <= available + FIT_TOLERANCE || forced {
            line.accept(boundary, content, buffer, measured, tab_stops);
            if boundary.mandatory {
                line.flush(&mut result);
                line = LineState::fresh(boundary.end);
            }
            i += 1;
            continue;
        }

        // Overflow. Break at the last opportunity on this line, if any,
        // and retry the word on a fresh line.
        if let Some((offset, width)) = line.last_fit {
            result.push(offset, width, HyphenEdit { start: line.start_edit, end: EndHyphenEdit::NoEdit });
            line = LineState::fresh(offset);
            continue;
        }

        // The word alone overflows a fresh line. Try to hyphenate it,
        // taking the widest piece that fits.
        if do_hyphenation {
            let run = measured.run_at(frag_start);
            let mut chosen = None;
            for point in measured.hyphenations_in(frag_start + 1..boundary.word.end) {
                let piece = run.hyphen_piece_width(
                    buffer,
                    frag_start..point.offset,
                    line.start_edit,
                    point.end,
                ) as f64;
                if piece <= available + FIT_TOLERANCE {
                    chosen = Some((point, piece as f32));
                }
            }
            if let Some((point, width)) = chosen {
                result.push(
                    point.offset,
                    width,
                    HyphenEdit { start: line.start_edit, end: point.end },
                );
                line = LineState::restart(point.offset, point.start, buffer, measured);
                continue;
            }
        }

        // Emergency break: pack whole clusters, at least one per line.
        let k = pack_clusters(measured, frag_start, boundary.word.end, line.pen, available);
        if k < boundary.word.end {
            let width = (line.pen + measured.width_of(frag_start..k) as f64) as f32;
            result.push(k, width, HyphenEdit { start: line.start_edit, end: EndHyphenEdit::NoEdit });
            line = LineState::restart(k, StartHyphenEdit::NoEdit, buffer, measured);
        } else {
            // Zero-advance continuation units made the fragment end up
            // fitting after all; treat it as accepted.
            line.accept(boundary, content, buffer, measured, tab_stops);
            if boundary.mandatory {
                line.flush(&mut result);
                line = LineState::fresh(boundary.end);
            }
            i += 1;
        }
    }

    result
}

/// The accumulator for the line currently being filled.
struct LineState {
    /// Where the line begins in the buffer.
    start: usize,
    /// The hyphen edit the previous break imposed on this line's start.
    start_edit: StartHyphenEdit,
    /// The pen position from the line start to the current word's start,
    /// including any start hyphen and all accepted words and whitespace.
    pen: f64,
    /// The best break so far: `(offset, width)` of the last accepted
    /// boundary, with the width measured at the word end.
    last_fit: Option<(usize, f32)>,
}

impl LineState {
    /// A line starting at a word boundary.
    fn fresh(start: usize) -> Self {
        Self {
            start,
            start_edit: StartHyphenEdit::NoEdit,
            pen: 0.0,
            last_fit: None,
        }
    }

    /// A line starting mid-word after a hyphenation or emergency break.
    fn restart(
        start: usize,
        start_edit: StartHyphenEdit,
        buffer: &[u16],
        measured: &MeasuredText,
    ) -> Self {
        let pen = if start_edit == StartHyphenEdit::InsertHyphen {
            let run = measured.run_at(start);
            run.hyphen_piece_width(buffer, start..start, start_edit, EndHyphenEdit::NoEdit)
                as f64
        } else {
            0.0
        };
        Self { start, start_edit, pen, last_fit: None }
    }

    /// Records a word as accepted and advances the pen over its trailing
    /// whitespace, jumping at tabs.
    fn accept(
        &mut self,
        boundary: &Boundary,
        content: f64,
        buffer: &[u16],
        measured: &MeasuredText,
        tab_stops: &TabStops,
    ) {
        self.last_fit = Some((boundary.end, content as f32));
        let mut pen = content;
        for offset in boundary.word.end..boundary.end {
            if buffer[offset] == TAB {
                pen = tab_stops.next_stop(pen as f32) as f64;
            } else {
                pen += measured.advances()[offset] as f64;
            }
        }
        self.pen = pen;
    }

    /// Emits the line at its recorded best break.
    fn flush(&mut self, result: &mut LineBreakResult) {
        if let Some((offset, width)) = self.last_fit.take() {
            result.push(
                offset,
                width,
                HyphenEdit { start: self.start_edit, end: EndHyphenEdit::NoEdit },
            );
        }
    }
}

/// The largest cluster-aligned offset in `(start, end]` whose prefix
/// still fits, but never less than one cluster.
///
/// A cluster is a code unit plus any zero-advance continuation units
/// after it, so surrogate pairs and combining marks stay intact.
fn pack_clusters(
    measured: &MeasuredText,
    start: usize,
    end: usize,
    pen: f64,
    available: f64,
) -> usize {
    let advances = measured.advances();
    let next_cluster = |mut i: usize| {
        i += 1;
        while i < end && advances[i] == 0.0 {
            i += 1;
        }
        i
    };

    let mut k = next_cluster(start);
    loop {
        let next = next_cluster(k);
        if next > end || k >= end {
            break;
        }
        if pen + measured.width_of(start..next) as f64 <= available + FIT_TOLERANCE {
            k = next;
        } else {
            break;
        }
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyphenate::HyphenatorMap;
    use crate::locale::LocaleCache;
    use crate::measure::{ConstantRun, MeasuredTextBuilder};
    use crate::width::RectangleWidth;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn measure(text: &str) -> MeasuredText {
        let buffer = utf16(text);
        let mut locales = LocaleCache::new();
        let en = locales.intern("en-US");
        let mut builder = MeasuredTextBuilder::new();
        builder.add_custom_run(ConstantRun::new(0..buffer.len(), en, 10.0));
        builder.build(&buffer, &HyphenatorMap::new(), &locales, false, false)
    }

    fn run(text: &str, width: f32) -> LineBreakResult {
        let buffer = utf16(text);
        let measured = measure(text);
        break_line_greedy(
            &buffer,
            &measured,
            &RectangleWidth::new(width),
            &TabStops::new(vec![], 0.0),
            false,
        )
    }

    #[test]
    fn test_everything_fits() {
        let result = run("This is an example text.", 1000.0);
        assert_eq!(result.break_points, vec![24]);
        assert_eq!(result.widths, vec![240.0]);
    }

    #[test]
    fn test_wraps_at_spaces() {
        let result = run("This is an example text.", 80.0);
        assert_eq!(result.break_points, vec![8, 11, 19, 24]);
        assert_eq!(result.widths, vec![70.0, 20.0, 70.0, 50.0]);
    }

    #[test]
    fn test_tab_jumps_to_next_stop() {
        let buffer = utf16("a\tb");
        let measured = measure("a\tb");
        let result = break_line_greedy(
            &buffer,
            &measured,
            &RectangleWidth::new(1000.0),
            &TabStops::new(vec![], 100.0),
            false,
        );
        // One line; the tab's jump does not change the reported widths,
        // only where later words start. "b" still fits after the stop.
        assert_eq!(result.break_points, vec![3]);
    }

    #[test]
    fn test_emergency_break_without_hyphenation() {
        let result = run("abcdefgh", 30.0);
        assert_eq!(result.break_points, vec![3, 6, 8]);
        assert_eq!(result.widths, vec![30.0, 30.0, 20.0]);
    }

    #[test]
    fn test_zero_available_width_one_word_per_line() {
        let result = run("a b c", 0.0);
        assert_eq!(result.break_points, vec![2, 4, 5]);
        assert_eq!(result.widths, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_mandatory_newlines() {
        let result = run("ab\ncd\n\nef", 1000.0);
        assert_eq!(result.break_points, vec![3, 6, 7, 9]);
        assert_eq!(result.widths, vec![20.0, 20.0, 0.0, 20.0]);
    }

    #[test]
    fn test_trailing_whitespace_not_counted() {
        let result = run("ab   ", 1000.0);
        assert_eq!(result.break_points, vec![5]);
        assert_eq!(result.widths, vec![20.0]);
    }
}

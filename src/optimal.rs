//! Globally optimized line breaking.
//!
//! Instead of committing to the first break that fits, this breaker
//! enumerates every break opportunity as a candidate and runs a shortest
//! path search over them: the cost of a line is the squared deviation
//! from the available width, hyphenation and emergency breaks carry
//! penalties, and the cheapest total wins. The search is quadratic in the
//! number of candidates in the worst case, but an active window of still
//! reachable predecessors keeps typical paragraphs close to linear.

use crate::breakpoint::{self, Boundary};
use crate::hyphenate::{EndHyphenEdit, HyphenEdit, StartHyphenEdit};
use crate::measure::{MeasuredText, Run};
use crate::result::LineBreakResult;
use crate::width::LineWidthPolicy;

/// The cost of a line that overflows its available width.
const COST_OVERFULL: f64 = 1e12;

/// The cost of breaking inside a word without a hyphenation opportunity.
const COST_DESPERATE: f64 = 1e10;

/// How eagerly words may be hyphenated.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HyphenationFrequency {
    /// Never hyphenate; only emergency breaks split words.
    None,
    /// Use every opportunity the hyphenation data provides.
    #[default]
    Normal,
}

/// What the optimizer favors beyond fitting the lines.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BreakStrategy {
    /// Tight lines; the last line of a paragraph may be any length.
    #[default]
    HighQuality,
    /// Evens out line lengths, including the last line.
    Balanced,
}

/// A potential break position.
struct Candidate {
    /// The offset the next line would start at.
    offset: usize,
    /// Cumulative width up to this break as a line end: trailing
    /// whitespace excluded, an inserted end hyphen included.
    pre: f64,
    /// Cumulative width at which the next line starts: trailing
    /// whitespace consumed, an inserted start hyphen credited.
    post: f64,
    /// The intrinsic cost of breaking here.
    penalty: f64,
    /// Whether a break must be taken here.
    mandatory: bool,
    start: StartHyphenEdit,
    end: EndHyphenEdit,
}

/// A node in the shortest path table.
#[derive(Copy, Clone)]
struct Entry {
    /// The index of the best predecessor candidate.
    pred: usize,
    /// The total cost of the best breaking ending here.
    total: f64,
    /// The number of lines in that breaking.
    line: usize,
}

/// Breaks a paragraph into lines, minimizing the total cost.
///
/// `justified` does not justify anything here; it signals that a later
/// justification pass will absorb slack, which relaxes the hyphenation
/// penalty and drops the per-line penalty.
pub fn break_line_optimal(
    buffer: &[u16],
    measured: &MeasuredText,
    policy: &dyn LineWidthPolicy,
    strategy: BreakStrategy,
    frequency: HyphenationFrequency,
    justified: bool,
) -> LineBreakResult {
    assert!(
        measured.len() == buffer.len(),
        "measured text does not match the buffer"
    );
    if buffer.is_empty() {
        return LineBreakResult::new();
    }

    let hyphen_penalty = |run: &dyn Run| -> f64 {
        let mut penalty = 0.5 * run.size() as f64 * policy.available(0).max(0.0) as f64;
        if justified {
            penalty *= 0.25;
        }
        penalty
    };

    let line_penalty = if justified {
        0.0
    } else {
        2.0 * measured
            .runs()
            .iter()
            .map(|run| hyphen_penalty(run.as_ref()))
            .fold(0.0, f64::max)
    };

    let candidates = collect_candidates(buffer, measured, policy, frequency, hyphen_penalty);

    // Shortest path over the candidates. `active` is the first candidate
    // still worth considering as a predecessor: it advances past
    // predecessors whose lines have become overfull and jumps forward at
    // mandatory breaks, which no line may span.
    let mut entries = Vec::with_capacity(candidates.len());
    entries.push(Entry { pred: 0, total: 0.0, line: 0 });
    let mut active = 0;

    for j in 1..candidates.len() {
        let cand = &candidates[j];
        let mut best = Entry { pred: active, total: f64::INFINITY, line: 0 };

        for i in active..j {
            let prev: Entry = entries[i];
            let width = cand.pre - candidates[i].post;
            let delta = policy.available(prev.line) as f64 - width;

            let width_cost = if delta < 0.0 {
                if i == active {
                    active += 1;
                }
                COST_OVERFULL
            } else if cand.mandatory && strategy == BreakStrategy::HighQuality {
                0.0
            } else {
                delta * delta
            };

            // Two hyphenated lines in a row cost extra.
            let mut extra = 0.0;
            if candidates[i].end != EndHyphenEdit::NoEdit && cand.end != EndHyphenEdit::NoEdit {
                extra = 2.0 * cand.penalty;
            }

            // Ties go to the latest predecessor, which prefers pulling
            // content onto earlier lines.
            let total = prev.total + width_cost + extra;
            if total <= best.total {
                best = Entry { pred: i, total, line: prev.line + 1 };
            }
        }

        best.total += cand.penalty + line_penalty;
        entries.push(best);

        if cand.mandatory {
            active = j;
        }
    }

    // Walk the predecessor chain backwards from the final break.
    let mut chain = Vec::new();
    let mut j = candidates.len() - 1;
    while j != 0 {
        chain.push(j);
        j = entries[j].pred;
    }
    chain.reverse();

    let mut result = LineBreakResult::new();
    let mut prev = 0;
    for j in chain {
        let cand = &candidates[j];
        result.push(
            cand.offset,
            (cand.pre - candidates[prev].post) as f32,
            HyphenEdit { start: candidates[prev].start, end: cand.end },
        );
        prev = j;
    }
    result
}

/// Enumerates all break candidates in offset order, starting with a
/// sentinel for the paragraph start.
fn collect_candidates(
    buffer: &[u16],
    measured: &MeasuredText,
    policy: &dyn LineWidthPolicy,
    frequency: HyphenationFrequency,
    hyphen_penalty: impl Fn(&dyn Run) -> f64,
) -> Vec<Candidate> {
    let mut candidates = vec![Candidate {
        offset: 0,
        pre: 0.0,
        post: 0.0,
        penalty: 0.0,
        mandatory: false,
        start: StartHyphenEdit::NoEdit,
        end: EndHyphenEdit::NoEdit,
    }];

    let min_width = policy.min_width() as f64;

    breakpoint::boundaries(buffer, |boundary: Boundary| {
        let word = boundary.word.clone();

        let hyphenations = if frequency != HyphenationFrequency::None
            && boundary.hyphenatable
            && !word.is_empty()
            && measured.run_at(word.start).can_hyphenate()
        {
            measured.hyphenations_in(word.start + 1..word.end)
        } else {
            &[]
        };

        // Words wider than every line also get per-cluster emergency
        // candidates, so that some breaking always exists.
        let word_width = measured.prefix(word.end) - measured.prefix(word.start);
        let desperate = word_width > min_width;

        if !hyphenations.is_empty() || desperate {
            let run = measured.run_at(word.start);
            let penalty = hyphen_penalty(run);
            let mut points = hyphenations.iter().peekable();

            for offset in word.start + 1..word.end {
                if let Some(point) = points.next_if(|p| p.offset == offset) {
                    candidates.push(Candidate {
                        offset,
                        pre: measured.prefix(word.start)
                            + run.hyphen_piece_width(
                                buffer,
                                word.start..offset,
                                StartHyphenEdit::NoEdit,
                                point.end,
                            ) as f64,
                        post: measured.prefix(word.end)
                            - run.hyphen_piece_width(
                                buffer,
                                offset..word.end,
                                point.start,
                                EndHyphenEdit::NoEdit,
                            ) as f64,
                        penalty,
                        mandatory: false,
                        start: point.start,
                        end: point.end,
                    });
                } else if desperate && measured.advances()[offset] > 0.0 {
                    candidates.push(Candidate {
                        offset,
                        pre: measured.prefix(offset),
                        post: measured.prefix(offset),
                        penalty: COST_DESPERATE,
                        mandatory: false,
                        start: StartHyphenEdit::NoEdit,
                        end: EndHyphenEdit::NoEdit,
                    });
                }
            }
        }

        candidates.push(Candidate {
            offset: boundary.end,
            pre: measured.prefix(word.end),
            post: measured.prefix(boundary.end),
            penalty: 0.0,
            mandatory: boundary.mandatory,
            start: StartHyphenEdit::NoEdit,
            end: EndHyphenEdit::NoEdit,
        });
    });

    candidates
}

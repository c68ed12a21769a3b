//! Shared fixtures for the breaker tests.

use std::sync::Arc;

use parabreak::{
    ConstantRun, EndHyphenEdit, HyphenBreak, Hyphenator, HyphenatorMap,
    LineBreakResult, LocaleCache, MeasuredText, MeasuredTextBuilder,
    StartHyphenEdit,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub const CHAR_WIDTH: f32 = 10.0;

pub fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// A hyphenator with hand-written break tables, so tests do not depend
/// on the details of real hyphenation patterns.
pub struct ScriptedHyphenator {
    table: FxHashMap<String, Vec<usize>>,
}

impl ScriptedHyphenator {
    pub fn new(entries: &[(&str, &[usize])]) -> Self {
        let table = entries
            .iter()
            .map(|(word, offsets)| (word.to_string(), offsets.to_vec()))
            .collect();
        Self { table }
    }
}

impl Hyphenator for ScriptedHyphenator {
    fn hyphenate(&self, word: &[u16]) -> SmallVec<[HyphenBreak; 4]> {
        let word = String::from_utf16_lossy(word).to_lowercase();
        match self.table.get(&word) {
            Some(offsets) => {
                offsets.iter().map(|&offset| HyphenBreak::regular(offset)).collect()
            }
            None => SmallVec::new(),
        }
    }
}

/// Measures `text` as a single constant-width run.
///
/// When a hyphenator is given it is registered for the locale's language
/// subtag and hyphenation opportunities are precomputed.
pub fn measure(
    text: &str,
    tag: &str,
    hyphenator: Option<Arc<dyn Hyphenator>>,
) -> (Vec<u16>, MeasuredText) {
    let buffer = utf16(text);
    let mut locales = LocaleCache::new();
    let locale = locales.intern(tag);

    let mut map = HyphenatorMap::new();
    if let Some(hyphenator) = hyphenator {
        let language = tag.split('-').next().unwrap_or(tag);
        map.insert(language, Some(hyphenator));
    }

    let mut builder = MeasuredTextBuilder::new();
    builder.add_custom_run(ConstantRun::new(0..buffer.len(), locale, CHAR_WIDTH));
    let measured = builder.build(&buffer, &map, &locales, true, false);
    (buffer, measured)
}

pub fn measure_english(text: &str) -> (Vec<u16>, MeasuredText) {
    measure(text, "en-US", None)
}

/// One expected line: its rendered text and width, with hyphen edits
/// shown as leading or trailing dashes in the text.
#[derive(Debug, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
}

pub fn line(text: &str, chars: f32) -> Line {
    Line { text: text.to_string(), width: chars * CHAR_WIDTH }
}

/// Renders the result the way a reader would see it: the buffer slice of
/// each line, with a `-` appended for an end hyphen edit and prepended
/// for a start hyphen edit.
pub fn render(buffer: &[u16], result: &LineBreakResult) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut prev = 0;
    for i in 0..result.len() {
        let end = result.break_points[i];
        let mut text = String::from_utf16_lossy(&buffer[prev..end]);
        let edit = result.hyphen_edits[i];
        if edit.start == StartHyphenEdit::InsertHyphen {
            text.insert(0, '-');
        }
        if edit.end == EndHyphenEdit::InsertHyphen {
            text.push('-');
        }
        lines.push(Line { text, width: result.widths[i] });
        prev = end;
    }
    lines
}

pub fn assert_lines(buffer: &[u16], result: &LineBreakResult, expected: &[Line]) {
    let actual = render(buffer, result);
    assert_eq!(
        actual.len(),
        expected.len(),
        "line count mismatch:\n  actual: {actual:?}\n  expected: {expected:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a.text, e.text, "line {i} text mismatch in {actual:?}");
        assert!(
            (a.width - e.width).abs() < 1e-3,
            "line {i} width mismatch: {} vs {} in {actual:?}",
            a.width,
            e.width
        );
    }
}

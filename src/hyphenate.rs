//! Hyphenation edits and the hyphenator capability.
//!
//! The engine never loads hyphenation patterns itself. It consumes a
//! [`Hyphenator`] capability that, for a single word, yields the offsets at
//! which the word may be split and which hyphen glyphs the two resulting
//! lines need. Hyphenators are registered per locale tag in a caller-owned
//! [`HyphenatorMap`].

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use ecow::EcoString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Whether a synthetic hyphen glyph is inserted at the start of a line.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StartHyphenEdit {
    /// The line starts with the text as-is.
    #[default]
    NoEdit,
    /// A hyphen glyph is rendered before the line's first cluster.
    InsertHyphen,
}

/// Whether a synthetic hyphen glyph is inserted at the end of a line.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EndHyphenEdit {
    /// The line ends with the text as-is.
    #[default]
    NoEdit,
    /// A hyphen glyph is rendered after the line's last cluster.
    InsertHyphen,
}

/// The pair of hyphen edits applied to one line.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HyphenEdit {
    /// The edit at the line start.
    pub start: StartHyphenEdit,
    /// The edit at the line end.
    pub end: EndHyphenEdit,
}

impl HyphenEdit {
    /// No edit on either side.
    pub const NONE: Self = Self {
        start: StartHyphenEdit::NoEdit,
        end: EndHyphenEdit::NoEdit,
    };

    /// Packs both edits into a single byte: the start edit in the bits
    /// above the low three, the end edit in the low three.
    pub fn packed(self) -> u8 {
        ((self.start as u8) << 3) | self.end as u8
    }
}

/// An intra-word break opportunity reported by a hyphenator.
///
/// The edits are relative to the two lines a break at `offset` would
/// create: `end` applies to the line ending at the break and `start` to
/// the line beginning there.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HyphenBreak {
    /// The break offset in UTF-16 code units, relative to the word start.
    pub offset: usize,
    /// The edit for the line ending at this break.
    pub end: EndHyphenEdit,
    /// The edit for the line starting at this break.
    pub start: StartHyphenEdit,
}

impl HyphenBreak {
    /// A regular pattern break: hyphen inserted at the end of the first
    /// piece, nothing at the start of the second.
    pub fn regular(offset: usize) -> Self {
        Self {
            offset,
            end: EndHyphenEdit::InsertHyphen,
            start: StartHyphenEdit::NoEdit,
        }
    }
}

/// Yields break opportunities inside a single word.
///
/// The word is given in UTF-16 code units with non-alphabetic affixes
/// already trimmed. Implementations must report offsets in strictly
/// increasing order, each within `1..word.len()`.
pub trait Hyphenator: Send + Sync {
    /// The break opportunities for `word`, in offset order.
    fn hyphenate(&self, word: &[u16]) -> SmallVec<[HyphenBreak; 4]>;
}

/// A caller-owned registry of hyphenators, keyed by locale tag.
///
/// A tag may be registered as vacant (`None`) to record that no
/// hyphenation data exists for it; lookups for vacant or unregistered
/// tags yield no hyphenator and the affected words simply produce no
/// hyphenation opportunities.
#[derive(Default, Clone)]
pub struct HyphenatorMap {
    map: FxHashMap<EcoString, Option<Arc<dyn Hyphenator>>>,
}

impl HyphenatorMap {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hyphenator (or a vacant entry) for a locale tag.
    pub fn insert(&mut self, tag: &str, hyphenator: Option<Arc<dyn Hyphenator>>) {
        self.map.insert(tag.into(), hyphenator);
    }

    /// Removes all registered hyphenators.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Looks up the hyphenator for a locale tag.
    ///
    /// Falls back from the full tag to its primary language subtag, so a
    /// hyphenator registered for `"en"` also serves `"en-US"`.
    pub fn get(&self, tag: &str) -> Option<&dyn Hyphenator> {
        if let Some(entry) = self.map.get(tag) {
            return entry.as_deref();
        }
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        self.map.get(language)?.as_deref()
    }
}

impl Debug for HyphenatorMap {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("HyphenatorMap")
            .field("tags", &self.map.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A hyphenator backed by `hypher`'s embedded TeX patterns.
#[derive(Debug, Copy, Clone)]
pub struct HypherHyphenator {
    lang: hypher::Lang,
}

impl HypherHyphenator {
    /// Creates a hyphenator for a locale tag, if `hypher` has patterns
    /// for its language.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        let bytes = language.as_bytes().try_into().ok()?;
        Some(Self { lang: hypher::Lang::from_iso(bytes)? })
    }
}

impl Hyphenator for HypherHyphenator {
    fn hyphenate(&self, word: &[u16]) -> SmallVec<[HyphenBreak; 4]> {
        let Ok(text) = String::from_utf16(word) else {
            return SmallVec::new();
        };

        let mut breaks = SmallVec::new();
        let mut offset = 0;
        for syllable in hypher::hyphenate(&text, self.lang) {
            offset += syllable.chars().map(char::len_utf16).sum::<usize>();
            if offset < word.len() {
                breaks.push(HyphenBreak::regular(offset));
            }
        }
        breaks
    }
}

/// Whether a line broken after a hard hyphen repeats the hyphen at the
/// start of the next line in the given language.
///
/// `rest` is the text following the break (the remainder of the word).
pub fn repeats_hyphen(tag: &str, rest: &[u16]) -> bool {
    let language = tag.split(['-', '_']).next().unwrap_or(tag);
    match language {
        // Lower Sorbian, Czech, Croatian, Polish, Portuguese and Slovak
        // orthographies repeat a hyphen broken at a line end.
        "dsb" | "cs" | "hr" | "pl" | "pt" | "sk" => true,
        // Spanish repeats it only if the continuation is not capitalized.
        "es" => rest
            .first()
            .and_then(|&unit| char::from_u32(unit as u32))
            .map(|c| !c.is_uppercase())
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_hypher_adapter() {
        let hyphenator = HypherHyphenator::from_tag("en-US").unwrap();
        let breaks = hyphenator.hyphenate(&utf16("hyphenation"));
        let offsets: Vec<_> = breaks.iter().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![2, 6]);
        assert!(breaks.iter().all(|b| b.end == EndHyphenEdit::InsertHyphen));
        assert!(breaks.iter().all(|b| b.start == StartHyphenEdit::NoEdit));
    }

    #[test]
    fn test_hypher_unknown_language() {
        assert!(HypherHyphenator::from_tag("zz-ZZ").is_none());
    }

    #[test]
    fn test_map_language_fallback() {
        let mut map = HyphenatorMap::new();
        map.insert("en", Some(Arc::new(HypherHyphenator::from_tag("en").unwrap())));
        map.insert("fr-FR", None);
        assert!(map.get("en-US").is_some());
        assert!(map.get("en").is_some());
        assert!(map.get("fr-FR").is_none());
        assert!(map.get("de").is_none());
        map.clear();
        assert!(map.get("en").is_none());
    }

    #[test]
    fn test_packed_edits() {
        assert_eq!(HyphenEdit::NONE.packed(), 0);
        let edit = HyphenEdit {
            start: StartHyphenEdit::InsertHyphen,
            end: EndHyphenEdit::InsertHyphen,
        };
        assert_eq!(edit.packed(), 0b1001);
    }

    #[test]
    fn test_repeated_hyphen_languages() {
        assert!(repeats_hyphen("pl", &utf16("niebieska")));
        assert!(repeats_hyphen("pt-BR", &utf16("feira")));
        assert!(!repeats_hyphen("en-US", &utf16("dog")));
        assert!(repeats_hyphen("es", &utf16("luego")));
        assert!(!repeats_hyphen("es", &utf16("Madrid")));
    }
}

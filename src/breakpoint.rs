//! Enumeration of break opportunities.
//!
//! A paragraph is scanned into [`Boundary`] records: one per break
//! opportunity, each carrying the word it closes, the position past the
//! word's trailing collapsible whitespace, and whether the break is
//! mandatory. URLs and emails receive a few extra intra-token
//! opportunities and are exempt from hyphenation.

use std::ops::Range;

const SPACE: u16 = b' ' as u16;
pub(crate) const TAB: u16 = b'\t' as u16;
const LINE_FEED: u16 = b'\n' as u16;
const CARRIAGE_RETURN: u16 = b'\r' as u16;

/// A single break opportunity.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Boundary {
    /// The word (or URL/email piece) this opportunity closes.
    pub word: Range<usize>,
    /// The offset past the word's trailing collapsible whitespace. This
    /// is where the next line would start if a break is taken here.
    pub end: usize,
    /// Whether a break must be taken here (newline or end of text).
    pub mandatory: bool,
    /// Whether the word may be hyphenated. False inside URLs/emails.
    pub hyphenatable: bool,
}

/// Whether a code unit is collapsible whitespace.
pub(crate) fn is_collapsible(unit: u16) -> bool {
    unit == SPACE || unit == TAB
}

/// Whether a code unit forces a line break.
fn is_newline(unit: u16) -> bool {
    unit == LINE_FEED || unit == CARRIAGE_RETURN
}

/// Whether a code unit splits words.
fn is_word_separator(unit: u16) -> bool {
    is_collapsible(unit) || is_newline(unit)
}

/// Breaks are allowed after these characters in URLs and emails.
fn breaks_after(unit: u16) -> bool {
    matches!(unit as u8 as char, ':' | '=' | '&') && unit < 0x80
}

/// Breaks are allowed before these characters in URLs and emails.
fn breaks_before(unit: u16) -> bool {
    unit < 0x80
        && matches!(
            unit as u8 as char,
            '~' | '.' | ',' | '-' | '_' | '?' | '#' | '%' | '=' | '&'
        )
}

/// Whether a token is an unhyphenatable URL or email.
fn is_url_or_email(token: &[u16]) -> bool {
    let colon = u16::from(b':');
    let slash = u16::from(b'/');
    let at = u16::from(b'@');
    token.windows(3).any(|w| w == [colon, slash, slash]) || token.contains(&at)
}

/// Calls `f` for every break opportunity in the buffer, in offset order.
///
/// This is an internal instead of an external iterator because it keeps
/// the scanner state machine simple and every consumer walks all
/// boundaries front to back anyway.
pub(crate) fn boundaries(buffer: &[u16], mut f: impl FnMut(Boundary)) {
    let len = buffer.len();
    let mut pos = 0;

    while pos < len {
        // The word: a maximal run of non-separator code units.
        let word_start = pos;
        while pos < len && !is_word_separator(buffer[pos]) {
            pos += 1;
        }
        let word_end = pos;
        let token = &buffer[word_start..word_end];
        let linkish = is_url_or_email(token);

        // Extra opportunities inside URLs/emails. Each closes its piece
        // immediately, with no trailing whitespace.
        let mut piece_start = word_start;
        if linkish {
            for i in word_start + 1..word_end {
                if breaks_after(buffer[i - 1]) || breaks_before(buffer[i]) {
                    f(Boundary {
                        word: piece_start..i,
                        end: i,
                        mandatory: false,
                        hyphenatable: false,
                    });
                    piece_start = i;
                }
            }
        }

        // Trailing collapsible whitespace, then an optional newline that
        // makes the break mandatory.
        while pos < len && is_collapsible(buffer[pos]) {
            pos += 1;
        }
        let mut mandatory = false;
        if pos < len && is_newline(buffer[pos]) {
            mandatory = true;
            let first = buffer[pos];
            pos += 1;
            if first == CARRIAGE_RETURN && pos < len && buffer[pos] == LINE_FEED {
                pos += 1;
            }
        }

        f(Boundary {
            word: piece_start..word_end,
            end: pos,
            mandatory: mandatory || pos == len,
            hyphenatable: !linkish,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn collect(text: &str) -> Vec<Boundary> {
        let buffer = utf16(text);
        let mut out = Vec::new();
        boundaries(&buffer, |b| out.push(b));
        out
    }

    #[test]
    fn test_simple_words() {
        let bounds = collect("ab cd");
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0].word, 0..2);
        assert_eq!(bounds[0].end, 3);
        assert!(!bounds[0].mandatory);
        assert_eq!(bounds[1].word, 3..5);
        assert_eq!(bounds[1].end, 5);
        assert!(bounds[1].mandatory);
    }

    #[test]
    fn test_mandatory_newlines() {
        let bounds = collect("a\n\nb");
        assert_eq!(bounds.len(), 3);
        assert!(bounds.iter().all(|b| b.mandatory));
        assert_eq!(bounds[0].word, 0..1);
        assert_eq!(bounds[0].end, 2);
        assert_eq!(bounds[1].word, 2..2);
        assert_eq!(bounds[1].end, 3);
        assert_eq!(bounds[2].word, 3..4);
    }

    #[test]
    fn test_crlf_is_one_break() {
        let bounds = collect("a\r\nb");
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0].end, 3);
    }

    #[test]
    fn test_tab_is_a_boundary() {
        let bounds = collect("a\tb");
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0].word, 0..1);
        assert_eq!(bounds[0].end, 2);
    }

    #[test]
    fn test_url_pieces() {
        let bounds = collect("see http://a.b now");
        let words: Vec<_> = bounds.iter().map(|b| b.word.clone()).collect();
        // "see ", "http:", "//a", ".b ", "now" with breaks after the
        // colon and before the dot.
        assert_eq!(words, vec![0..3, 4..9, 9..12, 12..14, 15..18]);
        assert!(bounds[1..4].iter().all(|b| !b.hyphenatable));
        assert!(bounds[0].hyphenatable && bounds[4].hyphenatable);
    }

    #[test]
    fn test_email_break_before_dot() {
        let bounds = collect("a@example.com");
        let words: Vec<_> = bounds.iter().map(|b| b.word.clone()).collect();
        assert_eq!(words, vec![0..9, 9..13]);
        assert!(bounds.iter().all(|b| !b.hyphenatable));
    }

    #[test]
    fn test_empty_buffer() {
        assert!(collect("").is_empty());
    }
}

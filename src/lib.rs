//! Paragraph line breaking over UTF-16 text.
//!
//! The crate takes a paragraph as a buffer of UTF-16 code units together
//! with per-code-unit advance widths and produces line break offsets,
//! line widths, and hyphen edits. Two breakers are provided:
//!
//! - [`break_line_greedy`] packs lines first-fit in a single pass and
//!   supports tab stops. This is the fast path for editable text.
//! - [`break_line_optimal`] minimizes a global cost over the whole
//!   paragraph, trading raggedness against hyphenation, in the manner of
//!   Knuth and Plass. This is the path for high quality display text.
//!
//! Measurement is pluggable through the [`Run`] trait: the caller
//! decides how wide each code unit is and how wide an inserted hyphen
//! is, and the breakers never touch a font. [`ConstantRun`] is the
//! minimal measurer, useful for tests and monospaced layouts.
//!
//! # Example
//! ```
//! use parabreak::{
//!     break_line_greedy, ConstantRun, HyphenatorMap, LocaleCache,
//!     MeasuredTextBuilder, RectangleWidth, TabStops,
//! };
//!
//! let text: Vec<u16> = "just a few words".encode_utf16().collect();
//! let mut locales = LocaleCache::new();
//! let en = locales.intern("en-US");
//!
//! let mut builder = MeasuredTextBuilder::new();
//! builder.add_custom_run(ConstantRun::new(0..text.len(), en, 10.0));
//! let measured =
//!     builder.build(&text, &HyphenatorMap::new(), &locales, false, false);
//!
//! let result = break_line_greedy(
//!     &text,
//!     &measured,
//!     &RectangleWidth::new(70.0),
//!     &TabStops::new(vec![], 0.0),
//!     false,
//! );
//! assert_eq!(result.break_points, vec![7, 11, 16]);
//! ```

mod breakpoint;
mod greedy;
mod hyphenate;
mod locale;
mod measure;
mod optimal;
mod result;
mod tabs;
mod width;

pub use crate::greedy::break_line_greedy;
pub use crate::hyphenate::{
    EndHyphenEdit, HyphenBreak, HyphenEdit, Hyphenator, HyphenatorMap,
    HypherHyphenator, StartHyphenEdit,
};
pub use crate::locale::{LocaleCache, LocaleId};
pub use crate::measure::{ConstantRun, MeasuredText, MeasuredTextBuilder, Run};
pub use crate::optimal::{break_line_optimal, BreakStrategy, HyphenationFrequency};
pub use crate::result::LineBreakResult;
pub use crate::tabs::TabStops;
pub use crate::width::{LineWidthPolicy, RectangleWidth};

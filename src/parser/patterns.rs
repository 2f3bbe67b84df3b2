/*!
 * Markup tokens and precompiled patterns of the quote notebook convention.
 *
 * Every line-level decision of the parser goes through the constants in this
 * module. The grammar is fixed, so the patterns are compiled once and shared.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Comment lines start with this token
pub const COMMENT_TOKEN: &str = "#";

/// Starts a new source; the rest of the line is its citation
pub const CITATION_TOKEN: &str = "<$>";

/// Opens a quote spanning several physical lines
pub const MULTI_QUOTE_TOKEN: &str = "///";

/// Overrides the author of the preceding quote
pub const AUTHOR_TOKEN: &str = ">>>";

/// Terminates a supplemental note
pub const SUPPLEMENTAL_TOKEN: &str = "%%";

/// One run of a page group: digits, the roman numerals in use, or `?`
const PAGE_RUN: &str = r"[0-9ivxlIVXL?]+";

/// A note is signed by the annotator, optionally followed by a period
pub static NOTE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"jmr\.?$").expect("Invalid note suffix regex")
});

/// `^S:` or `^s:` keyword prefix
pub static KEYWORD_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\^[sS]:").expect("Invalid keyword prefix regex")
});

/// URL lines are kept verbatim
pub static URL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://").expect("Invalid url prefix regex")
});

/// Delimited page marker: a tab or three spaces, then `p`/`pp` with optional
/// period, then whitespace (or the end of the line for a bare marker)
pub static QUOTE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\t| {3,})\s*[pP]{1,2}\.?(?:\s|$)").expect("Invalid quote end regex")
});

/// Page group at the head of a quote tail produced by [`QUOTE_END`]
pub static QUOTE_PAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:\t| {{3,}})\s*[pP]{{1,2}}\.?\s+(?P<page>{run}(?:\s*(?:,|-{{1,2}})\s*{run}|\s+[0-9]+)?)",
        run = PAGE_RUN
    ))
    .expect("Invalid quote page regex")
});

/// A year at the very end of a citation, allowing one trailing punctuation mark
pub static YEAR_AT_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{4}[a-zA-Z]?)\b[[:punct:]]?\s*$").expect("Invalid trailing year regex")
});

/// A year anywhere in a citation
pub static YEAR_ANYWHERE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{4}[a-zA-Z]?\b").expect("Invalid year regex")
});

/// A citation name ending in an initial such as `W.`
pub static TRAILING_INITIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s\p{L}\.$").expect("Invalid initial regex")
});

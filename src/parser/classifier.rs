/*!
 * Line classifier.
 *
 * Decides which kind of line a raw input line is, given the state of the
 * record assembler. Several markers are plain prefix or suffix checks that can
 * co-occur on one line, so the checks run in a fixed priority order and the
 * first match wins.
 */

use std::fmt;

use serde::Serialize;

use super::patterns::{
    AUTHOR_TOKEN, CITATION_TOKEN, COMMENT_TOKEN, KEYWORD_PREFIX, MULTI_QUOTE_TOKEN, NOTE_SUFFIX,
    QUOTE_END, SUPPLEMENTAL_TOKEN, URL_PREFIX,
};

/// Where the record assembler currently is in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseState {
    /// Nothing but blank or comment lines seen so far
    Start,
    /// A source is open but has no quote yet
    InSource,
    /// Collecting the lines of a multi-line quote
    InMultiQuote,
    /// At least one quote of the current source is complete
    InQuote,
    /// All lines consumed
    Finished,
}

/// Kind of a single input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineCategory {
    Blank,
    Comment,
    CitationStart,
    CitationNote,
    Quote,
    MultiQuoteStart,
    QuoteNote,
    QuoteAuthor,
    Keyword,
    Supplemental,
    Url,
    Unknown,
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blank => "blank",
            Self::Comment => "comment",
            Self::CitationStart => "citation",
            Self::CitationNote => "citation note",
            Self::Quote => "quote",
            Self::MultiQuoteStart => "multi-line quote start",
            Self::QuoteNote => "quote note",
            Self::QuoteAuthor => "quote author",
            Self::Keyword => "keyword",
            Self::Supplemental => "supplemental note",
            Self::Url => "url",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// True when the line carries a delimited page marker
pub fn is_quote_line(text: &str) -> bool {
    QUOTE_END.is_match(text)
}

/// Classify one untrimmed line
pub fn classify(text: &str, state: ParseState) -> LineCategory {
    let trimmed = text.trim();

    match state {
        ParseState::Finished => return LineCategory::Unknown,
        // Inside a span everything but comments and the closing line is content,
        // blank lines included
        ParseState::InMultiQuote => {
            return if trimmed.starts_with(COMMENT_TOKEN) {
                LineCategory::Comment
            } else if is_quote_line(text) {
                LineCategory::Quote
            } else {
                LineCategory::Unknown
            };
        }
        _ => {}
    }

    if trimmed.is_empty() {
        return LineCategory::Blank;
    }
    if trimmed.starts_with(COMMENT_TOKEN) {
        return LineCategory::Comment;
    }
    if trimmed.starts_with(CITATION_TOKEN) || state == ParseState::Start {
        return LineCategory::CitationStart;
    }

    let has_note_suffix = NOTE_SUFFIX.is_match(trimmed);
    if has_note_suffix && state == ParseState::InSource {
        return LineCategory::CitationNote;
    }
    if is_quote_line(text) {
        return LineCategory::Quote;
    }
    if trimmed.starts_with(MULTI_QUOTE_TOKEN) {
        return LineCategory::MultiQuoteStart;
    }
    if has_note_suffix {
        return LineCategory::QuoteNote;
    }
    if trimmed.starts_with(AUTHOR_TOKEN) {
        return LineCategory::QuoteAuthor;
    }
    if KEYWORD_PREFIX.is_match(trimmed) {
        return LineCategory::Keyword;
    }
    if trimmed.ends_with(SUPPLEMENTAL_TOKEN) {
        return LineCategory::Supplemental;
    }
    if URL_PREFIX.is_match(trimmed) {
        return LineCategory::Url;
    }

    LineCategory::Unknown
}

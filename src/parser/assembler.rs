/*!
 * Record assembler.
 *
 * Walks the classified lines of one document left to right and builds its
 * sources, quotes and discards. Decisions depend only on the current line and
 * the current [`ParseState`]; nothing is looked up ahead.
 */

use std::path::PathBuf;

use log::{debug, trace, warn};

use super::classifier::{self, LineCategory, ParseState};
use super::extractors;
use super::model::{Citation, PAGE_UNKNOWN, ParsedDocument, Quote, Source};
use crate::line_source::Line;

// @struct: Quote whose lines are still being collected
#[derive(Debug)]
struct OpenSpan {
    // @field: Raw lines of the span, kept for the discard list
    lines: Vec<Line>,
    // @field: Cleaned body lines
    body: Vec<String>,
}

// @struct: Source being filled in
#[derive(Debug)]
struct OpenSource {
    citation: Citation,
    quotes: Vec<Quote>,
    // @field: Most recent complete quote; metadata lines land here
    last_quote: Option<Quote>,
}

impl OpenSource {
    fn new(citation: Citation) -> Self {
        OpenSource {
            citation,
            quotes: Vec::new(),
            last_quote: None,
        }
    }

    // Retire the previous quote and make `quote` the metadata target
    fn push_quote(&mut self, quote: Quote) {
        if let Some(previous) = self.last_quote.replace(quote) {
            self.quotes.push(previous);
        }
    }

    fn close(mut self) -> Source {
        if let Some(last) = self.last_quote.take() {
            self.quotes.push(last);
        }
        Source {
            citation: self.citation,
            quotes: self.quotes,
        }
    }
}

/// Builds a [`ParsedDocument`] one line at a time
#[derive(Debug)]
pub struct RecordAssembler {
    origin_path: PathBuf,
    state: ParseState,
    sources: Vec<Source>,
    discards: Vec<Line>,
    source: Option<OpenSource>,
    span: Option<OpenSpan>,
}

impl RecordAssembler {
    pub fn new(origin_path: impl Into<PathBuf>) -> Self {
        RecordAssembler {
            origin_path: origin_path.into(),
            state: ParseState::Start,
            sources: Vec::new(),
            discards: Vec::new(),
            source: None,
            span: None,
        }
    }

    /// Current state of the machine
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Consume one line
    pub fn push(&mut self, line: &Line) {
        let category = classifier::classify(&line.text, self.state);
        trace!("line {} [{:?}] {}: {:?}", line.line_number, self.state, category, line.text);

        match (self.state, category) {
            (_, LineCategory::Comment) => {}
            (ParseState::InMultiQuote, LineCategory::Quote) => self.close_span(line),
            (ParseState::InMultiQuote, _) => self.extend_span(line),
            (_, LineCategory::Blank) => {}
            (_, LineCategory::CitationStart) => self.open_source(line),
            (_, LineCategory::CitationNote) => self.attach_citation_note(line),
            (_, LineCategory::Quote) => self.open_quote(line),
            (_, LineCategory::MultiQuoteStart) => self.open_span(line),
            (ParseState::InQuote, category) => self.attach_metadata(line, category),
            _ => self.discard(line),
        }
    }

    /// Close whatever is open and hand over the finished document
    pub fn finish(mut self) -> ParsedDocument {
        if let Some(span) = self.span.take() {
            warn!(
                "Multi-line quote starting at line {} is never closed by a page number",
                span.lines.first().map(|l| l.line_number).unwrap_or_default()
            );
            self.discards.extend(span.lines);
        }
        if let Some(source) = self.source.take() {
            self.sources.push(source.close());
        }
        if self.sources.is_empty() {
            debug!("No citation found in {}", self.origin_path.display());
            self.sources.push(Source::default());
        }
        self.state = ParseState::Finished;

        debug!(
            "Assembled {} sources, {} discards from {}",
            self.sources.len(),
            self.discards.len(),
            self.origin_path.display()
        );

        ParsedDocument {
            origin_path: self.origin_path,
            sources: self.sources,
            discards: self.discards,
        }
    }

    fn open_source(&mut self, line: &Line) {
        if let Some(previous) = self.source.take() {
            self.sources.push(previous.close());
        }
        let citation = extractors::extract_citation(&line.text);
        debug!("line {}: new source {:?} ({:?})", line.line_number, citation.name, citation.year);
        self.source = Some(OpenSource::new(citation));
        self.state = ParseState::InSource;
    }

    fn attach_citation_note(&mut self, line: &Line) {
        match self.source.as_mut() {
            Some(source) => source.citation.note = Some(extractors::note_body(&line.text)),
            None => self.discard(line),
        }
    }

    fn open_quote(&mut self, line: &Line) {
        let (body, page) = Self::quote_parts(line);
        self.complete_quote(Quote::new(line.line_number, vec![body], page));
    }

    fn open_span(&mut self, line: &Line) {
        self.span = Some(OpenSpan {
            lines: vec![line.clone()],
            body: vec![extractors::strip_multi_quote_token(&line.text)],
        });
        self.state = ParseState::InMultiQuote;
    }

    fn extend_span(&mut self, line: &Line) {
        if let Some(span) = self.span.as_mut() {
            span.lines.push(line.clone());
            span.body.push(line.text.trim().to_string());
        }
    }

    fn close_span(&mut self, line: &Line) {
        let Some(mut span) = self.span.take() else {
            self.discard(line);
            return;
        };
        let line_number = span.lines.first().map_or(line.line_number, |l| l.line_number);
        let (last, page) = Self::quote_parts(line);
        span.body.push(last);
        debug!("lines {}-{}: multi-line quote, p. {}", line_number, line.line_number, page);
        self.complete_quote(Quote::new(line_number, span.body, page));
    }

    // The classifier already saw the page marker, so the split cannot miss it
    fn quote_parts(line: &Line) -> (String, String) {
        extractors::split_quote(&line.text).unwrap_or_else(|| {
            (extractors::strip_multi_quote_token(&line.text), PAGE_UNKNOWN.to_string())
        })
    }

    fn complete_quote(&mut self, quote: Quote) {
        if quote.has_unknown_page() {
            warn!("Quote at line {} has no readable page number", quote.line_number);
        }
        self.source
            .get_or_insert_with(|| OpenSource::new(Citation::default()))
            .push_quote(quote);
        self.state = ParseState::InQuote;
    }

    fn attach_metadata(&mut self, line: &Line, category: LineCategory) {
        let text = &line.text;
        let target = self.source.as_mut().and_then(|s| s.last_quote.as_mut());
        match (target, category) {
            (Some(quote), LineCategory::QuoteNote) => quote.note = Some(extractors::note_body(text)),
            (Some(quote), LineCategory::QuoteAuthor) => quote.author = Some(extractors::author_body(text)),
            (Some(quote), LineCategory::Keyword) => quote.keyword = Some(extractors::keyword_body(text)),
            (Some(quote), LineCategory::Supplemental) => {
                quote.supplemental.push(extractors::supplemental_body(text))
            }
            (Some(quote), LineCategory::Url) => quote.url = Some(extractors::url_body(text)),
            _ => self.discard(line),
        }
    }

    fn discard(&mut self, line: &Line) {
        debug!("line {}: discarded", line.line_number);
        self.discards.push(line.clone());
    }
}

/// Parse a whole document in one pass
pub fn parse_lines(origin_path: impl Into<PathBuf>, lines: &[Line]) -> ParsedDocument {
    let mut assembler = RecordAssembler::new(origin_path);
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}

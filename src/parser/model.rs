/*!
 * Records reconstructed from a quote notebook.
 */

use std::path::PathBuf;

use serde::Serialize;

use crate::line_source::Line;

/// Page value of a quote whose page marker had no readable page group
pub const PAGE_UNKNOWN: &str = "?";

/// Bibliographic description of a source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// Author label, e.g. `Brown, Jason W.`
    pub name: String,
    /// Publication year, possibly with a disambiguating letter (`1999e`)
    pub year: Option<String>,
    /// Full citation text without markup
    pub body: String,
    /// Note attached right after the citation line
    pub note: Option<String>,
}

/// One excerpted passage and its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Line on which the quote started
    pub line_number: usize,
    /// One entry per physical line of the quote
    pub body: Vec<String>,
    /// Page token or [`PAGE_UNKNOWN`]
    pub page: String,
    pub author: Option<String>,
    pub keyword: Option<String>,
    pub supplemental: Vec<String>,
    pub note: Option<String>,
    pub url: Option<String>,
}

impl Quote {
    pub fn new(line_number: usize, body: Vec<String>, page: impl Into<String>) -> Self {
        Quote {
            line_number,
            body,
            page: page.into(),
            author: None,
            keyword: None,
            supplemental: Vec::new(),
            note: None,
            url: None,
        }
    }

    /// Whether the page marker could not be read
    pub fn has_unknown_page(&self) -> bool {
        self.page == PAGE_UNKNOWN
    }
}

/// A bibliographic work and the quotes taken from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Source {
    pub citation: Citation,
    pub quotes: Vec<Quote>,
}

impl Source {
    pub fn new(citation: Citation) -> Self {
        Source {
            citation,
            quotes: Vec::new(),
        }
    }
}

/// Result of parsing one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    /// Path of the file the lines came from
    pub origin_path: PathBuf,
    /// Sources in document order; never empty
    pub sources: Vec<Source>,
    /// Lines that need a human look, in document order
    pub discards: Vec<Line>,
}

impl ParsedDocument {
    /// Total number of quotes over all sources
    pub fn quote_count(&self) -> usize {
        self.sources.iter().map(|s| s.quotes.len()).sum()
    }

    /// Iterate over every quote together with its source
    pub fn quotes(&self) -> impl Iterator<Item = (&Source, &Quote)> {
        self.sources
            .iter()
            .flat_map(|source| source.quotes.iter().map(move |quote| (source, quote)))
    }

    /// True when no line had to be discarded
    pub fn is_clean(&self) -> bool {
        self.discards.is_empty()
    }
}

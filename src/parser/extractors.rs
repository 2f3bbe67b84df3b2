/*!
 * Field extractors.
 *
 * Each extractor takes a line the classifier already assigned to its category,
 * strips the markup token and returns the semantic value. None of them can fail;
 * the page extractor falls back to [`PAGE_UNKNOWN`].
 */

use super::model::{Citation, PAGE_UNKNOWN};
use super::patterns::{
    AUTHOR_TOKEN, CITATION_TOKEN, KEYWORD_PREFIX, MULTI_QUOTE_TOKEN, QUOTE_END, QUOTE_PAGE,
    SUPPLEMENTAL_TOKEN, TRAILING_INITIAL, YEAR_ANYWHERE, YEAR_AT_END,
};

/// Characters that end the author part of a citation
const NAME_TERMINATORS: [char; 3] = ['\u{201C}', '{', '"'];

/// Build a citation from a citation line
pub fn extract_citation(text: &str) -> Citation {
    let body = citation_body(text);
    Citation {
        name: citation_name(&body),
        year: citation_year(&body),
        body,
        note: None,
    }
}

/// Citation text without the source token
pub fn citation_body(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(CITATION_TOKEN)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Author label: everything before the title opens
///
/// A name ending in an initial (`Brown, Jason W.`) keeps its period; any other
/// single trailing period is dropped.
pub fn citation_name(body: &str) -> String {
    let end = body.find(&NAME_TERMINATORS[..]).unwrap_or(body.len());
    let name = body[..end].trim();
    if TRAILING_INITIAL.is_match(name) {
        name.to_string()
    } else {
        name.strip_suffix('.').unwrap_or(name).trim_end().to_string()
    }
}

/// Publication year, preferring one at the end of the citation
pub fn citation_year(body: &str) -> Option<String> {
    YEAR_AT_END
        .captures(body)
        .and_then(|caps| caps.get(1))
        .or_else(|| YEAR_ANYWHERE.find_iter(body).last())
        .map(|m| m.as_str().to_string())
}

/// Split a quote line into its body and page
///
/// The first marker followed by a page group wins; when none has one, the
/// first marker ends the body and the page is [`PAGE_UNKNOWN`]. Returns `None`
/// when the line has no delimited page marker at all.
pub fn split_quote(text: &str) -> Option<(String, String)> {
    let first = QUOTE_END.find(text)?;
    let (start, page) = QUOTE_END
        .find_iter(text)
        .find_map(|marker| page_group(&text[marker.start()..]).map(|page| (marker.start(), page)))
        .unwrap_or_else(|| (first.start(), PAGE_UNKNOWN.to_string()));
    Some((strip_multi_quote_token(&text[..start]), page))
}

/// Page group at the head of a quote tail (`\tpp. 240--42 ...`)
pub fn page_group(tail: &str) -> Option<String> {
    QUOTE_PAGE
        .captures(tail)
        .and_then(|caps| caps.name("page"))
        .map(|page| page.as_str().trim().to_string())
}

/// Remove the multi-line quote token and surrounding whitespace
pub fn strip_multi_quote_token(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(MULTI_QUOTE_TOKEN)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Note text; the annotator's signature is part of the note
pub fn note_body(text: &str) -> String {
    text.trim().to_string()
}

pub fn author_body(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(AUTHOR_TOKEN)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

pub fn keyword_body(text: &str) -> String {
    let trimmed = text.trim();
    match KEYWORD_PREFIX.find(trimmed) {
        Some(prefix) => trimmed[prefix.end()..].trim().to_string(),
        None => trimmed.to_string(),
    }
}

pub fn supplemental_body(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .strip_suffix(SUPPLEMENTAL_TOKEN)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// URLs keep their scheme
pub fn url_body(text: &str) -> String {
    text.trim().to_string()
}

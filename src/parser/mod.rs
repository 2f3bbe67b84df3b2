/*!
 * Quote notebook parser.
 *
 * - `patterns`: markup tokens and precompiled regular expressions
 * - `classifier`: per-line category decisions
 * - `extractors`: field values from classified lines
 * - `assembler`: the state machine that builds sources and quotes
 * - `model`: the resulting records
 */

pub mod assembler;
pub mod classifier;
pub mod extractors;
pub mod model;
pub mod patterns;

use std::path::Path;

use log::info;

pub use assembler::{RecordAssembler, parse_lines};
pub use classifier::{LineCategory, ParseState, classify};
pub use model::{Citation, PAGE_UNKNOWN, ParsedDocument, Quote, Source};

use crate::errors::LineSourceError;
use crate::line_source::LineSource;

/// Read and parse one input file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedDocument, LineSourceError> {
    let path = path.as_ref();
    let lines = LineSource::from_path(path)?;
    let document = parse_lines(path, &lines);
    info!(
        "Parsed {}: {} sources, {} quotes, {} discarded lines",
        path.display(),
        document.sources.len(),
        document.quote_count(),
        document.discards.len()
    );
    Ok(document)
}

/*!
 * RIS result writer.
 *
 * Turns a [`ParsedDocument`] into RIS records, one per quote, and writes the
 * discarded lines next to it for review. Rendering is a pure function of the
 * document, the options and the date; only [`write_results`] touches the disk.
 */

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::encoding::{Encoding, encode};
use crate::file_utils::FileManager;
use crate::line_source::Line;
use crate::parser::{ParsedDocument, Quote, Source};

/// Line terminator of written files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n` on Windows, `\n` elsewhere
    #[default]
    Platform,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

// @struct: Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    // @field: Emit `VL` with the batch id
    pub include_volume: bool,
    // @field: Emit `AD` with the run date
    pub include_datestamp: bool,
    pub encoding: Encoding,
    pub line_ending: LineEnding,
}

// @struct: Paths written for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub parsed: PathBuf,
    pub discards: Option<PathBuf>,
}

/// Batch id of an input file: the name of the directory holding it
pub fn batch_id<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// File id of an input file: its name without extension
pub fn file_id<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Family part of an author label (`Husserl, Edmund` -> `Husserl`)
pub fn family_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name).trim()
}

// Accumulates `TAG  - value` lines
struct RecordBuffer<'a> {
    out: String,
    eol: &'a str,
}

impl<'a> RecordBuffer<'a> {
    fn new(eol: &'a str) -> Self {
        RecordBuffer {
            out: String::new(),
            eol,
        }
    }

    fn field(&mut self, tag: &str, value: &str) {
        let _ = write!(self.out, "{}  - {}{}", tag, value, self.eol);
    }

    fn optional(&mut self, tag: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.field(tag, value);
        }
    }

    fn blank(&mut self) {
        self.out.push_str(self.eol);
    }
}

/// Render a document as RIS text encoded per the options
pub fn render(document: &ParsedDocument, options: &WriteOptions, batch: &str, date: NaiveDate) -> Vec<u8> {
    let mut buffer = RecordBuffer::new(options.line_ending.as_str());
    let file = file_id(&document.origin_path);
    let datestamp = date.format("%Y/%m/%d").to_string();

    buffer.blank();
    for (source, quote) in document.quotes() {
        buffer.field("TY", "");
        if options.include_volume {
            buffer.field("VL", batch);
        }
        buffer.field("UR", &file);
        if options.include_datestamp {
            buffer.field("AD", &datestamp);
        }
        render_quote(&mut buffer, source, quote);
        buffer.field("ER", "");
        buffer.blank();
    }

    encode(&buffer.out, options.encoding)
}

fn render_quote(buffer: &mut RecordBuffer<'_>, source: &Source, quote: &Quote) {
    let citation = &source.citation;

    buffer.field("AB", &citation.body);
    match &quote.author {
        Some(author) => {
            buffer.field("A1", author);
            buffer.field("A2", &format!("in {}", family_name(&citation.name)));
        }
        None => buffer.field("A1", &citation.name),
    }
    buffer.optional("Y1", citation.year.as_deref());
    buffer.optional("T2", citation.note.as_deref());
    buffer.optional("KW", quote.keyword.as_deref());
    for line in &quote.body {
        buffer.field("T1", line);
    }
    buffer.field("SP", &quote.page);
    for note in &quote.supplemental {
        buffer.field("PB", note);
    }
    buffer.optional("CY", quote.note.as_deref());
    buffer.optional("UR", quote.url.as_deref());
}

/// Discard review text: a `<N>` header then the original line, per discard
pub fn render_discards(discards: &[Line], line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut out = String::new();
    for line in discards {
        let _ = write!(out, "<{}>{}{}{}", line.line_number, eol, line.text, eol);
    }
    out
}

/// Write the discard file
pub fn write_discards<P: AsRef<Path>>(discards: &[Line], path: P, line_ending: LineEnding) -> Result<()> {
    FileManager::write_bytes(path.as_ref(), render_discards(discards, line_ending).as_bytes())
}

/// Write `<stem>_PARSED.ris` and, when lines were discarded, `<stem>_DISCARD.txt`
pub fn write_results(document: &ParsedDocument, options: &WriteOptions) -> Result<WrittenFiles> {
    let origin = &document.origin_path;
    let parsed = FileManager::parsed_output_path(origin);
    let today = chrono::Local::now().date_naive();

    let content = render(document, options, &batch_id(origin), today);
    FileManager::write_bytes(&parsed, &content)
        .with_context(|| format!("Failed to write RIS output for {}", origin.display()))?;
    debug!("Wrote {} bytes to {}", content.len(), parsed.display());

    let discards = if document.is_clean() {
        None
    } else {
        let path = FileManager::discard_output_path(origin);
        write_discards(&document.discards, &path, options.line_ending)
            .with_context(|| format!("Failed to write discards for {}", origin.display()))?;
        warn!(
            "{} line(s) of {} need review: {}",
            document.discards.len(),
            origin.display(),
            path.display()
        );
        Some(path)
    };

    info!("Success: {}", parsed.display());
    Ok(WrittenFiles { parsed, discards })
}

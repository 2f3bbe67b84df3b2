/*!
 * Line source adapter.
 *
 * Turns an input file into an ordered list of numbered raw lines, whatever the
 * container: plain text files are split on line endings, `.docx` files are
 * unpacked and each WordprocessingML paragraph becomes one line. A paragraph
 * nested in a textbox becomes its own line, emitted before the one around it.
 */

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Serialize;

use crate::errors::LineSourceError;
use crate::file_utils::{FileManager, FileType};

// @const: Location of the main text part inside a .docx container
const DOCUMENT_PART: &str = "word/document.xml";

// @struct: One physical line of an input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    // @field: 1-indexed line number in the source document
    pub line_number: usize,

    // @field: Untrimmed line text
    pub text: String,
}

impl Line {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Line {
            line_number,
            text: text.into(),
        }
    }
}

/// Reads input documents into [`Line`]s
pub struct LineSource;

impl LineSource {
    /// Read a `.txt` or `.docx` file into numbered lines
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Line>, LineSourceError> {
        let path = path.as_ref();
        match FileManager::detect_file_type(path) {
            FileType::Text => {
                let bytes = fs::read(path).map_err(|source| LineSourceError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let text = match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("{} is not valid UTF-8, decoding lossily", path.display());
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                };
                Ok(Self::from_text(&text))
            }
            FileType::Docx => {
                let xml = Self::read_docx_part(path)?;
                Self::from_docx_xml(&xml)
            }
            FileType::Unknown => Err(LineSourceError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Split plain text into numbered lines
    pub fn from_text(content: &str) -> Vec<Line> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        content
            .lines()
            .enumerate()
            .map(|(idx, text)| Line::new(idx + 1, text))
            .collect()
    }

    /// Extract one line per paragraph from a WordprocessingML document body
    pub fn from_docx_xml(xml: &str) -> Result<Vec<Line>, LineSourceError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut lines = Vec::new();
        // Open paragraphs, innermost last; textboxes nest `w:p` inside a paragraph
        let mut paragraphs: Vec<String> = Vec::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:p" => paragraphs.push(String::new()),
                    b"w:t" => in_text_run = true,
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    // Self-closing paragraph: an empty line
                    b"w:p" => lines.push(Line::new(lines.len() + 1, "")),
                    b"w:tab" => {
                        if let Some(text) = paragraphs.last_mut() {
                            text.push('\t');
                        }
                    }
                    b"w:noBreakHyphen" => {
                        if let Some(text) = paragraphs.last_mut() {
                            text.push('-');
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    if in_text_run {
                        if let Some(text) = paragraphs.last_mut() {
                            text.push_str(&t.unescape()?);
                        }
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => {
                        if let Some(text) = paragraphs.pop() {
                            lines.push(Line::new(lines.len() + 1, text));
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        debug!("Extracted {} paragraphs from document XML", lines.len());
        Ok(lines)
    }

    // @reads: The document.xml part of a .docx container
    fn read_docx_part(path: &Path) -> Result<String, LineSourceError> {
        let file = fs::File::open(path).map_err(|source| LineSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut part = match archive.by_name(DOCUMENT_PART) {
            Ok(part) => part,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(LineSourceError::MissingDocumentPart(DOCUMENT_PART.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|source| LineSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(xml)
    }
}

/*!
 * Tests for reading notebooks into lines
 */

use anyhow::Result;
use std::fs;
use std::io::Write;
use zip::write::SimpleFileOptions;
use qris::errors::LineSourceError;
use qris::line_source::{Line, LineSource};
use crate::common;

#[test]
fn test_from_path_withTextFile_shouldKeepUntrimmedLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.txt", "<$>Brown.\r\n  A quote.\tp. 3  \r\n")?;

    let lines = LineSource::from_path(&path)?;

    assert_eq!(lines, vec![Line::new(1, "<$>Brown."), Line::new(2, "  A quote.\tp. 3  ")]);
    Ok(())
}

#[test]
fn test_from_path_withCp1252Text_shouldDecodeLossily() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("legacy.txt");
    fs::write(&path, b"Berm\xfadez\nplain\n")?;

    let lines = LineSource::from_path(&path)?;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "Berm\u{FFFD}dez");
    assert_eq!(lines[1].text, "plain");
    Ok(())
}

#[test]
fn test_from_path_withDocx_shouldReturnOneLinePerParagraph() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_docx(
        temp_dir.path(),
        "notes.docx",
        &["Varela, Francisco J. {Title}. 1995.", "", "A quote & more.\tp. 81"],
    )?;

    let lines = LineSource::from_path(&path)?;

    assert_eq!(
        lines,
        vec![
            Line::new(1, "Varela, Francisco J. {Title}. 1995."),
            Line::new(2, ""),
            Line::new(3, "A quote & more.\tp. 81"),
        ]
    );
    Ok(())
}

#[test]
fn test_from_path_withDocxMissingDocumentPart_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("empty.docx");
    let mut archive = zip::ZipWriter::new(fs::File::create(&path)?);
    archive.start_file("word/styles.xml", SimpleFileOptions::default())?;
    archive.write_all(b"<styles/>")?;
    archive.finish()?;

    let result = LineSource::from_path(&path);

    assert!(matches!(result, Err(LineSourceError::MissingDocumentPart(_))));
    Ok(())
}

#[test]
fn test_from_path_withCorruptDocx_shouldReportArchiveError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.docx", "this is not a zip file")?;

    let result = LineSource::from_path(&path);

    assert!(matches!(result, Err(LineSourceError::Archive(_))));
    Ok(())
}

#[test]
fn test_from_path_withMissingFile_shouldReportIoError() {
    let result = LineSource::from_path("definitely_missing_notebook.txt");
    assert!(matches!(result, Err(LineSourceError::Io { .. })));
}

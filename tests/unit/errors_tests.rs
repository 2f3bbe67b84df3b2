/*!
 * Tests for error types and conversions
 */

use anyhow::Result;
use std::path::PathBuf;
use qris::app_controller::Controller;
use qris::errors::{AppError, LineSourceError};
use crate::common;

#[test]
fn test_lineSourceError_display_shouldNameTheFile() {
    let error = LineSourceError::UnsupportedFormat(PathBuf::from("notes.pdf"));
    assert_eq!(error.to_string(), "Unsupported input format: notes.pdf");

    let error = LineSourceError::MissingDocumentPart("word/document.xml".to_string());
    assert_eq!(error.to_string(), "Document part missing from archive: word/document.xml");
}

#[test]
fn test_lineSourceError_withIoSource_shouldExposeSource() {
    let error = LineSourceError::Io {
        path: PathBuf::from("notes.txt"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert_eq!(error.to_string(), "Failed to read notes.txt: gone");
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_appError_fromConversions_shouldPickVariant() {
    let app: AppError = LineSourceError::Xml("bad tag".to_string()).into();
    assert!(matches!(app, AppError::Source(LineSourceError::Xml(_))));
    assert_eq!(app.to_string(), "Source error: Malformed document XML: bad tag");

    let app: AppError = std::io::Error::other("disk full").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("surprise").into();
    assert_eq!(app.to_string(), "Unknown error: surprise");
}

#[test]
fn test_processFile_withMissingFile_shouldReportFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::test_config())?;

    let error = controller.process_file(temp_dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::File(_))));
    Ok(())
}

#[test]
fn test_processFile_withOutputArtifact_shouldReportFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let artifact = common::create_test_file(temp_dir.path(), "notes_DISCARD.txt", "<3>\nstray\n")?;
    let controller = Controller::with_config(common::test_config())?;

    let error = controller.process_file(&artifact).unwrap_err();
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::File(_))));
    Ok(())
}

#[test]
fn test_processFile_withBrokenDocx_shouldReportSourceError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let broken = common::create_test_file(temp_dir.path(), "broken.docx", "not a zip archive")?;
    let controller = Controller::with_config(common::test_config())?;

    let error = controller.process_file(&broken).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<AppError>(),
        Some(AppError::Source(LineSourceError::Archive(_)))
    ));
    Ok(())
}

/*!
 * Integration tests for directory batch processing
 */

use anyhow::Result;
use std::fs;
use qris::app_controller::{BatchSummary, Controller};
use crate::common::{self, SAMPLE_NOTEBOOK};

const CLEAN_NOTEBOOK: &str = "Zahavi, Dan. {Subjectivity and Selfhood}. 2005.\nSelf-givenness.\tp. 61\n";

/// Test that a batch converts every notebook and keeps going past failures
#[test]
fn test_run_folder_withBrokenFile_shouldContinueAndCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "brown.txt", SAMPLE_NOTEBOOK)?;
    common::create_test_docx(dir, "zahavi.docx", &CLEAN_NOTEBOOK.lines().collect::<Vec<_>>())?;
    common::create_test_file(dir, "broken.docx", "not a zip archive")?;
    common::create_test_file(dir, "scan.pdf", "ignored")?;
    let controller = Controller::with_config(common::test_config())?;

    let summary = controller.run_folder(dir)?;

    assert_eq!(
        summary,
        BatchSummary {
            processed: 2,
            failed: 1,
            quotes: 4,
            discards: 1,
        }
    );
    assert!(dir.join("brown_PARSED.ris").exists());
    assert!(dir.join("brown_DISCARD.txt").exists());
    assert!(dir.join("zahavi_PARSED.ris").exists());
    assert!(!dir.join("zahavi_DISCARD.txt").exists());
    assert!(!dir.join("scan_PARSED.ris").exists());
    Ok(())
}

/// Test that running a batch twice never parses the tool's own output
#[test]
fn test_run_folder_twice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "brown.txt", SAMPLE_NOTEBOOK)?;
    let controller = Controller::with_config(common::test_config())?;

    let first = controller.run_folder(dir)?;
    let ris_after_first = fs::read(dir.join("brown_PARSED.ris"))?;
    let second = controller.run_folder(dir)?;

    assert_eq!(first, second);
    assert_eq!(fs::read(dir.join("brown_PARSED.ris"))?, ris_after_first);
    assert!(!dir.join("brown_DISCARD_PARSED.ris").exists());
    assert!(!dir.join("brown_PARSED_PARSED.ris").exists());
    assert_eq!(fs::read_dir(dir)?.count(), 3);
    Ok(())
}

/// Test that an empty directory is not an error
#[test]
fn test_run_folder_withNoNotebooks_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::test_config())?;

    assert_eq!(controller.run_folder(temp_dir.path())?, BatchSummary::default());
    Ok(())
}

/// Test that run dispatches a directory to batch mode
#[test]
fn test_run_withDirectory_shouldProcessBatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "zahavi.txt", CLEAN_NOTEBOOK)?;
    let controller = Controller::with_config(common::test_config())?;

    controller.run(temp_dir.path())?;

    assert!(temp_dir.path().join("zahavi_PARSED.ris").exists());
    Ok(())
}

/// Test that a batch in which every file fails is reported as an error
#[test]
fn test_run_withOnlyBrokenFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "broken.docx", "not a zip archive")?;
    let controller = Controller::with_config(common::test_config())?;

    assert!(controller.run(temp_dir.path()).is_err());
    Ok(())
}

/// Test UTF-8 validation over a directory of text notebooks
#[test]
fn test_run_validate_withLegacyFile_shouldReportInvalidLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "clean.txt", CLEAN_NOTEBOOK)?;
    fs::write(dir.join("legacy.txt"), b"Berm\xfadez, Jos\xe9 Luis. 2003.\nA quote.\tp. 4\n")?;
    common::create_test_docx(dir, "word.docx", &["ignored"])?;
    let controller = Controller::with_config(common::test_config())?;

    let reports = controller.run_validate(dir)?;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].0, dir.join("clean.txt"));
    assert!(reports[0].1.valid);
    assert_eq!(reports[1].0, dir.join("legacy.txt"));
    assert_eq!(reports[1].1.invalid_lines, vec![1]);
    Ok(())
}

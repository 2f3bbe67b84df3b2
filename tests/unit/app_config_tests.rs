/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use std::fs;
use qris::app_config::{Config, LogLevel, OutputConfig, default_config_path};
use qris::encoding::Encoding;
use qris::ris_writer::LineEnding;
use crate::common;

/// Test saving and reloading a customised configuration
#[test]
fn test_save_withCustomValues_shouldReloadIdentically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    let config = Config {
        working_dir: Some(temp_dir.path().to_path_buf()),
        output: OutputConfig {
            include_volume: true,
            include_datestamp: true,
            encoding: Encoding::Utf16,
            line_ending: LineEnding::Crlf,
        },
        log_level: LogLevel::Debug,
    };

    config.save(&path)?;
    let reloaded = Config::load_or_create(&path)?;

    assert_eq!(reloaded, config);
    Ok(())
}

/// Test the JSON field names written for the default configuration
#[test]
fn test_save_withDefaults_shouldUseLowercaseEnumNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    Config::default().save(&path)?;
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;

    assert_eq!(json["working_dir"], serde_json::Value::Null);
    assert_eq!(json["output"]["include_volume"], false);
    assert_eq!(json["output"]["encoding"], "ansi");
    assert_eq!(json["output"]["line_ending"], "platform");
    assert_eq!(json["log_level"], "info");
    Ok(())
}

/// Test that a malformed file is reported instead of replaced
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    assert_eq!(fs::read_to_string(&path)?, "{ not json");
    Ok(())
}

/// Test that an unknown encoding name is rejected
#[test]
fn test_deserialize_withUnknownEncoding_shouldFail() {
    let result: Result<Config, _> = serde_json::from_str(r#"{"output": {"encoding": "ebcdic"}}"#);
    assert!(result.is_err());
}

/// Test the default configuration location
#[test]
fn test_default_config_path_shouldEndInQrisConf() {
    let path = default_config_path();
    assert!(path.ends_with("qris/conf.json"));
}

/// Test config validation with a valid working directory
#[test]
fn test_validate_withExistingWorkingDir_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config {
        working_dir: Some(temp_dir.path().to_path_buf()),
        ..Config::default()
    };

    config.validate()?;
    assert_eq!(config.resolve_working_dir()?, temp_dir.path());
    Ok(())
}

/// Test that absolute inputs ignore the working directory
#[test]
fn test_resolve_input_withAbsolutePath_shouldKeepIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let absolute = temp_dir.path().join("notes.txt");

    assert_eq!(common::test_config().resolve_input(&absolute)?, absolute);
    Ok(())
}

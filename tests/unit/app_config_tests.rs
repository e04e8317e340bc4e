/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use std::fs;
use storyboard::app_config::{Config, LogLevel};
use storyboard::document::DocumentFormat;

use crate::common;

/// A missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("storyboard.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.set_name, Config::default().set_name);
    let reloaded: Config = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(reloaded.hybrid.total_questions, 20);
    Ok(())
}

/// An existing config file is read as-is
#[test]
fn test_loadOrCreate_withExistingFile_shouldReadValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "custom.json",
        r#"{
            "set_name": "Cinema Bowl",
            "split_docs": true,
            "output_format": "json",
            "log_level": "debug",
            "hybrid": { "enabled": true, "written_suffix": "W", "force_end": false },
            "scoring": { "superpower_value": 30, "power_value": 20 }
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.set_name, "Cinema Bowl");
    assert!(config.split_docs);
    assert_eq!(config.output_format, DocumentFormat::Json);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.hybrid.written_suffix, "W");
    assert!(!config.hybrid.force_end);
    assert!(config.hybrid.tags);
    assert_eq!(config.set_slug(), "Cinema-Bowl");

    let options = config.assembler_options(true);
    assert!(options.verbose);
    assert_eq!(options.thresholds.superpower, 30);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Malformed JSON is an error, not a silent default
#[test]
fn test_loadOrCreate_withBrokenJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withEmptySetName_shouldFail() {
    let config = Config {
        set_name: "  ".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

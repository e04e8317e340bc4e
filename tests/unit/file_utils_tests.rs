/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use storyboard::file_utils::FileManager;

use crate::common;

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensureDir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Written packets are matched by stem suffix, recursively, and sorted
#[test]
fn test_findWrittenPackets_shouldMatchSuffixAndSkipLockFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_written_packet(dir, "round2/Set_02_raw.txt", 1)?;
    common::create_written_packet(dir, "Set_01_raw.txt", 1)?;
    common::create_test_file(dir, "~$Set_03_raw.txt", "lock")?;
    common::create_test_file(dir, "Set_04_raw.html", "<p>not loadable</p>")?;
    common::create_test_file(dir, "Set_05.txt", "no suffix")?;
    common::create_test_file(dir, "_raw.txt", "suffix only")?;

    let found = FileManager::find_written_packets(dir, "_raw")?;

    assert_eq!(found, vec![dir.join("Set_01_raw.txt"), dir.join("round2/Set_02_raw.txt")]);
    Ok(())
}

/// A missing folder is an error
#[test]
fn test_findWrittenPackets_withMissingDir_shouldFail() {
    assert!(FileManager::find_written_packets("./no_such_packets_dir_12345", "_raw").is_err());
}

#[test]
fn test_fileExists_withDirectory_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

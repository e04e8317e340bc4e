/*!
 * Common test utilities for the storyboard test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Two-packet answerline database covering films, people and mixed sources
pub const SAMPLE_DATABASE: &str = "\
Packet,Number,Value,Answerline,Answerline_Type,Source,Source_Type,Source_Year,Creator,Author,Notes
1,1,20,Citizen Kane [accept Kane],Film,,,1941,,Ani,
1,2,20,Ridley Scott [prompt on Scott],Director,Alien,Film,1979,Ridley Scott,,
1,2,15,,,Gladiator,Film,2000,,,
1,2,10,,,Top Gun,Film,1986,Tony Scott,,
1,3,20,The Shining,Misc,The Shining,Film,1980,,,don't stay in room 237
1,3,15,,,\"\"\"Thriller\"\"\",Music Video,1983,John Landis,,
1,3,5,,,Room 237,Film,2012,Rodney Ascher,,
2,1,20,Heat,Film,,,1995,Michael Mann,Ben,
2,2,15,,,,,,,,
";

/// Creates the sample database in `dir`
pub fn create_sample_database(dir: &Path) -> Result<PathBuf> {
    create_test_file(dir, "Film-Set_Database.csv", SAMPLE_DATABASE)
}

/// Creates a plain-text written packet with `count` numbered questions
pub fn create_written_packet(dir: &Path, filename: &str, count: u32) -> Result<PathBuf> {
    let mut content = String::new();
    for n in 1..=count {
        content.push_str(&format!("{}. Written question number {}.\n", n, n));
        content.push_str("ANSWER: something\n\n");
    }
    create_test_file(dir, filename, &content)
}

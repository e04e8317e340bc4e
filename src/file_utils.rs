use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

use crate::document::DocumentFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Title-case a set name and join its words with `-`
    pub fn set_slug(set_name: &str) -> String {
        let mut slug = String::with_capacity(set_name.len());
        let mut in_word = false;
        for c in set_name.chars() {
            if c.is_alphabetic() {
                if in_word {
                    slug.extend(c.to_lowercase());
                } else {
                    slug.extend(c.to_uppercase());
                }
                in_word = true;
            } else {
                slug.push(if c == ' ' { '-' } else { c });
                in_word = false;
            }
        }
        slug
    }

    // @generates: Combined answers document path
    pub fn answers_path<P: AsRef<Path>>(output_dir: P, slug: &str, format: DocumentFormat) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}_Answers-raw.{}", slug, format.extension()))
    }

    // @generates: Per-packet answers document path
    pub fn packet_answers_path<P: AsRef<Path>>(
        output_dir: P,
        slug: &str,
        padded_packet: &str,
        format: DocumentFormat,
    ) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}_Answers-raw_{}.{}", slug, padded_packet, format.extension()))
    }

    // @generates: Hybrid packet path
    pub fn hybrid_path<P: AsRef<Path>>(dest_dir: P, slug: &str, padded_packet: &str, format: DocumentFormat) -> PathBuf {
        dest_dir
            .as_ref()
            .join(format!("{}_{}.{}", slug, padded_packet, format.extension()))
    }

    /// Find written packets under `dir`, sorted by path.
    ///
    /// A written packet is a loadable document whose file stem ends with
    /// `suffix` and whose name does not start with `~` (editor lock files).
    pub fn find_written_packets<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
            let loadable = DocumentFormat::from_path(path)
                .map(|f| f.is_loadable())
                .unwrap_or(false);

            if loadable && !name.starts_with('~') && stem.len() > suffix.len() && stem.ends_with(suffix) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        debug!("Found {} written packets in {:?}", result.len(), dir.as_ref());
        Ok(result)
    }

    /// Open a file with the platform's default viewer
    pub fn open_in_viewer<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let status = if cfg!(target_os = "macos") {
            Command::new("open").arg(path).status()
        } else if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", "start", ""]).arg(path).status()
        } else {
            Command::new("xdg-open").arg(path).status()
        }
        .with_context(|| format!("Failed to launch a viewer for {:?}", path))?;

        if !status.success() {
            return Err(anyhow::anyhow!("Viewer exited with {} for {:?}", status, path));
        }
        Ok(())
    }
}

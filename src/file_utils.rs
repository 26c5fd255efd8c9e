use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read and parse a JSON document
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read file: {}", path.display()))?;
        serde_json::from_str(&content)
            .context(format!("Invalid JSON in file: {}", path.display()))
    }

    /// Write a JSON document atomically via a temp file in the same directory
    ///
    /// A crash mid-write must never leave a half-serialized data file next
    /// to a game project.
    pub fn write_json_atomic<P: AsRef<Path>>(path: P, value: &Value) -> Result<()> {
        let path = path.as_ref();
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent)
            .context("Failed to create temporary output file")?;
        serde_json::to_writer_pretty(&mut temp, value)
            .context("Failed to serialize JSON output")?;
        temp.flush()?;
        temp.persist(path)
            .context(format!("Failed to persist output file: {}", path.display()))?;
        Ok(())
    }

    /// Find all JSON files under a directory, sorted for deterministic runs
    pub fn find_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
            {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    // @generates: Output path for a translated data file
    // @params: input_file, output_dir, target_language
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        output_filename.push_str(".json");

        output_dir.join(output_filename)
    }
}

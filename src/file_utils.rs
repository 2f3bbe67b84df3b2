use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Suffix of the parsed RIS output written next to each input
pub const PARSED_SUFFIX: &str = "_PARSED.ris";

// @const: Suffix of the discarded-lines review file
pub const DISCARD_SUFFIX: &str = "_DISCARD.txt";

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

    // @generates: Path of the parsed RIS file for an input file
    pub fn parsed_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        Self::with_suffix(input_file.as_ref(), PARSED_SUFFIX)
    }

    // @generates: Path of the discard review file for an input file
    pub fn discard_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        Self::with_suffix(input_file.as_ref(), DISCARD_SUFFIX)
    }

    // `notes/brown.docx` + `_PARSED.ris` -> `notes/brown_PARSED.ris`
    fn with_suffix(input_file: &Path, suffix: &str) -> PathBuf {
        let stem = input_file.file_stem().unwrap_or_default();
        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push_str(suffix);
        match input_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }

    /// True for files this tool wrote itself; these are never parsed again
    pub fn is_output_artifact<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .file_name()
            .map(|name| {
                let name = name.to_string_lossy();
                name.ends_with(PARSED_SUFFIX) || name.ends_with(DISCARD_SUFFIX)
            })
            .unwrap_or(false)
    }

    /// Find parseable input files directly inside a directory, sorted by name
    pub fn find_input_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || Self::is_output_artifact(path) {
                continue;
            }
            if Self::detect_file_type(path) != FileType::Unknown {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Write bytes to a file
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Classify an input file by its extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        match path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("txt") => FileType::Text,
            Some("docx") => FileType::Docx,
            _ => FileType::Unknown,
        }
    }
}

/// Enum representing different file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Plain text quote notebook
    Text,
    /// Word-processor (.docx) quote notebook
    Docx,
    /// Anything else
    Unknown,
}

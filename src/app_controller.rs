use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, FileType};
use crate::parser;
use crate::ris_writer::{self, WriteOptions};
use crate::utf8_validation::{self, Utf8Report};

// @module: Application controller for notebook conversion

// @struct: What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub parsed: PathBuf,
    // @field: Written only when lines were discarded
    pub discards: Option<PathBuf>,
    pub source_count: usize,
    pub quote_count: usize,
    pub discard_count: usize,
}

// @struct: Totals of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub quotes: usize,
    pub discards: usize,
}

/// Main application controller for quote notebook conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Print each parsed document as JSON on stdout
    dump_json: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            dump_json: false,
        })
    }

    /// Also print parsed documents as JSON
    pub fn with_json_dump(mut self, dump_json: bool) -> Self {
        self.dump_json = dump_json;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn write_options(&self) -> WriteOptions {
        self.config.output.write_options()
    }

    /// Convert a file or every notebook of a directory
    pub fn run<P: AsRef<Path>>(&self, input: P) -> Result<()> {
        let input = self.config.resolve_input(input)?;
        if input.is_file() {
            self.process_file(&input)?;
            Ok(())
        } else if input.is_dir() {
            let summary = self.run_folder(&input)?;
            if summary.processed == 0 && summary.failed > 0 {
                return Err(anyhow!("No file in {} could be processed", input.display()));
            }
            Ok(())
        } else {
            Err(AppError::File(format!("Input path does not exist: {:?}", input)).into())
        }
    }

    /// Parse one notebook and write its RIS and discard files
    pub fn process_file<P: AsRef<Path>>(&self, input_file: P) -> Result<FileReport> {
        let input_file = input_file.as_ref();
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)).into());
        }
        if FileManager::is_output_artifact(input_file) {
            return Err(AppError::File(format!(
                "Refusing to parse a file this tool wrote: {}",
                input_file.display()
            ))
            .into());
        }

        let document = parser::parse_file(input_file)
            .map_err(AppError::from)
            .with_context(|| format!("Failed to read {}", input_file.display()))?;

        if self.dump_json {
            let json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize parsed document to JSON")?;
            println!("{}", json);
        }

        let written = ris_writer::write_results(&document, &self.write_options())?;
        debug!(
            "{} converted in {}",
            input_file.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(FileReport {
            input: input_file.to_path_buf(),
            parsed: written.parsed,
            discards: written.discards,
            source_count: document.sources.len(),
            quote_count: document.quote_count(),
            discard_count: document.discards.len(),
        })
    }

    /// Convert every notebook directly inside a directory
    pub fn run_folder<P: AsRef<Path>>(&self, input_dir: P) -> Result<BatchSummary> {
        let input_dir = input_dir.as_ref();
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        let input_files = FileManager::find_input_files(input_dir)?;
        let mut summary = BatchSummary::default();
        if input_files.is_empty() {
            warn!("No .txt or .docx notebooks found in {}", input_dir.display());
            return Ok(summary);
        }

        let folder_pb = Self::folder_progress_bar(input_files.len());

        for input_file in &input_files {
            let file_name = input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));
            folder_pb.suspend(|| info!("Processing {}...", file_name));

            match self.process_file(input_file) {
                Ok(report) => {
                    summary.processed += 1;
                    summary.quotes += report.quote_count;
                    summary.discards += report.discard_count;
                }
                Err(e) => {
                    folder_pb.suspend(|| error!("Error processing file {}: {:#}", file_name, e));
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} failed ({} quotes, {} discarded lines) in {}",
            summary.processed,
            summary.failed,
            summary.quotes,
            summary.discards,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// UTF-8 check of a text notebook or of every text notebook in a directory
    pub fn run_validate<P: AsRef<Path>>(&self, input: P) -> Result<Vec<(PathBuf, Utf8Report)>> {
        let input = self.config.resolve_input(input)?;
        let files = if input.is_file() {
            vec![input.clone()]
        } else if input.is_dir() {
            FileManager::find_input_files(&input)?
        } else {
            return Err(AppError::File(format!("Input path does not exist: {:?}", input)).into());
        };

        let mut reports = Vec::new();
        for file in files {
            if FileManager::detect_file_type(&file) != FileType::Text {
                debug!("Skipping non-text file {}", file.display());
                continue;
            }
            let report = utf8_validation::validate_file(&file)?;
            reports.push((file, report));
        }

        let invalid = reports.iter().filter(|(_, report)| !report.valid).count();
        info!("Checked {} file(s): {} with invalid UTF-8", reports.len(), invalid);
        Ok(reports)
    }

    fn folder_progress_bar(len: usize) -> ProgressBar {
        let folder_pb = ProgressBar::new(len as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");
        folder_pb
    }

    /// Format a duration as `1h 2m 3s`, `2m 3s` or `3.400s`
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

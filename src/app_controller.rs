/*!
 * File orchestration: detect shape, extract, batch-translate, patch.
 *
 * The controller owns the sequential batch loop. Batches are awaited one at
 * a time, a cooperative pause flag is polled at batch boundaries, and a
 * failed batch degrades to identity translations instead of aborting the
 * file. The caller's document is never mutated; the patched result is a
 * fresh value.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use parking_lot::Mutex;
use serde_json::Value;

use crate::app_config::Config;
use crate::extractor;
use crate::file_utils::FileManager;
use crate::game_data::{DocumentKind, TranslatedUnit};
use crate::patcher;
use crate::translation::{BatchOutcome, TranslationService};

/// Log severities surfaced to the external log collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

/// External log sink
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, message: &str);
}

/// Default log sink routing into the `log` facade
pub struct StderrLog;

impl LogSink for StderrLog {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info | Severity::Success => info!("{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// In-memory log sink for tests and capture
#[derive(Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().clone()
    }
}

impl LogSink for MemoryLog {
    fn log(&self, severity: Severity, message: &str) {
        self.entries.lock().push((severity, message.to_string()));
    }
}

/// How a unit's translation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// Came back from the API
    Translated,
    /// Identity fallback after a batch failure
    Fallback,
}

/// External live-preview sink, fed per unit as each batch completes
pub trait PreviewSink: Send + Sync {
    fn on_translation(
        &self,
        original: &str,
        translated: &str,
        filename: &str,
        status: TranslationStatus,
    );

    fn on_batch_done(&self, completed_batches: usize, total_batches: usize, filename: &str);
}

/// Preview sink that ignores everything
pub struct NullPreview;

impl PreviewSink for NullPreview {
    fn on_translation(&self, _: &str, _: &str, _: &str, _: TranslationStatus) {}
    fn on_batch_done(&self, _: usize, _: usize, _: &str) {}
}

/// Cooperative pause provider, polled once per batch boundary
///
/// A batch already in flight always completes; there is no mid-request
/// cancellation.
pub trait PauseSignal: Send + Sync {
    fn is_paused(&self) -> bool;
}

/// Pause signal that never pauses
pub struct NeverPaused;

impl PauseSignal for NeverPaused {
    fn is_paused(&self) -> bool {
        false
    }
}

/// Shareable pause flag for interactive callers
#[derive(Clone, Default)]
pub struct SharedPauseFlag {
    flag: Arc<AtomicBool>,
}

impl SharedPauseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl PauseSignal for SharedPauseFlag {
    fn is_paused(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Summary of one file translation
#[derive(Debug, Clone, Default)]
pub struct TranslationReport {
    /// Units extracted from the document
    pub total_units: usize,
    /// Units that came back from successful batches
    pub translated_units: usize,
    /// Batches that fell back to identity translations
    pub failed_batches: usize,
    /// Batches actually processed
    pub completed_batches: usize,
    /// Total batches the unit list was chunked into
    pub total_batches: usize,
    /// Whether the run stopped early on the pause flag
    pub paused: bool,
}

impl TranslationReport {
    /// True when every extracted unit went through the API
    pub fn is_fully_translated(&self) -> bool {
        self.failed_batches == 0 && !self.paused
    }
}

/// Main application controller
pub struct Controller {
    /// Application configuration
    config: Config,
    /// Translation service
    service: TranslationService,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let service = TranslationService::new(config.clone())?;
        Ok(Self { config, service })
    }

    /// Create a controller around an existing service, for tests
    pub fn with_service(service: TranslationService) -> Self {
        Self {
            config: service.config.clone(),
            service,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate one parsed document with default collaborators
    pub async fn translate_file(&self, document: &Value, filename: &str) -> Result<Value> {
        let (patched, _) = self
            .translate_file_with(document, filename, &StderrLog, &NullPreview, &NeverPaused)
            .await?;
        Ok(patched)
    }

    /// Translate one parsed document with explicit collaborators
    ///
    /// Returns the patched document and a report distinguishing fully,
    /// partially and untranslated outcomes. The input document is never
    /// mutated, including on every error path.
    pub async fn translate_file_with(
        &self,
        document: &Value,
        filename: &str,
        log: &dyn LogSink,
        preview: &dyn PreviewSink,
        pause: &dyn PauseSignal,
    ) -> Result<(Value, TranslationReport)> {
        let kind = DocumentKind::detect(filename);
        let units = extractor::extract_units(kind, document, &self.config);

        // Nothing to translate and an unrecognized shape look the same
        // here, and both return the document unchanged.
        if units.is_empty() {
            log.log(
                Severity::Info,
                &format!("No translatable text in {}", filename),
            );
            return Ok((document.clone(), TranslationReport::default()));
        }

        // Missing credentials are fatal for the whole file, before any
        // batch is attempted.
        self.service.check_credentials()?;

        let batch_size = self.config.batch_size.max(1);
        let batches: Vec<&[_]> = units.chunks(batch_size).collect();

        let mut report = TranslationReport {
            total_units: units.len(),
            total_batches: batches.len(),
            ..Default::default()
        };
        let mut translated: Vec<TranslatedUnit> = Vec::with_capacity(units.len());

        for (batch_index, batch) in batches.iter().enumerate() {
            if pause.is_paused() {
                log.log(
                    Severity::Warning,
                    &format!(
                        "Paused before batch {} of {}; returning partial result",
                        batch_index + 1,
                        report.total_batches
                    ),
                );
                report.paused = true;
                break;
            }

            let outcome = match self.service.translate_batch(batch).await {
                Ok(batch_units) => {
                    report.translated_units += batch_units.len();
                    BatchOutcome::Translated(batch_units)
                }
                Err(e) => {
                    log.log(
                        Severity::Error,
                        &format!(
                            "Batch {} of {} failed, keeping original text: {}",
                            batch_index + 1,
                            report.total_batches,
                            e
                        ),
                    );
                    report.failed_batches += 1;
                    BatchOutcome::Failed {
                        units: batch.iter().cloned().map(TranslatedUnit::identity).collect(),
                        reason: e.to_string(),
                    }
                }
            };

            let status = if outcome.is_failed() {
                TranslationStatus::Fallback
            } else {
                TranslationStatus::Translated
            };
            for unit in outcome.units() {
                preview.on_translation(&unit.unit.original, &unit.translated, filename, status);
            }

            report.completed_batches += 1;
            preview.on_batch_done(report.completed_batches, report.total_batches, filename);

            translated.extend(outcome.into_units());

            let delay_ms = self.config.provider.rate_limit_delay_ms;
            if delay_ms > 0 && batch_index + 1 < report.total_batches {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }

        let patched = patcher::apply_translations(document, &translated);

        log.log(
            Severity::Success,
            &format!(
                "{}: {} of {} units translated across {} batches",
                filename, report.translated_units, report.total_units, report.completed_batches
            ),
        );

        Ok((patched, report))
    }

    /// Translate a single JSON file on disk and write the result
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!(
                "Input file does not exist: {}",
                input_file.display()
            ));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.target_language,
        );
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {}, translation already exists (use -f to force overwrite)",
                input_file.display()
            );
            return Ok(());
        }

        let filename = input_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .context("Input path has no filename")?;

        let document = FileManager::read_json(&input_file)?;

        let progress = BatchProgress::new();
        let (patched, report) = self
            .translate_file_with(&document, &filename, &StderrLog, &progress, &NeverPaused)
            .await?;
        progress.finish();

        FileManager::write_json_atomic(&output_path, &patched)?;

        info!(
            "Wrote {} ({} of {} units translated)",
            output_path.display(),
            report.translated_units,
            report.total_units
        );

        Ok(())
    }

    /// Translate every JSON data file under a directory, sequentially
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {}",
                input_dir.display()
            ));
        }

        let target_suffix = format!(".{}.json", self.config.target_language);
        let files: Vec<PathBuf> = FileManager::find_json_files(&input_dir)?
            .into_iter()
            .filter(|path| {
                // Never re-translate our own output files.
                !path
                    .file_name()
                    .map(|name| name.to_string_lossy().ends_with(&target_suffix))
                    .unwrap_or(false)
            })
            .collect();

        if files.is_empty() {
            warn!("No JSON files found in {}", input_dir.display());
            return Ok(());
        }

        info!("Found {} JSON files to process", files.len());

        for file in files {
            let output_dir = file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.clone());

            if let Err(e) = self.run(file.clone(), output_dir, force_overwrite).await {
                // One bad file must not stop the rest of the project.
                error!("Failed to translate {}: {}", file.display(), e);
            }
        }

        info!("Run finished: {}", self.service.cost_snapshot().summary());

        Ok(())
    }
}

/// Preview sink driving an indicatif batch progress bar
struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    fn new() -> Self {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::with_template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} batches")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl PreviewSink for BatchProgress {
    fn on_translation(&self, _: &str, _: &str, _: &str, _: TranslationStatus) {}

    fn on_batch_done(&self, completed_batches: usize, total_batches: usize, filename: &str) {
        if self.bar.is_hidden() {
            self.bar
                .set_draw_target(indicatif::ProgressDrawTarget::stderr());
            self.bar.set_length(total_batches as u64);
            self.bar.set_prefix(filename.to_string());
        }
        self.bar.set_position(completed_batches as u64);
    }
}

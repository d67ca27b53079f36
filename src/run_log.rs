/*!
 * Per-run event log.
 *
 * A `RunLog` is created for each translation run and handed to the pipeline.
 * Every stage event is kept in memory, forwarded to the `log` facade and,
 * when a log directory is configured, appended to a run-specific file.
 */

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Pipeline stage an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Analysis,
    TmSearch,
    Translation,
    Review,
    Qa,
    TmSave,
    SectionParsing,
    SectionProgress,
    Completion,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStage::Analysis => "analysis",
            RunStage::TmSearch => "tm_search",
            RunStage::Translation => "translation",
            RunStage::Review => "review",
            RunStage::Qa => "qa",
            RunStage::TmSave => "tm_save",
            RunStage::SectionParsing => "section_parsing",
            RunStage::SectionProgress => "section_progress",
            RunStage::Completion => "completion",
        };
        write!(f, "{}", name)
    }
}

/// One recorded event
#[derive(Debug, Clone)]
pub struct RunEvent {
    pub at: DateTime<Local>,
    pub stage: RunStage,
    pub message: String,
}

impl std::fmt::Display for RunEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.at.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.stage,
            self.message
        )
    }
}

/// Event log for a single run
#[derive(Debug)]
pub struct RunLog {
    run_id: Uuid,
    started_at: DateTime<Local>,
    events: Vec<RunEvent>,
    file_path: Option<PathBuf>,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    /// In-memory run log
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Local::now(),
            events: Vec::new(),
            file_path: None,
        }
    }

    /// Run log that also appends to `translation_<timestamp>_<short-id>.log` in `dir`
    pub fn with_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

        let mut run_log = Self::new();
        let file_name = format!(
            "translation_{}_{}.log",
            run_log.started_at.format("%Y%m%d_%H%M%S"),
            run_log.short_id()
        );
        run_log.file_path = Some(dir.join(file_name));
        Ok(run_log)
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// First eight hex digits of the run id
    pub fn short_id(&self) -> String {
        self.run_id.simple().to_string()[..8].to_string()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Events recorded for one stage
    pub fn events_for(&self, stage: RunStage) -> impl Iterator<Item = &RunEvent> {
        self.events.iter().filter(move |e| e.stage == stage)
    }

    /// Record an event
    pub fn record(&mut self, stage: RunStage, message: impl Into<String>) {
        let event = RunEvent {
            at: Local::now(),
            stage,
            message: message.into(),
        };

        match stage {
            RunStage::Completion => info!("[{}] {}: {}", self.short_id(), stage, event.message),
            _ => debug!("[{}] {}: {}", self.short_id(), stage, event.message),
        }

        if let Some(path) = &self.file_path {
            if let Err(e) = append_line(path, &event.to_string()) {
                warn!("{:#}", e);
            }
        }

        self.events.push(event);
    }

    /// Record the completion event with the elapsed time since the run started
    pub fn finish(&mut self, outcome: &str) {
        let elapsed = Local::now() - self.started_at;
        let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
        self.record(
            RunStage::Completion,
            format!("{} in {:.2}s", outcome, seconds),
        );
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open run log file: {}", path.display()))?;

    writeln!(file, "{}", line)
        .with_context(|| format!("Failed to write to run log file: {}", path.display()))?;

    Ok(())
}

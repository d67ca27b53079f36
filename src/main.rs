// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use patentko::app_config::{self, Config};
use patentko::pipeline::{DocumentOutcome, TranslationPipeline};
use patentko::qa::render_report;
use patentko::run_log::RunLog;
use patentko::sections::{DocumentType, SectionParser, in_document_order};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for DocumentType to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDocumentType {
    Claim,
    Specification,
    Abstract,
}

impl From<CliDocumentType> for DocumentType {
    fn from(cli_type: CliDocumentType) -> Self {
        match cli_type {
            CliDocumentType::Claim => DocumentType::Claim,
            CliDocumentType::Specification => DocumentType::Specification,
            CliDocumentType::Abstract => DocumentType::Abstract,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate an English patent text file into Korean
    Translate {
        /// English source file (UTF-8 text)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <FILE stem>_ko.txt next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document type of the whole text (ignored with --sections)
        #[arg(short = 't', long = "type", value_enum, default_value = "claim")]
        document_type: CliDocumentType,

        /// Split the document into sections and translate each one
        #[arg(long)]
        sections: bool,

        /// Skip the self-review pass
        #[arg(long)]
        no_review: bool,

        /// Do not save translations to the translation memory
        #[arg(long)]
        no_tm: bool,

        /// Oracle command line (overrides oracle.command from the config)
        #[arg(long, env = "PATENTKO_ORACLE_CMD")]
        oracle_cmd: Option<String>,
    },

    /// Run the QA checks on an existing translation
    Qa {
        /// English source file
        #[arg(long)]
        source: PathBuf,

        /// Korean translation file
        #[arg(long)]
        translation: PathBuf,

        /// Document type
        #[arg(short = 't', long = "type", value_enum, default_value = "claim")]
        document_type: CliDocumentType,
    },

    /// Show how a document is split into sections
    Sections {
        /// Patent text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show translation memory statistics
    TmStats,

    /// Search the translation memory
    TmSearch {
        /// Source text to look up
        text: String,

        /// Restrict fuzzy matches to a domain
        #[arg(short, long)]
        domain: Option<String>,

        /// Minimum similarity (0.0 - 1.0)
        #[arg(long, default_value_t = 0.7)]
        threshold: f64,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 5)]
        max: usize,
    },

    /// Add an entry to the translation memory
    TmAdd {
        /// English source text
        #[arg(long)]
        source: String,

        /// Korean translation
        #[arg(long)]
        target: String,

        /// Technical domain
        #[arg(short, long, default_value = "general")]
        domain: String,

        /// Document type
        #[arg(short = 't', long = "type", value_enum, default_value = "claim")]
        document_type: CliDocumentType,

        /// Quality score (0 - 10)
        #[arg(long, default_value_t = 10)]
        score: i64,
    },

    /// Generate shell completions for patentko
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// patentko - English to Korean patent translation
///
/// Translates patent documents through an external translation oracle,
/// reusing earlier work from a translation memory and checking every
/// translation against Korean patent drafting rules.
#[derive(Parser, Debug)]
#[command(name = "patentko")]
#[command(version)]
#[command(about = "English to Korean patent translation with translation memory and QA")]
#[command(long_about = "patentko translates English patent documents into Korean through an external oracle.

EXAMPLES:
    patentko translate claims.txt --oracle-cmd 'python3 oracle.py'
    patentko translate patent.txt --sections -o patent_ko.txt
    patentko qa --source claim.txt --translation claim_ko.txt
    patentko sections patent.txt
    patentko tm-search \"A method comprising\" --threshold 0.8
    patentko completions bash > patentko.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

ORACLE PROTOCOL:
    The oracle command receives one JSON request on stdin and must print one
    JSON object on stdout: {\"success\": true, \"translation\": \"...\"} or
    {\"success\": false, \"error\": \"...\"}.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "patentko", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Translate {
            input,
            output,
            document_type,
            sections,
            no_review,
            no_tm,
            oracle_cmd,
        } => {
            if no_review {
                config.pipeline.self_review = false;
            }
            if no_tm {
                config.pipeline.save_to_tm = false;
            }
            let output = output.unwrap_or_else(|| default_output_path(&input));
            run_translate(
                &config,
                &input,
                &output,
                document_type.into(),
                sections,
                oracle_cmd.as_deref(),
            )
            .await
        }
        Commands::Qa {
            source,
            translation,
            document_type,
        } => run_qa(&config, &source, &translation, document_type.into()),
        Commands::Sections { input } => run_sections(&input),
        Commands::TmStats => {
            let memory = config.open_memory()?;
            println!("{}", memory.stats()?);
            memory.close()?;
            Ok(())
        }
        Commands::TmSearch {
            text,
            domain,
            threshold,
            max,
        } => {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(anyhow!("--threshold must be between 0.0 and 1.0"));
            }
            let memory = config.open_memory()?;
            let matches = memory.search(&text, domain.as_deref(), threshold, max)?;
            if matches.is_empty() {
                println!("No matches");
            }
            for (i, m) in matches.iter().enumerate() {
                println!(
                    "{}. [{} {:.1}%] (domain: {}, quality: {})",
                    i + 1,
                    m.match_type,
                    m.similarity * 100.0,
                    m.domain,
                    m.quality_score
                );
                println!("   EN: {}", m.source);
                println!("   KO: {}", m.target);
            }
            memory.close()?;
            Ok(())
        }
        Commands::TmAdd {
            source,
            target,
            domain,
            document_type,
            score,
        } => {
            let memory = config.open_memory()?;
            if !memory.put(&source, &target, &domain, document_type.into(), score) {
                return Err(anyhow!("Failed to save entry to the translation memory"));
            }
            info!("Saved entry ({} total)", memory.entry_count()?);
            memory.close()?;
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// `<stem>_ko.txt` next to the input
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "translation".to_string());
    input.with_file_name(format!("{}_ko.txt", stem))
}

/// `<output>.qa.txt`
fn report_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".qa.txt");
    PathBuf::from(name)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

async fn run_translate(
    config: &Config,
    input: &Path,
    output: &Path,
    document_type: DocumentType,
    by_sections: bool,
    oracle_cmd: Option<&str>,
) -> Result<()> {
    let source = read_text(input)?;
    let oracle = config.oracle(oracle_cmd)?;
    let pipeline = TranslationPipeline::new(
        config.pipeline.clone(),
        config.qa_engine()?,
        config.open_memory()?,
    );
    let mut run_log = match &config.log_dir {
        Some(dir) => RunLog::with_directory(dir)?,
        None => RunLog::new(),
    };

    info!("🚀 patentko: {} -> {} (run {})", input.display(), output.display(), run_log.short_id());

    let (translation, report) = if by_sections {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sections ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let callback = |done: usize, total: usize| {
            progress_bar.set_length(total as u64);
            progress_bar.set_position(done as u64);
        };
        let result = pipeline
            .translate_document(&oracle, &source, &mut run_log, Some(&callback))
            .await;
        progress_bar.finish_and_clear();

        let outcome = result?;
        info!("{}", outcome.summary());
        let report = document_report(&outcome);
        (outcome.translation, report)
    } else {
        let outcome = pipeline
            .translate_text(&oracle, &source, document_type, &mut run_log)
            .await?;
        info!(
            "Translated via {} (review: {})",
            outcome.origin, outcome.review_status
        );
        let report = match &outcome.qa_report {
            Some(report) => render_report(report),
            None => "Translation taken from the translation memory; QA not run.".to_string(),
        };
        if !outcome.passed() {
            warn!("Translation did not pass QA; see the report");
        }
        (outcome.translation, report)
    };

    write_text(output, &translation)?;
    let qa_path = report_path(output);
    write_text(&qa_path, &report)?;
    info!("Success: {} (QA report: {})", output.display(), qa_path.display());

    pipeline.into_memory().close()?;
    Ok(())
}

/// One report block per section
fn document_report(outcome: &DocumentOutcome) -> String {
    let mut blocks = vec![format!("Document: {}", outcome.summary())];
    for section in &outcome.sections {
        blocks.push(format!(
            "## Section {} ({}, via {})",
            section.index + 1,
            section.section_type,
            section.outcome.origin
        ));
        blocks.push(match &section.outcome.qa_report {
            Some(report) => render_report(report),
            None => "QA not run (translation memory hit)".to_string(),
        });
    }
    blocks.join("\n\n")
}

fn run_qa(config: &Config, source: &Path, translation: &Path, document_type: DocumentType) -> Result<()> {
    let engine = config.qa_engine()?;
    let source = read_text(source)?;
    let translation = read_text(translation)?;

    let analysis = patentko::analysis::DocumentAnalyzer::new(engine.terminology()).analyze(&source);
    let report = engine.check_all(&source, &translation, &analysis.term_mapping, document_type);
    println!("{}", render_report(&report));

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_sections(input: &Path) -> Result<()> {
    let text = read_text(input)?;
    let sections = SectionParser::new().parse(&text);

    for (i, section) in in_document_order(&sections).into_iter().enumerate() {
        let preview: String = section.content.chars().take(60).collect();
        println!(
            "{:>3}. {:<13} lines {}-{} ({})  {}",
            i + 1,
            section.section_type.to_string(),
            section.start_line + 1,
            section.end_line + 1,
            if section.heading.is_empty() { "-" } else { section.heading.as_str() },
            preview.replace('\n', " ")
        );
    }
    Ok(())
}

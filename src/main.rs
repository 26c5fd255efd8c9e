// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use autotrans::app_config::{Config, LogLevel, SafeMode};
use autotrans::app_controller::Controller;

/// CLI wrapper for SafeMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSafeMode {
    Strict,
    Balanced,
    Aggressive,
}

impl From<CliSafeMode> for SafeMode {
    fn from(cli_mode: CliSafeMode) -> Self {
        match cli_mode {
            CliSafeMode::Strict => SafeMode::Strict,
            CliSafeMode::Balanced => SafeMode::Balanced,
            CliSafeMode::Aggressive => SafeMode::Aggressive,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate RPG Maker JSON data files using an AI provider (default command)
    #[command(alias = "tr")]
    Translate(TranslateArgs),

    /// Generate shell completions for autotrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input JSON data file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the translation endpoint
    #[arg(short = 'k', long, env = "DEEPSEEK_API_KEY")]
    api_key: Option<String>,

    /// Source language code (e.g., 'ja', 'en', 'zh')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'vi', 'en', 'ko')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Note-field safety policy
    #[arg(long, value_enum)]
    safe_mode: Option<CliSafeMode>,

    /// Number of texts per API request
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// autotrans - AI translation for RPG Maker MV/MZ data files
#[derive(Parser, Debug)]
#[command(name = "autotrans")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered RPG Maker MV/MZ translation tool")]
#[command(long_about = "autotrans extracts the translatable text from RPG Maker MV/MZ JSON data
files (maps, database tables, common events), translates it in batches with a
chat-completion API, and writes structurally identical JSON back out. Plugin
tags, code-like strings and engine control codes are detected and preserved.

EXAMPLES:
    autotrans Map001.json                       # Translate one map with default config
    autotrans -s ja -t vi www/data/             # Translate a whole data directory
    autotrans -f --safe-mode strict Items.json  # Overwrite outputs, never touch notes
    autotrans -k sk-... -b 20 Actors.json       # Explicit key, 20 texts per request
    autotrans completions bash > autotrans.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically. The API key can also
    be supplied via the DEEPSEEK_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input JSON data file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the translation endpoint
    #[arg(short = 'k', long, env = "DEEPSEEK_API_KEY")]
    api_key: Option<String>,

    /// Source language code (e.g., 'ja', 'en', 'zh')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'vi', 'en', 'ko')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Note-field safety policy
    #[arg(long, value_enum)]
    safe_mode: Option<CliSafeMode>,

    /// Number of texts per API request
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "autotrans", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                model: cli.model,
                api_key: cli.api_key,
                source_language: cli.source_language,
                target_language: cli.target_language,
                safe_mode: cli.safe_mode,
                batch_size: cli.batch_size,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        let config = Config::default();
        let serialized = serde_json::to_string_pretty(&config)?;
        std::fs::write(config_path, serialized)
            .context(format!("Failed to create config file: {}", config_path))?;
        info!("Created default configuration at {}", config_path);
        config
    };

    // Apply command-line overrides on top of the file
    if let Some(model) = options.model {
        config.provider.model = model;
    }
    if let Some(api_key) = options.api_key {
        config.provider.api_key = api_key;
    }
    if let Some(source) = options.source_language {
        config.source_language = source;
    }
    if let Some(target) = options.target_language {
        config.target_language = target;
    }
    if let Some(safe_mode) = options.safe_mode {
        config.safe_mode = safe_mode.into();
    }
    if let Some(batch_size) = options.batch_size {
        config.batch_size = batch_size;
    }

    // Config log level applies unless the command line already set one
    if options.log_level.is_none() {
        let level = match config.log_level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(level);
    }

    let controller = Controller::with_config(config)?;

    let input_path = options.input_path;
    if input_path.is_dir() {
        controller
            .run_folder(input_path, options.force_overwrite)
            .await
    } else {
        let output_dir = input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        controller
            .run(input_path, output_dir, options.force_overwrite)
            .await?;
        info!(
            "Run finished: {}",
            controller.service().cost_snapshot().summary()
        );
        Ok(())
    }
}

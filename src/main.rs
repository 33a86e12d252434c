// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use docalign::app_config::{self, Config};
use docalign::app_controller::Controller;
use docalign::errors::AppError;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert extracted plain text into alignment JSON
    Segment(SegmentArgs),

    /// Render a translated alignment JSON file into a DOCX document
    Render(RenderArgs),

    /// Generate shell completions for docalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SegmentArgs {
    /// Input text file (e.g. pdftotext output), UTF-8
    #[arg(value_name = "INPUT")]
    input_path: PathBuf,

    /// Alignment JSON output file; printed to standard output when omitted
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Also write a translation placeholder file (records with empty 'ja' fields)
    #[arg(short = 't', long, value_name = "PATH")]
    translation_placeholder: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Translated alignment JSON file
    #[arg(value_name = "INPUT")]
    input_path: PathBuf,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT")]
    output_path: PathBuf,

    /// Show the source text above each translation
    #[arg(long)]
    bilingual: bool,

    /// Document title (default: "Document Translation")
    #[arg(long)]
    title: Option<String>,

    /// Font name (default: Yu Mincho)
    #[arg(long = "font", value_name = "NAME")]
    font_name: Option<String>,

    /// Font size in points (default: 10.5)
    #[arg(long, value_name = "POINTS")]
    font_size: Option<f32>,
}

/// docalign - bilingual alignment tooling for extracted documents
#[derive(Parser, Debug)]
#[command(name = "docalign")]
#[command(version)]
#[command(about = "Segment extracted text into alignment JSON and render translations to DOCX")]
#[command(long_about = "docalign turns plain-text dumps of documents into alignment JSON for translation,
and renders translated alignment files into DOCX documents.

EXAMPLES:
    docalign segment input.txt -o alignment.json                    # Write alignment JSON
    docalign segment input.txt -o alignment.json -t translation.json # Also write a placeholder file
    docalign segment input.txt                                       # Print alignment JSON
    docalign render translated.json output.docx                      # Translation only
    docalign render translated.json output.docx --bilingual          # Source and translation
    docalign render translated.json output.docx --title \"Spec (Japanese)\" --font \"Hiragino Mincho ProN\" --font-size 11
    docalign completions bash > docalign.bash                        # Generate bash completions

CONFIGURATION:
    An optional JSON configuration file can be given with --config. It holds the
    noise patterns stripped before segmentation and the renderer styling. If the
    file doesn't exist, a default one will be created there.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => "",
            Level::Debug => "🔍",
            Level::Trace => "📋",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "docalign", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = match &cli.config_path {
        Some(config_path) => Config::load_or_create(config_path)
            .map_err(|e| AppError::Config(format!("{:#}", e)))?,
        None => Config::default(),
    };

    // Command line wins over the config file
    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    if let Commands::Render(args) = &cli.command {
        apply_render_overrides(&mut config, args);
    }

    config
        .validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Segment(args) => {
            debug!("Segmenting {:?}", args.input_path);
            controller.run_segment(
                &args.input_path,
                args.output.as_deref(),
                args.translation_placeholder.as_deref(),
            )?;
        }
        Commands::Render(args) => {
            debug!("Rendering {:?} to {:?}", args.input_path, args.output_path);
            controller.run_render(&args.input_path, &args.output_path)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

fn apply_render_overrides(config: &mut Config, args: &RenderArgs) {
    let renderer = &mut config.renderer;

    if args.bilingual {
        renderer.bilingual = true;
    }
    if let Some(title) = &args.title {
        renderer.title = Some(title.clone());
    }
    if let Some(font_name) = &args.font_name {
        renderer.font_name = font_name.clone();
    }
    if let Some(font_size) = args.font_size {
        renderer.font_size = font_size;
    }
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use qris::app_config::{self, Config, default_config_path};
use qris::app_controller::Controller;
use qris::encoding::Encoding;
use qris::ris_writer::LineEnding;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert quote notebooks to RIS (default command)
    Parse(ParseArgs),

    /// Report lines of text notebooks that are not valid UTF-8
    Validate {
        /// Notebook file or directory to check
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Show or set the working directory relative paths are resolved against
    Workdir {
        /// New working directory; omit to print the current one
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions for qris
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Notebook file (.txt or .docx) or directory of notebooks
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Default, Clone)]
struct OutputArgs {
    /// Write the batch id (parent directory name) as VL
    #[arg(long)]
    volume: bool,

    /// Write today's date as AD
    #[arg(long)]
    datestamp: bool,

    /// Character encoding of the RIS output
    #[arg(short, long, value_enum)]
    encoding: Option<Encoding>,

    /// Line ending of written files
    #[arg(long, value_enum)]
    line_ending: Option<LineEnding>,

    /// Also print each parsed document as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl OutputArgs {
    // CLI flags win over the configuration for this run
    fn apply(&self, config: &mut Config) {
        if self.volume {
            config.output.include_volume = true;
        }
        if self.datestamp {
            config.output.include_datestamp = true;
        }
        if let Some(encoding) = self.encoding {
            config.output.encoding = encoding;
        }
        if let Some(line_ending) = self.line_ending {
            config.output.line_ending = line_ending;
        }
    }
}

/// QRIS - quote notebooks to RIS
///
/// Converts plain-text and Word quote notebooks into RIS records that
/// reference managers can import, one record per quote.
#[derive(Parser, Debug)]
#[command(name = "qris")]
#[command(version)]
#[command(about = "Convert quote notebooks into RIS citation records")]
#[command(long_about = "QRIS reads quote notebooks (.txt or .docx) and writes one RIS record per quote.

EXAMPLES:
    qris notes.txt                          # Convert a notebook using the default config
    qris parse --encoding utf8 notes.docx   # Write UTF-8 instead of ANSI
    qris parse --volume --datestamp batch7/ # Convert every notebook of a directory
    qris validate notes.txt                 # Find lines that are not UTF-8
    qris workdir ~/Documents/notebooks      # Resolve relative paths against this directory
    qris completions bash > qris.bash       # Generate bash completions

OUTPUT:
    <name>_PARSED.ris is written next to each notebook. Lines that could not be
    understood go to <name>_DISCARD.txt for review; that file is only written
    when there is something to review.

CONFIGURATION:
    Configuration is stored in <config dir>/qris/conf.json by default. You can
    specify a different file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Notebook file or directory to convert
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    /// Configuration file path
    #[arg(short, long, global = true)]
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger with the most verbose level; the effective level
    // is applied through set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Completions need no configuration
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "qris", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = cli.config_path.clone().unwrap_or_else(default_config_path);
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    match cli.command {
        Some(Commands::Completions { .. }) => Ok(()),
        Some(Commands::Parse(args)) => run_parse(config, args),
        Some(Commands::Validate { input_path }) => run_validate(config, input_path),
        Some(Commands::Workdir { dir }) => run_workdir(config, &config_path, dir),
        None => {
            // Default behavior - bare INPUT_PATH means parse
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            run_parse(
                config,
                ParseArgs {
                    input_path,
                    output: cli.output,
                },
            )
        }
    }
}

fn run_parse(mut config: Config, args: ParseArgs) -> Result<()> {
    args.output.apply(&mut config);
    let controller = Controller::with_config(config)?.with_json_dump(args.output.json);
    controller.run(&args.input_path)
}

fn run_validate(config: Config, input_path: PathBuf) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let reports = controller.run_validate(&input_path)?;
    let invalid = reports.iter().filter(|(_, report)| !report.valid).count();
    if invalid > 0 {
        return Err(anyhow!("{} file(s) contain lines that are not valid UTF-8", invalid));
    }
    Ok(())
}

fn run_workdir(mut config: Config, config_path: &Path, dir: Option<PathBuf>) -> Result<()> {
    match dir {
        Some(dir) => {
            let dir = dir
                .canonicalize()
                .with_context(|| format!("Working directory does not exist: {}", dir.display()))?;
            if !dir.is_dir() {
                return Err(anyhow!("Not a directory: {}", dir.display()));
            }
            config.working_dir = Some(dir.clone());
            config.validate().context("Configuration validation failed")?;
            config.save(config_path)?;
            info!("Working directory set to {}", dir.display());
        }
        None => {
            println!("{}", config.resolve_working_dir()?.display());
        }
    }
    Ok(())
}

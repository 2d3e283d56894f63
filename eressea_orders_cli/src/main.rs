use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use eressea_orders::config::build_info;
use eressea_orders::logging::{self, codes, LogEvent, LogLevel, Logger, LoggingService};
use eressea_orders::{
    log_debug, log_success, CheckReport, Completion, GameData, LocaleTable, OrderChecker,
    OrderCompleter, RuntimeConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Order completion and checking for Eressea
#[derive(Parser)]
#[command(name = "eressea-complete", version, about)]
struct Cli {
    /// Preferences file (TOML); missing keys fall back to defaults and ERESSEA_* variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Complete the last line of a unit's orders
    Complete {
        /// Game data snapshot (JSON)
        #[arg(long)]
        world: PathBuf,
        /// Unit whose orders are being edited
        #[arg(long)]
        unit: String,
        /// Order text up to the caret; `-` reads it from stdin
        text: String,
    },

    /// Check the syntax of an order file
    Check {
        /// Order file; `-` reads it from stdin
        file: PathBuf,
    },
}

/// Forwards engine events to the `log` facade
struct LogBridge {
    structured: bool,
}

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        };
        let line = if self.structured {
            event.format_json().unwrap_or_else(|_| event.format())
        } else {
            event.format()
        };
        log::log!(target: "eressea_orders", level, "{}", line);
    }
}

fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    let min_level = config.logging.min_log_level;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(min_level.as_str().to_lowercase()),
    )
    .format_timestamp(None)
    .init();

    logging::config::init_runtime_preferences(config.logging.clone())?;
    let bridge = LogBridge {
        structured: config.logging.use_structured_logging,
    };
    let service = LoggingService::new(Arc::new(bridge), min_level.to_events_log_level());
    logging::init_global_logging_with_service(Arc::new(service))
}

fn read_input(path: &Path) -> Result<String, std::io::Error> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    init_logging(&config)?;
    log_debug!("Build limits",
        "profile" => build_info::profile(),
        "config_dir" => build_info::config_dir()
    );
    if let Some(path) = &cli.config {
        log_success!(codes::success::CONFIG_LOADED, "Preferences loaded",
            "path" => path.display()
        );
    }

    let table = LocaleTable::for_locale(config.completer.locale);

    match cli.command {
        Commands::Complete { world, unit, text } => {
            let data = GameData::from_json_file(&world)?;
            let text = if text == "-" {
                read_input(Path::new("-"))?
            } else {
                text
            };
            let completer = OrderCompleter::new(&data, &table, config.completer.clone())
                .with_lexical_preferences(config.lexical.clone());
            let completions = completer.complete_for(unit.parse()?, &text)?;
            print_completions(&completions, cli.output)?;
        }
        Commands::Check { file } => {
            let text = read_input(&file)?;
            let mut checker = OrderChecker::with_preferences(&table, config.lexical.clone());
            let report = checker.check_text(&text);
            print_report(&report, cli.output)?;
            if !report.is_clean() {
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_completions(
    completions: &[Completion],
    output: OutputFormat,
) -> Result<(), serde_json::Error> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(completions)?),
        OutputFormat::Text => {
            for completion in completions {
                if completion.name == completion.value {
                    println!("{:>4}  {}", completion.priority, completion.name);
                } else {
                    println!(
                        "{:>4}  {}  ->  {:?}",
                        completion.priority,
                        completion.name,
                        completion.insertion()
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_report(report: &CheckReport, output: OutputFormat) -> Result<(), serde_json::Error> {
    match output {
        OutputFormat::Json => {
            let errors: Vec<serde_json::Value> = report
                .errors
                .iter()
                .map(|error| {
                    serde_json::json!({
                        "line": error.line,
                        "unit": error.unit.map(|id| id.to_string()),
                        "code": error.error.error_code().as_str(),
                        "message": error.error.to_string(),
                    })
                })
                .collect();
            let summary = serde_json::json!({
                "orders_checked": report.orders_checked,
                "lines_ignored": report.lines_ignored,
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            for error in &report.errors {
                match error.unit {
                    Some(unit) => println!("line {} (unit {}): {}", error.line, unit, error.error),
                    None => println!("line {}: {}", error.line, error.error),
                }
            }
            println!(
                "{} orders checked, {} errors, {} lines ignored",
                report.orders_checked,
                report.errors.len(),
                report.lines_ignored
            );
        }
    }
    Ok(())
}

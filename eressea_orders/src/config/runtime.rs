// RUNTIME PREFERENCES (user experience, not limits)

use crate::config::compile_time;
use crate::grammar::Locale;
use crate::logging::codes::{self, Code};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::Io { .. } => codes::config::CONFIG_IO_ERROR,
            ConfigError::Parse(_) => codes::config::CONFIG_PARSE_ERROR,
            ConfigError::InvalidValue { .. } => codes::config::CONFIG_INVALID_VALUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether `//` starts a comment like `;` does
    pub double_slash_comments: bool,

    /// Whether to count tokens per kind while tokenizing
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            double_slash_comments: env::var(env_vars::LEXICAL_DOUBLE_SLASH_COMMENTS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleterPreferences {
    /// Offer only items the unit can make right now (skill and raw materials)
    pub limit_make_completion: bool,

    /// How many regions away NACH/ROUTE path completions may reach; 0 disables them
    pub move_path_radius: usize,

    /// Offer "give all resources of item X" completions after GIB <unit> <n>
    pub multi_resource_gives: bool,

    /// Locale used to write order keywords
    pub locale: Locale,
}

impl Default for CompleterPreferences {
    fn default() -> Self {
        Self {
            limit_make_completion: env::var(env_vars::COMPLETER_LIMIT_MAKE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            move_path_radius: env::var(env_vars::COMPLETER_MOVE_PATH_RADIUS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            multi_resource_gives: env::var(env_vars::COMPLETER_MULTI_RESOURCE_GIVES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            locale: env::var(env_vars::COMPLETER_LOCALE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Locale::German),
        }
    }
}

impl CompleterPreferences {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_path_radius > compile_time::completion::MAX_PATH_RADIUS {
            return Err(ConfigError::InvalidValue {
                field: "completer.move_path_radius",
                message: format!(
                    "{} exceeds the build limit of {}",
                    self.move_path_radius,
                    compile_time::completion::MAX_PATH_RADIUS
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether to print events to the console
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub completer: CompleterPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML; missing sections and keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.completer.validate()
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DOUBLE_SLASH_COMMENTS: &str = "ERESSEA_LEXICAL_DOUBLE_SLASH_COMMENTS";
    pub const LEXICAL_DETAILED_METRICS: &str = "ERESSEA_LEXICAL_DETAILED_METRICS";

    // Completer
    pub const COMPLETER_LIMIT_MAKE: &str = "ERESSEA_COMPLETER_LIMIT_MAKE";
    pub const COMPLETER_MOVE_PATH_RADIUS: &str = "ERESSEA_COMPLETER_MOVE_PATH_RADIUS";
    pub const COMPLETER_MULTI_RESOURCE_GIVES: &str = "ERESSEA_COMPLETER_MULTI_RESOURCE_GIVES";
    pub const COMPLETER_LOCALE: &str = "ERESSEA_COMPLETER_LOCALE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "ERESSEA_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "ERESSEA_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "ERESSEA_LOGGING_MIN_LEVEL";
}

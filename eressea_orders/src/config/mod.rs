//! Configuration for the order engine
//!
//! Compile-time limits come from `config/<profile>.toml` through `build.rs`;
//! runtime preferences are loaded from TOML or environment variables.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod constants;
pub mod runtime;

pub use runtime::{
    CompleterPreferences, ConfigError, LexicalPreferences, LogLevel, LoggingPreferences,
    RuntimeConfig,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("ERESSEA_BUILD_PROFILE").unwrap_or("development")
    }

    /// Configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("ERESSEA_CONFIG_DIR").unwrap_or("config")
    }
}

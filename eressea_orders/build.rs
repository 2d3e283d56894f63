// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    completion: CompletionLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_line_length: usize,
    max_tokens_per_line: usize,
    max_order_lines: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_order_arguments: usize,
    max_error_history: usize,
}

#[derive(serde::Deserialize)]
struct CompletionLimits {
    max_completions: usize,
    max_path_radius: usize,
    max_spell_level: u32,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    memory_logger_capacity: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ERESSEA_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ERESSEA_CONFIG_DIR");

    let profile =
        env::var("ERESSEA_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ERESSEA_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_LINE_LENGTH: usize = 65_536;
    const ABSOLUTE_MAX_PATH_RADIUS: usize = 32;

    if config.lexical.max_line_length == 0
        || config.lexical.max_line_length > ABSOLUTE_MAX_LINE_LENGTH
    {
        panic!("LIMITS: max_line_length must be between 1 and {ABSOLUTE_MAX_LINE_LENGTH}");
    }

    if config.lexical.max_tokens_per_line < 2 {
        panic!("LIMITS: max_tokens_per_line must leave room for a verb and end-of-order");
    }

    if config.completion.max_path_radius > ABSOLUTE_MAX_PATH_RADIUS {
        panic!("LIMITS: max_path_radius exceeds absolute maximum");
    }

    if config.completion.max_completions == 0 {
        panic!("LIMITS: max_completions must be positive");
    }

    if profile == "production" && config.completion.max_path_radius > 8 {
        panic!("PRODUCTION: max_path_radius too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_LINE_LENGTH: usize = {};
        pub const MAX_TOKENS_PER_LINE: usize = {};
        pub const MAX_ORDER_LINES: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_ORDER_ARGUMENTS: usize = {};
        pub const MAX_ERROR_HISTORY: usize = {};
    }}

    pub mod completion {{
        pub const MAX_COMPLETIONS: usize = {};
        pub const MAX_PATH_RADIUS: usize = {};
        pub const MAX_SPELL_LEVEL: u32 = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MEMORY_LOGGER_CAPACITY: usize = {};
    }}
}}
"#,
        profile,
        // Lexical
        config.lexical.max_line_length,
        config.lexical.max_tokens_per_line,
        config.lexical.max_order_lines,
        // Syntax
        config.syntax.max_order_arguments,
        config.syntax.max_error_history,
        // Completion
        config.completion.max_completions,
        config.completion.max_path_radius,
        config.completion.max_spell_level,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.memory_logger_capacity,
    );

    fs::write(output_path, constants_code).unwrap();
}

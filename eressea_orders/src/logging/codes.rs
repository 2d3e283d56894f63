//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the crate logs. Each error enum maps
//! its variants onto one of these through `error_code()`.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const CONFIG_IO_ERROR: Code = Code::new("E005");
    pub const CONFIG_PARSE_ERROR: Code = Code::new("E006");
    pub const CONFIG_INVALID_VALUE: Code = Code::new("E007");
}

/// Tokenizer error codes
pub mod lexical {
    use super::Code;

    pub const LINE_TOO_LONG: Code = Code::new("E020");
    pub const TOO_MANY_TOKENS: Code = Code::new("E021");
    pub const UNTERMINATED_STRING: Code = Code::new("E022");
    pub const INVALID_CHARACTER: Code = Code::new("E023");
}

/// Order grammar error codes
pub mod syntax {
    use super::Code;

    pub const UNKNOWN_ORDER: Code = Code::new("E040");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E041");
    pub const UNEXPECTED_END_OF_ORDER: Code = Code::new("E042");
    pub const UNTERMINATED_STRING: Code = Code::new("E043");
    pub const INVALID_ID: Code = Code::new("E044");
    pub const INVALID_NUMBER: Code = Code::new("E045");
    pub const TOO_MANY_ARGUMENTS: Code = Code::new("E046");
}

/// Game data loading error codes
pub mod game_data {
    use super::Code;

    pub const DATA_IO_ERROR: Code = Code::new("E060");
    pub const DATA_PARSE_ERROR: Code = Code::new("E061");
    pub const DANGLING_REFERENCE: Code = Code::new("E062");
    pub const DUPLICATE_ID: Code = Code::new("E063");
}

/// Completion request error codes
pub mod completion {
    use super::Code;

    pub const UNIT_NOT_FOUND: Code = Code::new("E080");
    pub const MISSING_CONTEXT: Code = Code::new("E081");
    pub const CANDIDATE_LIMIT_REACHED: Code = Code::new("E082");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const CONFIG_LOADED: Code = Code::new("I005");
    pub const ORDER_CHECK_PASSED: Code = Code::new("I041");
    pub const GAME_DATA_LOADED: Code = Code::new("I060");
    pub const COMPLETION_COMPLETE: Code = Code::new("I080");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn register(
    registry: &mut HashMap<&'static str, ErrorMetadata>,
    code: Code,
    category: &'static str,
    severity: Severity,
    recoverable: bool,
    description: &'static str,
    recommended_action: &'static str,
) {
    registry.insert(
        code.as_str(),
        ErrorMetadata {
            code: code.as_str(),
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        },
    );
}

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut r = HashMap::new();

        register(&mut r, system::INTERNAL_ERROR, "System", Severity::Critical, false,
            "Internal error in the order engine",
            "File a bug report with the order line that triggered it");

        register(&mut r, config::CONFIG_IO_ERROR, "Configuration", Severity::High, true,
            "Configuration file could not be read",
            "Check the configuration path and file permissions");
        register(&mut r, config::CONFIG_PARSE_ERROR, "Configuration", Severity::High, true,
            "Configuration file is not valid TOML",
            "Fix the TOML syntax reported in the message");
        register(&mut r, config::CONFIG_INVALID_VALUE, "Configuration", Severity::Medium, true,
            "Configuration value outside the supported range",
            "Use a value within the compile-time limits");

        register(&mut r, lexical::LINE_TOO_LONG, "Lexical", Severity::Low, true,
            "Order line exceeds the maximum line length and was truncated",
            "Split the order or shorten its text arguments");
        register(&mut r, lexical::TOO_MANY_TOKENS, "Lexical", Severity::Low, true,
            "Order line has more tokens than allowed",
            "Split the order into several lines");
        register(&mut r, lexical::UNTERMINATED_STRING, "Lexical", Severity::Low, true,
            "Quoted text is missing its closing quote",
            "Close the quote");
        register(&mut r, lexical::INVALID_CHARACTER, "Lexical", Severity::Low, true,
            "Control character in order text",
            "Remove the character");

        register(&mut r, syntax::UNKNOWN_ORDER, "Syntax", Severity::Medium, true,
            "First word of the line is not an order",
            "Use an order keyword of the active locale");
        register(&mut r, syntax::UNEXPECTED_TOKEN, "Syntax", Severity::Medium, true,
            "Argument does not fit the order's grammar",
            "Check the order's argument list");
        register(&mut r, syntax::UNEXPECTED_END_OF_ORDER, "Syntax", Severity::Medium, true,
            "Order ends before a required argument",
            "Add the missing argument");
        register(&mut r, syntax::UNTERMINATED_STRING, "Syntax", Severity::Medium, true,
            "Quoted argument is missing its closing quote",
            "Close the quote");
        register(&mut r, syntax::INVALID_ID, "Syntax", Severity::Medium, true,
            "Entity id is not a base-36 number",
            "Use the id as shown in the report");
        register(&mut r, syntax::INVALID_NUMBER, "Syntax", Severity::Medium, true,
            "Number is out of range",
            "Use a smaller amount");
        register(&mut r, syntax::TOO_MANY_ARGUMENTS, "Syntax", Severity::Low, true,
            "Order has more repeated arguments than allowed",
            "Split the order");

        register(&mut r, game_data::DATA_IO_ERROR, "GameData", Severity::High, false,
            "Game data file could not be read",
            "Check the report path");
        register(&mut r, game_data::DATA_PARSE_ERROR, "GameData", Severity::High, false,
            "Game data is not valid JSON for the world model",
            "Regenerate the game data export");
        register(&mut r, game_data::DANGLING_REFERENCE, "GameData", Severity::Medium, true,
            "Game data refers to an entity that does not exist",
            "Regenerate the game data export");
        register(&mut r, game_data::DUPLICATE_ID, "GameData", Severity::Medium, true,
            "Two entities of the same kind share an id",
            "Regenerate the game data export");

        register(&mut r, completion::UNIT_NOT_FOUND, "Completion", Severity::Medium, true,
            "Requested unit is not part of the game data",
            "Pass a unit id from the loaded report");
        register(&mut r, completion::MISSING_CONTEXT, "Completion", Severity::Low, true,
            "Unit has no region or faction in the game data",
            "Completions that need the missing context are skipped");
        register(&mut r, completion::CANDIDATE_LIMIT_REACHED, "Completion", Severity::Low, true,
            "Completion list was cut at the configured maximum",
            "Type a longer prefix");

        register(&mut r, success::SYSTEM_INITIALIZATION_COMPLETED, "Success", Severity::Low, true,
            "Logging system initialized", "None");
        register(&mut r, success::CONFIG_LOADED, "Success", Severity::Low, true,
            "Runtime configuration loaded", "None");
        register(&mut r, success::ORDER_CHECK_PASSED, "Success", Severity::Low, true,
            "Orders passed the syntax check", "None");
        register(&mut r, success::GAME_DATA_LOADED, "Success", Severity::Low, true,
            "Game data loaded and indexed", "None");
        register(&mut r, success::COMPLETION_COMPLETE, "Success", Severity::Low, true,
            "Completion request finished", "None");

        r
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_syntax_code_is_registered() {
        for code in [
            syntax::UNKNOWN_ORDER,
            syntax::UNEXPECTED_TOKEN,
            syntax::UNEXPECTED_END_OF_ORDER,
            syntax::UNTERMINATED_STRING,
            syntax::INVALID_ID,
            syntax::INVALID_NUMBER,
            syntax::TOO_MANY_ARGUMENTS,
        ] {
            assert!(get_error_metadata(code.as_str()).is_some(), "{code}");
            assert_eq!(get_category(code.as_str()), "Syntax");
        }
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
    }

    #[test]
    fn test_system_codes_are_critical() {
        assert_eq!(
            get_severity(system::INTERNAL_ERROR.as_str()),
            Severity::Critical
        );
        assert!(!is_recoverable(system::INTERNAL_ERROR.as_str()));
    }

    #[test]
    fn test_only_emitted_codes_are_registered() {
        for code in ["ERR002", "I001", "I020"] {
            assert!(get_error_metadata(code).is_none(), "{code}");
        }
        assert!(get_error_metadata(success::CONFIG_LOADED.as_str()).is_some());
    }
}

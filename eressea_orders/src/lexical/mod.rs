//! Lexical analysis of order lines

pub mod analyzer;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Tokenize one line with default preferences
pub fn tokenize(line: &str) -> TokenStream {
    LexicalAnalyzer::new().tokenize(line)
}

/// Tokenize one line with custom runtime preferences
pub fn tokenize_with_preferences(line: &str, preferences: LexicalPreferences) -> TokenStream {
    LexicalAnalyzer::with_preferences(preferences).tokenize(line)
}

//! Errors reported when an order line does not follow its verb's grammar
//!
//! Completion never surfaces these; they are the result of checking a line
//! with no completion listener attached.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown order '{word}' at {span}")]
    UnknownOrder { word: String, span: Span },

    #[error("Unexpected token: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Order ends early: expected {expected} at {span}")]
    UnexpectedEndOfOrder { expected: String, span: Span },

    #[error("Missing closing quote at {span}")]
    UnterminatedString { span: Span },

    #[error("Invalid id '{text}' at {span}")]
    InvalidId { text: String, span: Span },

    #[error("Invalid number '{text}' at {span}")]
    InvalidNumber { text: String, span: Span },

    #[error("Too many arguments (limit {limit}) at {span}")]
    TooManyArguments { limit: usize, span: Span },
}

impl SyntaxError {
    pub fn unknown_order(word: &str, span: Span) -> Self {
        Self::UnknownOrder {
            word: word.to_string(),
            span,
        }
    }

    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    pub fn unexpected_end(expected: &str, span: Span) -> Self {
        Self::UnexpectedEndOfOrder {
            expected: expected.to_string(),
            span,
        }
    }

    pub fn invalid_id(text: &str, span: Span) -> Self {
        Self::InvalidId {
            text: text.to_string(),
            span,
        }
    }

    pub fn invalid_number(text: &str, span: Span) -> Self {
        Self::InvalidNumber {
            text: text.to_string(),
            span,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnknownOrder { .. } => codes::syntax::UNKNOWN_ORDER,
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfOrder { .. } => codes::syntax::UNEXPECTED_END_OF_ORDER,
            Self::UnterminatedString { .. } => codes::syntax::UNTERMINATED_STRING,
            Self::InvalidId { .. } => codes::syntax::INVALID_ID,
            Self::InvalidNumber { .. } => codes::syntax::INVALID_NUMBER,
            Self::TooManyArguments { .. } => codes::syntax::TOO_MANY_ARGUMENTS,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnknownOrder { span, .. }
            | Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfOrder { span, .. }
            | Self::UnterminatedString { span }
            | Self::InvalidId { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::TooManyArguments { span, .. } => *span,
        }
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

//! Shared primitive types used by the tokenizer, parser and checker.

pub mod span;

pub use span::{Position, Span, Spanned};

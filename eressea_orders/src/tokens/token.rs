//! Token types for order lines

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text enclosed in quotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedText {
    /// Content without the delimiters
    pub content: String,
    /// `"` or `'`
    pub delimiter: char,
    /// Whether the closing delimiter was present
    pub terminated: bool,
}

impl QuotedText {
    /// Convert back to order text
    pub fn to_order_string(&self) -> String {
        if self.terminated {
            format!("{d}{}{d}", self.content, d = self.delimiter)
        } else {
            format!("{}{}", self.delimiter, self.content)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Word(String),
    Number(String),
    Quoted(QuotedText),
    Comment(String),
    Persist,
    EndOfOrder,
    Unknown(String),
}

/// Kind tag of a token, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Word,
    Number,
    Quoted,
    Comment,
    Persist,
    EndOfOrder,
    Unknown,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Word(_) => TokenKind::Word,
            Token::Number(_) => TokenKind::Number,
            Token::Quoted(_) => TokenKind::Quoted,
            Token::Comment(_) => TokenKind::Comment,
            Token::Persist => TokenKind::Persist,
            Token::EndOfOrder => TokenKind::EndOfOrder,
            Token::Unknown(_) => TokenKind::Unknown,
        }
    }

    /// Comments are skipped by the grammar
    pub fn is_significant(&self) -> bool {
        !matches!(self, Token::Comment(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Token::EndOfOrder)
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&str> {
        match self {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Words and numbers both spell entity ids (`abc`, `123`)
    pub fn as_id_text(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Number(s) => Some(s),
            _ => None,
        }
    }

    /// Text of a free-form argument: a word, a number or quoted text
    pub fn as_text_argument(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Number(s) => Some(s),
            Token::Quoted(q) => Some(&q.content),
            _ => None,
        }
    }

    /// The quote this token opened but did not close
    pub fn open_quote(&self) -> Option<&QuotedText> {
        match self {
            Token::Quoted(q) if !q.terminated => Some(q),
            _ => None,
        }
    }

    /// Convert back to order text
    pub fn as_order_string(&self) -> String {
        match self {
            Token::Word(s) | Token::Number(s) | Token::Unknown(s) => s.clone(),
            Token::Quoted(q) => q.to_order_string(),
            Token::Comment(c) => format!(";{}", c),
            Token::Persist => "@".to_string(),
            Token::EndOfOrder => String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EndOfOrder => write!(f, "end of order"),
            other => write!(f, "'{}'", other.as_order_string()),
        }
    }
}

/// A token with its location and trailing-whitespace flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderToken {
    pub token: Token,
    pub span: Span,
    pub followed_by_space: bool,
}

impl OrderToken {
    pub fn new(token: Token, span: Span, followed_by_space: bool) -> Self {
        Self {
            token,
            span,
            followed_by_space,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    pub fn is_end(&self) -> bool {
        self.token.is_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_round_trip_text() {
        let closed = QuotedText {
            content: "Neue Burg".to_string(),
            delimiter: '"',
            terminated: true,
        };
        let open = QuotedText {
            content: "Neue".to_string(),
            delimiter: '\'',
            terminated: false,
        };

        assert_eq!(closed.to_order_string(), "\"Neue Burg\"");
        assert_eq!(open.to_order_string(), "'Neue");
        assert!(Token::Quoted(open.clone()).open_quote().is_some());
        assert!(Token::Quoted(closed).open_quote().is_none());
    }

    #[test]
    fn test_token_accessors() {
        assert_eq!(Token::Number("10".into()).as_id_text(), Some("10"));
        assert_eq!(Token::Word("abc".into()).as_number(), None);
        assert!(!Token::Comment(" x".into()).is_significant());
        assert_eq!(Token::Persist.kind(), TokenKind::Persist);
        assert_eq!(Token::EndOfOrder.to_string(), "end of order");
        assert_eq!(Token::Word("GIB".into()).to_string(), "'GIB'");
    }
}

//! Order line tokenizer
//!
//! Tokenization never fails: over-long lines are truncated, stray control
//! characters become `Unknown` tokens and an open quote runs to the end of
//! the line. Each of these is recorded as a [`LexerError`] diagnostic and
//! logged as a warning.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{OrderToken, QuotedText, Token, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_warning};

/// Tokenizer diagnostics
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Line too long: {length} bytes (max {MAX_LINE_LENGTH}), truncated")]
    LineTooLong { length: usize },

    #[error("Too many tokens in one line (max {MAX_TOKENS_PER_LINE}), rest ignored")]
    TooManyTokens { count: usize },

    #[error("Unterminated quote starting at column {column}")]
    UnterminatedString { column: u32 },

    #[error("Invalid character {character:?} at column {column}")]
    InvalidCharacter { character: char, column: u32 },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::LineTooLong { .. } => codes::lexical::LINE_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
        }
    }
}

/// Token counts collected across all lines tokenized by one analyzer
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub lines: usize,
    pub total_tokens: usize,
    pub word_tokens: usize,
    pub number_tokens: usize,
    pub quoted_tokens: usize,
    pub comment_count: usize,
    pub persistent_orders: usize,
    pub unterminated_quotes: usize,
    pub truncated_lines: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token {
            Token::Word(_) => self.word_tokens += 1,
            Token::Number(_) => self.number_tokens += 1,
            Token::Quoted(q) => {
                self.quoted_tokens += 1;
                if !q.terminated {
                    self.unterminated_quotes += 1;
                }
            }
            Token::Comment(_) => self.comment_count += 1,
            Token::Persist => self.persistent_orders += 1,
            Token::EndOfOrder | Token::Unknown(_) => {}
        }
    }
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Characters that end a word run
fn is_word_boundary(ch: char) -> bool {
    ch.is_whitespace() || is_quote(ch) || ch == ';' || ch.is_control()
}

pub struct LexicalAnalyzer {
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
    diagnostics: Vec<LexerError>,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            preferences,
            metrics: LexicalMetrics::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn diagnostics(&self) -> &[LexerError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Tokenize a single line
    pub fn tokenize(&mut self, line: &str) -> TokenStream {
        self.tokenize_line_at(line, 1)
    }

    /// Tokenize a line of an order file; spans carry `line_number`
    pub fn tokenize_line_at(&mut self, line: &str, line_number: u32) -> TokenStream {
        self.metrics.lines += 1;
        let text = self.enforce_line_length(line.trim_end_matches(['\r', '\n']));
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut tokens: Vec<OrderToken> = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let (offset, ch) = chars[i];

            if ch.is_whitespace() {
                if let Some(last) = tokens.last_mut() {
                    last.followed_by_space = true;
                }
                i += 1;
                continue;
            }

            if tokens.len() + 1 >= MAX_TOKENS_PER_LINE {
                self.record(LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                });
                break;
            }

            let start = i;
            let next = chars.get(i + 1).map(|&(_, c)| c);

            let token = if ch == ';'
                || (ch == '/' && next == Some('/') && self.preferences.double_slash_comments)
            {
                let marker_len = if ch == ';' { 1 } else { 2 };
                i = chars.len();
                Token::Comment(text[offset + marker_len..].to_string())
            } else if ch == '@' && tokens.is_empty() {
                i += 1;
                Token::Persist
            } else if is_quote(ch) {
                i += 1;
                let content_start = i;
                while i < chars.len() && chars[i].1 != ch {
                    i += 1;
                }
                let content: String = chars[content_start..i].iter().map(|&(_, c)| c).collect();
                let terminated = i < chars.len();
                if terminated {
                    i += 1;
                } else {
                    self.record(LexerError::UnterminatedString {
                        column: start as u32 + 1,
                    });
                }
                Token::Quoted(QuotedText {
                    content,
                    delimiter: ch,
                    terminated,
                })
            } else if ch.is_control() {
                i += 1;
                self.record(LexerError::InvalidCharacter {
                    character: ch,
                    column: start as u32 + 1,
                });
                Token::Unknown(ch.to_string())
            } else {
                while i < chars.len() && !is_word_boundary(chars[i].1) {
                    i += 1;
                }
                let end_offset = chars.get(i).map(|&(o, _)| o).unwrap_or(text.len());
                let word = &text[offset..end_offset];
                if word.bytes().all(|b| b.is_ascii_digit()) {
                    Token::Number(word.to_string())
                } else {
                    Token::Word(word.to_string())
                }
            };

            let end_offset = chars.get(i).map(|&(o, _)| o).unwrap_or(text.len());
            let span = Span::new(
                Position::new(offset, line_number, start as u32 + 1),
                Position::new(end_offset, line_number, i as u32 + 1),
            );
            self.metrics.record_token(&token, &self.preferences);
            tokens.push(OrderToken::new(token, span, false));
        }

        let end = Position::new(text.len(), line_number, chars.len() as u32 + 1);
        tokens.push(OrderToken::new(Token::EndOfOrder, Span::point(end), false));

        log_debug!("Order line tokenized",
            "line" => line_number,
            "tokens" => tokens.len()
        );

        TokenStream::new(tokens)
    }

    fn enforce_line_length<'a>(&mut self, line: &'a str) -> &'a str {
        if line.len() <= MAX_LINE_LENGTH {
            return line;
        }
        self.metrics.truncated_lines += 1;
        self.record(LexerError::LineTooLong { length: line.len() });

        let mut end = MAX_LINE_LENGTH;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        &line[..end]
    }

    fn record(&mut self, error: LexerError) {
        log_warning!(code = error.error_code(), &error.to_string());
        self.diagnostics.push(error);
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream.all_tokens().iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_basic_order() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("GIB abc 10 Silber");

        assert_eq!(
            kinds(&stream),
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Number,
                TokenKind::Word,
                TokenKind::EndOfOrder
            ]
        );
        let tokens = stream.all_tokens();
        assert!(tokens[0].followed_by_space);
        assert!(!tokens[3].followed_by_space);
        assert_eq!(tokens[3].span.slice("GIB abc 10 Silber"), "Silber");
        assert_eq!(tokens[4].span.start.offset, 17);
    }

    #[test]
    fn test_offsets_are_monotonic() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("@BOTSCHAFT  EINHEIT abc \"Hallo Welt\" ; gruss");
        let offsets: Vec<usize> = stream
            .all_tokens()
            .iter()
            .map(|t| t.span.start.offset)
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_persist_marker_only_at_start() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("@ARBEITE");
        assert_eq!(stream.all_tokens()[0].token, Token::Persist);
        assert_eq!(stream.all_tokens()[1].token, Token::Word("ARBEITE".into()));

        let stream = lexer.tokenize("BANNER a@b");
        assert_eq!(stream.all_tokens()[1].token, Token::Word("a@b".into()));
    }

    #[test]
    fn test_quoted_strings() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("BENENNE EINHEIT 'Die Wache'");
        assert_matches!(
            &stream.all_tokens()[2].token,
            Token::Quoted(QuotedText { content, delimiter: '\'', terminated: true }) if content == "Die Wache"
        );

        let stream = lexer.tokenize("BANNER \"Willkommen in");
        assert_matches!(
            &stream.all_tokens()[1].token,
            Token::Quoted(QuotedText { terminated: false, .. })
        );
        assert_matches!(
            lexer.diagnostics().last(),
            Some(LexerError::UnterminatedString { column: 8 })
        );
    }

    #[test]
    fn test_comments() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("ARBEITE ; Silber verdienen");
        assert_eq!(
            stream.all_tokens()[1].token,
            Token::Comment(" Silber verdienen".into())
        );
        assert!(stream.ends_in_comment());

        let stream = lexer.tokenize("// nur ein Kommentar");
        assert_eq!(
            stream.all_tokens()[0].token,
            Token::Comment(" nur ein Kommentar".into())
        );

        let stream = lexer.tokenize("LERNE Hiebwaffen;sofort");
        assert_eq!(stream.all_tokens()[1].token, Token::Word("Hiebwaffen".into()));
        assert_matches!(stream.all_tokens()[2].token, Token::Comment(_));
    }

    #[test]
    fn test_double_slash_preference() {
        let preferences = LexicalPreferences {
            double_slash_comments: false,
            collect_detailed_metrics: true,
        };
        let mut lexer = LexicalAnalyzer::with_preferences(preferences);
        let stream = lexer.tokenize("//abc");
        assert_eq!(stream.all_tokens()[0].token, Token::Word("//abc".into()));
    }

    #[test]
    fn test_digits_and_ids() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("GIB 1a2 0 Pferd");
        assert_eq!(stream.all_tokens()[1].token, Token::Word("1a2".into()));
        assert_eq!(stream.all_tokens()[2].token, Token::Number("0".into()));
    }

    #[test]
    fn test_control_characters_become_unknown() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("GIB\u{7}abc");
        assert_eq!(stream.all_tokens()[1].token, Token::Unknown("\u{7}".into()));
        assert_matches!(
            lexer.diagnostics(),
            [LexerError::InvalidCharacter { character: '\u{7}', column: 4 }]
        );
    }

    #[test]
    fn test_long_line_is_truncated_not_rejected() {
        let mut lexer = LexicalAnalyzer::new();
        let line = format!("BANNER {}", "x".repeat(MAX_LINE_LENGTH));
        let stream = lexer.tokenize(&line);

        let end = stream.all_tokens().last().unwrap();
        assert_eq!(end.span.start.offset, MAX_LINE_LENGTH);
        assert_matches!(
            lexer.take_diagnostics().as_slice(),
            [LexerError::LineTooLong { .. }]
        );
        assert_eq!(lexer.metrics().truncated_lines, 1);
    }

    #[test]
    fn test_empty_line() {
        let mut lexer = LexicalAnalyzer::new();
        let stream = lexer.tokenize("   ");
        assert_eq!(kinds(&stream), vec![TokenKind::EndOfOrder]);
        assert_eq!(stream.completion_index(), Some(0));
    }

    #[test]
    fn test_metrics() {
        let preferences = LexicalPreferences {
            double_slash_comments: true,
            collect_detailed_metrics: true,
        };
        let mut lexer = LexicalAnalyzer::with_preferences(preferences);
        lexer.tokenize("@GIB abc 5 \"Silber");
        let metrics = lexer.metrics();
        assert_eq!(metrics.total_tokens, 5);
        assert_eq!(metrics.persistent_orders, 1);
        assert_eq!(metrics.number_tokens, 1);
        assert_eq!(metrics.unterminated_quotes, 1);
    }
}

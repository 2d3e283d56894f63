//! Syntax checking of whole order files
//!
//! An order file interleaves structure lines (`ERESSEA <faction>`,
//! `REGION x,y`, `EINHEIT <unit>`, `NÄCHSTER`) with the orders of each unit.
//! Structure lines are followed but not checked; every other line goes
//! through the order grammar.

use crate::config::compile_time::lexical::MAX_ORDER_LINES;
use crate::config::LexicalPreferences;
use crate::grammar::{OrderKey, OrderTranslations};
use crate::lexical::{tokenize, LexicalAnalyzer};
use crate::logging::{codes, with_order_context};
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::syntax::parser::check_tokens;
use crate::tokens::Token;
use crate::world::EntityId;
use crate::{log_error, log_success, log_warning};

/// Check a single order line
pub fn check_order(line: &str, translations: &dyn OrderTranslations) -> SyntaxResult<()> {
    check_tokens(tokenize(line), translations)
}

/// A syntax error and where it occurred
#[derive(Debug, Clone, PartialEq)]
pub struct LineError {
    /// 1-based line number
    pub line: usize,
    /// Unit whose orders contain the line
    pub unit: Option<EntityId>,
    pub error: SyntaxError,
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub orders_checked: usize,
    pub errors: Vec<LineError>,
    /// Lines past the `NÄCHSTER` marker or the line limit
    pub lines_ignored: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct OrderChecker<'a> {
    translations: &'a dyn OrderTranslations,
    lexer: LexicalAnalyzer,
}

impl<'a> OrderChecker<'a> {
    pub fn new(translations: &'a dyn OrderTranslations) -> Self {
        Self::with_preferences(translations, LexicalPreferences::default())
    }

    pub fn with_preferences(
        translations: &'a dyn OrderTranslations,
        preferences: LexicalPreferences,
    ) -> Self {
        Self {
            translations,
            lexer: LexicalAnalyzer::with_preferences(preferences),
        }
    }

    pub fn lexer(&self) -> &LexicalAnalyzer {
        &self.lexer
    }

    /// Check every order line of `text`
    pub fn check_text(&mut self, text: &str) -> CheckReport {
        let mut report = CheckReport::default();
        let mut unit: Option<EntityId> = None;
        let lines: Vec<&str> = text.lines().collect();

        for (offset, line) in lines.iter().enumerate() {
            let line_number = offset + 1;
            if offset >= MAX_ORDER_LINES {
                log_warning!("Order file exceeds line limit",
                    "limit" => MAX_ORDER_LINES
                );
                report.lines_ignored = lines.len() - offset;
                break;
            }

            let tokens = self.lexer.tokenize_line_at(line, line_number as u32);
            let first = tokens
                .significant_tokens()
                .find(|token| token.token != Token::Persist)
                .cloned();
            let Some(first) = first.filter(|token| !token.is_end()) else {
                continue;
            };

            let key = first
                .token
                .as_word()
                .and_then(|word| self.translations.resolve(word));
            match key {
                Some(OrderKey::Eressea) | Some(OrderKey::Faction) | Some(OrderKey::Region) => {
                    unit = None;
                    continue;
                }
                Some(OrderKey::Unit) => {
                    unit = tokens
                        .significant_tokens()
                        .nth(1)
                        .and_then(|token| token.token.as_id_text())
                        .and_then(|text| text.parse().ok());
                    continue;
                }
                Some(OrderKey::Next) => {
                    report.lines_ignored = lines.len() - line_number;
                    break;
                }
                _ => {}
            }

            report.orders_checked += 1;
            let unit_label = unit.map(|id| id.to_string()).unwrap_or_default();
            let result = with_order_context(&unit_label, Some(line_number), || {
                check_tokens(tokens, self.translations)
            });
            if let Err(error) = result {
                log_error!(error.error_code(), &error.to_string(),
                    span = error.span(),
                    "line" => line_number
                );
                report.errors.push(LineError {
                    line: line_number,
                    unit,
                    error,
                });
            }
        }

        if report.is_clean() {
            log_success!(codes::success::ORDER_CHECK_PASSED, "Orders checked",
                "orders" => report.orders_checked
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::LocaleTable;
    use assert_matches::assert_matches;

    #[test]
    fn test_check_single_line() {
        let table = LocaleTable::german();
        assert!(check_order("LERNE Magie", &table).is_ok());
        assert_matches!(
            check_order("LERNE", &table),
            Err(SyntaxError::UnexpectedEndOfOrder { .. })
        );
    }

    #[test]
    fn test_check_order_file() {
        let text = "ERESSEA abcd \"geheim\"\n\
                    REGION 0,0\n\
                    EINHEIT u1\n\
                    ARBEITE\n\
                    GIB x2 viele Silber\n\
                    EINHEIT u2\n\
                    ; nur ein Kommentar\n\
                    NACH nirgendwo\n\
                    NÄCHSTER\n\
                    das wird nicht geprüft\n";
        let table = LocaleTable::german();
        let mut checker = OrderChecker::new(&table);
        let report = checker.check_text(text);

        assert_eq!(report.orders_checked, 3);
        assert_eq!(report.lines_ignored, 1);
        assert_eq!(report.errors.len(), 2);

        assert_eq!(report.errors[0].line, 5);
        assert_eq!(report.errors[0].unit, Some("u1".parse().unwrap()));
        assert_matches!(report.errors[0].error, SyntaxError::InvalidNumber { .. });
        assert_eq!(report.errors[0].error.span().start().line, 5);

        assert_eq!(report.errors[1].line, 8);
        assert_eq!(report.errors[1].unit, Some("u2".parse().unwrap()));
        assert_matches!(report.errors[1].error, SyntaxError::UnexpectedToken { .. });
    }

    #[test]
    fn test_clean_file() {
        let table = LocaleTable::english();
        let mut checker = OrderChecker::new(&table);
        let report = checker.check_text("UNIT a\nWORK\n@GIVE b 1 Silver\n\n");
        assert!(report.is_clean());
        assert_eq!(report.orders_checked, 2);
    }
}

//! Token stream over one order line

use crate::tokens::token::{OrderToken, Token};
use crate::utils::Span;

/// Tokens of one order line with a cursor over the significant ones
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens including the comment, ending with end-of-order
    all_tokens: Vec<OrderToken>,
    /// Indices into `all_tokens` of the tokens the grammar sees
    significant_indices: Vec<usize>,
    /// Current position in `significant_indices`
    position: usize,
    /// Position in `significant_indices` where completion happens
    completion_index: Option<usize>,
}

impl TokenStream {
    /// Create a stream; appends an end-of-order token if missing
    pub fn new(mut tokens: Vec<OrderToken>) -> Self {
        if !tokens.last().is_some_and(OrderToken::is_end) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or_default();
            tokens.push(OrderToken::new(
                Token::EndOfOrder,
                Span::point(end),
                false,
            ));
        }

        let significant_indices: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.token.is_significant())
            .map(|(i, _)| i)
            .collect();

        let ends_in_comment = tokens.iter().any(|t| !t.token.is_significant());
        let completion_index = if ends_in_comment {
            None
        } else {
            let end_index = significant_indices.len() - 1;
            match end_index.checked_sub(1).map(|i| &tokens[significant_indices[i]]) {
                None => Some(end_index),
                Some(last) if last.followed_by_space || last.token == Token::Persist => {
                    Some(end_index)
                }
                Some(_) => Some(end_index - 1),
            }
        };

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
            completion_index,
        }
    }

    /// Token at the cursor; the end-of-order token once exhausted
    pub fn current(&self) -> &OrderToken {
        let index = self
            .significant_indices
            .get(self.position)
            .or_else(|| self.significant_indices.last())
            .copied()
            .unwrap_or(0);
        &self.all_tokens[index]
    }

    /// Return the token at the cursor and move past it; never moves past end-of-order
    pub fn advance(&mut self) -> (usize, OrderToken) {
        let index = self.position;
        let token = self.current().clone();
        if !token.is_end() {
            self.position += 1;
        }
        (index, token)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.current().is_end()
    }

    /// Position at which the grammar should offer completions
    pub fn completion_index(&self) -> Option<usize> {
        self.completion_index
    }

    pub fn is_completion_point(&self, index: usize) -> bool {
        self.completion_index == Some(index)
    }

    pub fn ends_in_comment(&self) -> bool {
        self.all_tokens.iter().any(|t| !t.token.is_significant())
    }

    /// Number of significant tokens including end-of-order
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn all_tokens(&self) -> &[OrderToken] {
        &self.all_tokens
    }

    pub fn significant_tokens(&self) -> impl Iterator<Item = &OrderToken> {
        self.significant_indices.iter().map(|&i| &self.all_tokens[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn token(token: Token, start: usize, end: usize, space: bool) -> OrderToken {
        OrderToken::new(
            token,
            Span::new(
                Position::new(start, 1, start as u32 + 1),
                Position::new(end, 1, end as u32 + 1),
            ),
            space,
        )
    }

    #[test]
    fn test_end_of_order_is_appended() {
        let stream = TokenStream::new(vec![token(Token::Word("ARBEITE".into()), 0, 7, false)]);
        assert_eq!(stream.len(), 2);
        assert!(stream.significant_tokens().last().unwrap().is_end());
    }

    #[test]
    fn test_completion_point_on_partial_word() {
        let stream = TokenStream::new(vec![token(Token::Word("GI".into()), 0, 2, false)]);
        assert_eq!(stream.completion_index(), Some(0));
    }

    #[test]
    fn test_completion_point_after_space() {
        let stream = TokenStream::new(vec![token(Token::Word("GIB".into()), 0, 3, true)]);
        assert_eq!(stream.completion_index(), Some(1));
    }

    #[test]
    fn test_completion_point_after_persist_marker() {
        let stream = TokenStream::new(vec![token(Token::Persist, 0, 1, false)]);
        assert_eq!(stream.completion_index(), Some(1));
    }

    #[test]
    fn test_empty_line_completes_at_end() {
        let stream = TokenStream::new(Vec::new());
        assert_eq!(stream.completion_index(), Some(0));
        assert!(stream.is_empty());
    }

    #[test]
    fn test_comment_disables_completion() {
        let stream = TokenStream::new(vec![
            token(Token::Word("GIB".into()), 0, 3, true),
            token(Token::Comment(" note".into()), 4, 10, false),
        ]);
        assert_eq!(stream.completion_index(), None);
        assert!(stream.ends_in_comment());
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut stream = TokenStream::new(vec![token(Token::Word("ENDE".into()), 0, 4, false)]);
        let (i, first) = stream.advance();
        assert_eq!(i, 0);
        assert_eq!(first.token, Token::Word("ENDE".into()));
        let (i, end) = stream.advance();
        assert_eq!(i, 1);
        assert!(end.is_end());
        let (i, again) = stream.advance();
        assert_eq!(i, 1);
        assert!(again.is_end());
        assert!(stream.is_at_end());
    }
}

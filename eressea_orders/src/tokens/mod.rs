//! Token system for Eressea order lines
//!
//! An order line is split into a short, finite list of tokens that always ends
//! with exactly one [`Token::EndOfOrder`]. The tokenizer lives in
//! [`crate::lexical`]; this module holds the token types and the
//! [`TokenStream`] the grammar walks.
//!
//! ## Token Types
//!
//! - **Word**: any run of non-space characters that is not all digits
//!   (`GIB`, `abc`, `Silber`, `TEMP`)
//! - **Number**: a run of ASCII digits (`10`, `0`)
//! - **Quoted**: text between `"` or `'`; may be unterminated while typing
//! - **Comment**: the rest of the line after `;` or a leading `//`
//! - **Persist**: the `@` marker in front of a persistent order
//! - **EndOfOrder**: a zero-width token at the end of the line
//! - **Unknown**: control characters that belong to no other kind
//!
//! ## Completion Point
//!
//! Every token records whether whitespace follows it. The stream uses this to
//! decide where completion happens: if the last real token is followed by a
//! space (or there is none), the user is starting a new argument and the
//! completion point is the end-of-order token; otherwise the user is still
//! typing the last token and that token is the completion point. A line that
//! ends in a comment has no completion point.

pub mod token;
pub mod token_stream;

pub use token::{OrderToken, QuotedText, Token, TokenKind};
pub use token_stream::TokenStream;

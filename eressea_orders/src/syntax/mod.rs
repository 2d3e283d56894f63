//! Order grammar: parsing, completion hooks and syntax checking
//!
//! One parser serves two purposes. Given a listener it stops at the
//! completion point of a line and reports which argument position is being
//! typed ([`CompletionHook`]); without one it validates the line.

pub mod checker;
pub mod error;
pub mod hooks;
pub mod parser;

pub use checker::{check_order, CheckReport, LineError, OrderChecker};
pub use error::{SyntaxError, SyntaxResult};
pub use hooks::{CompletionHook, CompletionListener, EntityKind, HookRecorder, QuoteState, UnitRef};
pub use parser::{check_tokens, OrderParser};

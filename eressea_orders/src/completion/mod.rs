//! Order completion: candidate records, the completer and ranking

pub mod completer;
#[allow(clippy::module_inception)]
pub mod completion;
pub mod ranking;

pub use completer::{CompletionError, OrderCompleter};
pub use completion::Completion;
pub use ranking::{crop, last_line, stub};

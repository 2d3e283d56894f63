// Internal modules
pub mod completion;
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod syntax;
pub mod tokens;
pub mod utils;
pub mod world;

// Re-export key types for library consumers
pub use completion::{Completion, CompletionError, OrderCompleter};
pub use config::{CompleterPreferences, RuntimeConfig};
pub use grammar::{Locale, LocaleTable, OrderTranslations};
pub use syntax::{check_order, CheckReport, OrderChecker, SyntaxError};
pub use world::{EntityId, GameData, GameDataError};

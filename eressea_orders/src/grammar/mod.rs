//! Order language vocabulary: locale-independent keys and their spellings

pub mod keywords;
pub mod translations;

pub use keywords::OrderKey;
pub use translations::{normalize_keyword, Locale, LocaleTable, OrderTranslations};

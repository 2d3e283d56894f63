//! A single completion candidate

use crate::config::constants::{priority, DEFAULT_POSTFIX};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Text shown in the list and matched against the stub
    pub name: String,
    /// Text that replaces the stub
    pub value: String,
    /// Appended after `value`
    pub postfix: String,
    /// Lower sorts first
    pub priority: i32,
    /// Caret position relative to the end of the inserted text
    pub cursor_offset: i32,
}

impl Completion {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            name,
            postfix: DEFAULT_POSTFIX.to_string(),
            priority: priority::DEFAULT,
            cursor_offset: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_cursor_offset(mut self, cursor_offset: i32) -> Self {
        self.cursor_offset = cursor_offset;
        self
    }

    /// Text inserted in place of the stub
    pub fn insertion(&self) -> String {
        format!("{}{}", self.value, self.postfix)
    }

    pub(crate) fn sort_name(&self) -> String {
        self.name.to_lowercase()
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

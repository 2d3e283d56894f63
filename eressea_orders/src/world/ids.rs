//! Base-36 entity ids as written in orders and reports (`abc`, `1x9`)

use crate::config::constants::game::MAX_ID_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("Empty id")]
    Empty,
    #[error("Id '{0}' is longer than {MAX_ID_LENGTH} characters")]
    TooLong(String),
    #[error("Id '{0}' contains characters outside 0-9 and a-z")]
    InvalidCharacter(String),
}

/// Id of a unit, faction, building or ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(u32);

impl EntityId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// The peasants of a region, the target of `GIB 0`
    pub const PEASANTS: EntityId = EntityId(0);

    pub fn is_peasants(self) -> bool {
        self == Self::PEASANTS
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(IdError::Empty);
        }
        if text.chars().count() > MAX_ID_LENGTH {
            return Err(IdError::TooLong(text.to_string()));
        }
        u32::from_str_radix(&text.to_ascii_lowercase(), 36)
            .ok()
            .filter(|_| text.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(EntityId)
            .ok_or_else(|| IdError::InvalidCharacter(text.to_string()))
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0");
        }
        let mut digits = Vec::with_capacity(MAX_ID_LENGTH);
        let mut rest = self.0;
        while rest > 0 {
            // base-36 digits are always ASCII
            let digit = char::from_digit(rest % 36, 36).unwrap_or('0');
            digits.push(digit);
            rest /= 36;
        }
        digits.iter().rev().try_for_each(|c| write!(f, "{}", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_and_display() {
        let id: EntityId = "abc".parse().unwrap();
        assert_eq!(id.value(), 10 * 36 * 36 + 11 * 36 + 12);
        assert_eq!(id.to_string(), "abc");
        assert_eq!("ABC".parse::<EntityId>().unwrap(), id);
        assert_eq!("0".parse::<EntityId>().unwrap(), EntityId::PEASANTS);
        assert_eq!(EntityId::PEASANTS.to_string(), "0");
        assert_eq!("zzzzzz".parse::<EntityId>().unwrap().to_string(), "zzzzzz");
    }

    #[test]
    fn test_invalid_ids() {
        assert_matches!("".parse::<EntityId>(), Err(IdError::Empty));
        assert_matches!("abcdefg".parse::<EntityId>(), Err(IdError::TooLong(_)));
        assert_matches!("a-b".parse::<EntityId>(), Err(IdError::InvalidCharacter(_)));
        assert_matches!("+1".parse::<EntityId>(), Err(IdError::InvalidCharacter(_)));
    }

    #[test]
    fn test_serde_as_string() {
        let id: EntityId = "1x9".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1x9\"");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

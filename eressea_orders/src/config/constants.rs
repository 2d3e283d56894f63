//! Fixed game and ranking constants
//!
//! These are properties of the Eressea rules and of the completion ranking,
//! not deployment limits, so they are not part of the TOML profiles.

/// Completion priorities; lower sorts first
pub mod priority {
    /// Orders and arguments the player almost always wants
    pub const FREQUENT: i32 = 7;
    /// Priority of a completion that sets none explicitly
    pub const DEFAULT: i32 = 9;
    /// Units and factions that are not the player's own
    pub const FOREIGN: i32 = 11;
    /// Rarely used orders and unlikely arguments
    pub const RARE: i32 = 13;
    /// Candidates that will most likely fail (insufficient stock, allied target)
    pub const UNLIKELY: i32 = 15;
}

/// Eressea game rules the completer computes suggestions from
pub mod game {
    /// Base of the magic learning cost formula `base * (1 + (n + n^2) / 2)`
    pub const MAGIC_COST_BASE: u32 = 50;

    /// Peasants needed in a region per recruit suggested
    pub const PEASANTS_PER_RECRUIT: u32 = 40;

    /// Silver one person earns per taxation or entertainment level
    pub const SILVER_PER_LEVEL: u32 = 20;

    /// Minimum skill difference between teacher and student
    pub const TEACHING_LEVEL_GAP: u32 = 2;

    /// Longest base-36 entity id Eressea hands out
    pub const MAX_ID_LENGTH: usize = 6;

    /// Id of the pseudo-unit standing for the region's peasants in GIB
    pub const PEASANTS_ID: &str = "0";
}

/// Postfix appended after most inserted completions
pub const DEFAULT_POSTFIX: &str = " ";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_are_ordered() {
        assert!(priority::FREQUENT < priority::DEFAULT);
        assert!(priority::DEFAULT < priority::FOREIGN);
        assert!(priority::FOREIGN < priority::RARE);
        assert!(priority::RARE < priority::UNLIKELY);
    }
}

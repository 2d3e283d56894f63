//! Order keywords
//!
//! `OrderKey` names every word of the order language independent of locale:
//! the order verbs themselves plus the parameter keywords that appear inside
//! orders (`ALLES`, `TEMP`, directions, option names, ...). The words a
//! player actually types come from [`super::translations`].
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderKey {
    // === ORDER VERBS ===
    Work,
    Attack,
    Banner,
    Claim,
    Steal,
    Siege,
    Name,
    Use,
    Describe,
    Enter,
    Guard,
    Message,
    Default,
    Email,
    End,
    Ride,
    Follow,
    Research,
    Give,
    Group,
    Help,
    Combat,
    CombatSpell,
    Buy,
    Contact,
    Teach,
    Learn,
    Locale,
    Make,
    Move,
    Number,
    Option,
    Password,
    Plant,
    Piracy,
    Prefix,
    Recruit,
    Reserve,
    Route,
    Sabotage,
    Sort,
    Spy,
    Quit,
    Hide,
    Carry,
    Tax,
    Entertain,
    Origin,
    Forget,
    Sell,
    Leave,
    Cast,
    Show,
    Destroy,
    Grow,

    // === PARAMETERS ===
    All,
    Each,
    Persons,
    Unit,
    Castle,
    Building,
    Ship,
    Road,
    Faction,
    Region,
    Temp,
    Not,
    Level,
    Herbs,
    Trees,
    Seeds,
    Horses,
    Pause,
    Before,
    After,
    Peasants,

    // === ORDER FILE STRUCTURE ===
    Eressea,
    Next,

    // === COMBAT STATUS ===
    Aggressive,
    Front,
    Rear,
    Defensive,
    Flee,

    // === HELP CATEGORIES (besides All, Combat, Give, Guard) ===
    Silver,
    Observe,
    FactionStealth,

    // === FACTION OPTIONS ===
    OptReport,
    OptComputer,
    OptTemplate,
    OptStatistics,
    OptAddresses,
    OptZipped,
    OptBzip2,
    OptScore,

    // === DIRECTIONS ===
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
}

impl OrderKey {
    /// Every order verb, in the order they are offered at the start of a line
    pub const ORDERS: &'static [OrderKey] = &[
        OrderKey::Work,
        OrderKey::Attack,
        OrderKey::Banner,
        OrderKey::Claim,
        OrderKey::Steal,
        OrderKey::Siege,
        OrderKey::Name,
        OrderKey::Use,
        OrderKey::Describe,
        OrderKey::Enter,
        OrderKey::Guard,
        OrderKey::Message,
        OrderKey::Default,
        OrderKey::Email,
        OrderKey::End,
        OrderKey::Ride,
        OrderKey::Follow,
        OrderKey::Research,
        OrderKey::Give,
        OrderKey::Group,
        OrderKey::Help,
        OrderKey::Combat,
        OrderKey::CombatSpell,
        OrderKey::Buy,
        OrderKey::Contact,
        OrderKey::Teach,
        OrderKey::Learn,
        OrderKey::Locale,
        OrderKey::Make,
        OrderKey::Move,
        OrderKey::Number,
        OrderKey::Option,
        OrderKey::Password,
        OrderKey::Plant,
        OrderKey::Piracy,
        OrderKey::Prefix,
        OrderKey::Recruit,
        OrderKey::Reserve,
        OrderKey::Route,
        OrderKey::Sabotage,
        OrderKey::Sort,
        OrderKey::Spy,
        OrderKey::Quit,
        OrderKey::Hide,
        OrderKey::Carry,
        OrderKey::Tax,
        OrderKey::Entertain,
        OrderKey::Origin,
        OrderKey::Forget,
        OrderKey::Sell,
        OrderKey::Leave,
        OrderKey::Cast,
        OrderKey::Show,
        OrderKey::Destroy,
        OrderKey::Grow,
    ];

    pub const DIRECTIONS: &'static [OrderKey] = &[
        OrderKey::NorthWest,
        OrderKey::NorthEast,
        OrderKey::East,
        OrderKey::SouthEast,
        OrderKey::SouthWest,
        OrderKey::West,
    ];

    pub const COMBAT_STATUSES: &'static [OrderKey] = &[
        OrderKey::Aggressive,
        OrderKey::Front,
        OrderKey::Rear,
        OrderKey::Defensive,
        OrderKey::Not,
        OrderKey::Flee,
    ];

    /// Categories accepted by HELFE
    pub const HELP_CATEGORIES: &'static [OrderKey] = &[
        OrderKey::All,
        OrderKey::Silver,
        OrderKey::Combat,
        OrderKey::Observe,
        OrderKey::Give,
        OrderKey::Guard,
        OrderKey::FactionStealth,
    ];

    pub const OPTIONS: &'static [OrderKey] = &[
        OrderKey::OptReport,
        OrderKey::OptComputer,
        OrderKey::OptTemplate,
        OrderKey::OptStatistics,
        OrderKey::OptAddresses,
        OrderKey::OptZipped,
        OrderKey::OptBzip2,
        OrderKey::OptScore,
    ];

    /// Entity kinds that BENENNE, BESCHREIBE and NUMMER act on
    pub const ENTITY_KINDS: &'static [OrderKey] = &[
        OrderKey::Unit,
        OrderKey::Faction,
        OrderKey::Building,
        OrderKey::Castle,
        OrderKey::Ship,
        OrderKey::Region,
    ];

    pub fn is_order(self) -> bool {
        Self::ORDERS.contains(&self)
    }

    pub const fn is_direction(self) -> bool {
        matches!(
            self,
            OrderKey::NorthWest
                | OrderKey::NorthEast
                | OrderKey::East
                | OrderKey::SouthEast
                | OrderKey::SouthWest
                | OrderKey::West
        )
    }

    pub fn is_option(self) -> bool {
        Self::OPTIONS.contains(&self)
    }

    pub fn is_help_category(self) -> bool {
        Self::HELP_CATEGORIES.contains(&self)
    }

    pub fn is_combat_status(self) -> bool {
        Self::COMBAT_STATUSES.contains(&self)
    }

    /// Orders that take no arguments at all
    pub const fn takes_no_arguments(self) -> bool {
        matches!(self, OrderKey::Work | OrderKey::End | OrderKey::Leave)
    }
}

impl std::fmt::Display for OrderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_list_has_only_orders() {
        assert_eq!(OrderKey::ORDERS.len(), 55);
        assert!(OrderKey::ORDERS.iter().all(|k| k.is_order()));
        assert!(!OrderKey::Temp.is_order());
        assert!(!OrderKey::NorthWest.is_order());
    }

    #[test]
    fn test_classification() {
        assert!(OrderKey::DIRECTIONS.iter().all(|k| k.is_direction()));
        assert!(OrderKey::Give.is_help_category());
        assert!(OrderKey::Flee.is_combat_status());
        assert!(OrderKey::OptZipped.is_option());
        assert!(OrderKey::Work.takes_no_arguments());
        assert!(!OrderKey::Give.takes_no_arguments());
    }
}

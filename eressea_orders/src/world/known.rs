//! Items and skills the completer reasons about by identity
//!
//! Rulesets name things in their own language. `WellKnown` maps each
//! [`KnownItem`] and [`KnownSkill`] to the name the loaded ruleset uses,
//! resolved once when the game data is built.

use super::rules::Rules;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownItem {
    Silver,
    Horse,
    Wood,
    Stone,
    Iron,
    Laen,
    Mallorn,
}

impl KnownItem {
    pub const ALL: [KnownItem; 7] = [
        KnownItem::Silver,
        KnownItem::Horse,
        KnownItem::Wood,
        KnownItem::Stone,
        KnownItem::Iron,
        KnownItem::Laen,
        KnownItem::Mallorn,
    ];

    /// Spellings in the known rulesets, the default first
    pub const fn names(self) -> &'static [&'static str] {
        match self {
            KnownItem::Silver => &["Silber", "Silver"],
            KnownItem::Horse => &["Pferd", "Horse"],
            KnownItem::Wood => &["Holz", "Wood"],
            KnownItem::Stone => &["Stein", "Stone"],
            KnownItem::Iron => &["Eisen", "Iron"],
            KnownItem::Laen => &["Laen"],
            KnownItem::Mallorn => &["Mallorn"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownSkill {
    Magic,
    Tactics,
    Espionage,
    Taxation,
    Entertainment,
    HorseTraining,
    Herbalism,
    Alchemy,
    Stealth,
    Perception,
    RoadBuilding,
    Forestry,
    Shipbuilding,
    CastleBuilding,
}

impl KnownSkill {
    pub const ALL: [KnownSkill; 14] = [
        KnownSkill::Magic,
        KnownSkill::Tactics,
        KnownSkill::Espionage,
        KnownSkill::Taxation,
        KnownSkill::Entertainment,
        KnownSkill::HorseTraining,
        KnownSkill::Herbalism,
        KnownSkill::Alchemy,
        KnownSkill::Stealth,
        KnownSkill::Perception,
        KnownSkill::RoadBuilding,
        KnownSkill::Forestry,
        KnownSkill::Shipbuilding,
        KnownSkill::CastleBuilding,
    ];

    pub const fn names(self) -> &'static [&'static str] {
        match self {
            KnownSkill::Magic => &["Magie", "Magic"],
            KnownSkill::Tactics => &["Taktik", "Tactics"],
            KnownSkill::Espionage => &["Spionage", "Espionage"],
            KnownSkill::Taxation => &["Steuereintreiben", "Taxation"],
            KnownSkill::Entertainment => &["Unterhaltung", "Entertainment"],
            KnownSkill::HorseTraining => &["Pferdedressur", "Horse Training"],
            KnownSkill::Herbalism => &["Kräuterkunde", "Herbalism"],
            KnownSkill::Alchemy => &["Alchemie", "Alchemy"],
            KnownSkill::Stealth => &["Tarnung", "Stealth"],
            KnownSkill::Perception => &["Wahrnehmung", "Perception"],
            KnownSkill::RoadBuilding => &["Straßenbau", "Roadwork"],
            KnownSkill::Forestry => &["Holzfällen", "Woodcutting"],
            KnownSkill::Shipbuilding => &["Schiffbau", "Shipcraft"],
            KnownSkill::CastleBuilding => &["Burgenbau", "Masonry"],
        }
    }
}

/// Ruleset names of the well-known items and skills
#[derive(Debug, Clone)]
pub struct WellKnown {
    items: HashMap<KnownItem, String>,
    skills: HashMap<KnownSkill, String>,
}

impl WellKnown {
    /// Pick the spelling the ruleset uses; the default spelling when it has none
    pub fn resolve(rules: &Rules) -> Self {
        let items = KnownItem::ALL
            .iter()
            .map(|&item| {
                let name = item
                    .names()
                    .iter()
                    .find_map(|name| rules.item(name).map(|i| i.name.clone()))
                    .unwrap_or_else(|| item.names()[0].to_string());
                (item, name)
            })
            .collect();
        let skills = KnownSkill::ALL
            .iter()
            .map(|&skill| {
                let name = skill
                    .names()
                    .iter()
                    .find_map(|name| rules.skill(name).map(|s| s.name.clone()))
                    .unwrap_or_else(|| skill.names()[0].to_string());
                (skill, name)
            })
            .collect();
        Self { items, skills }
    }

    pub fn item(&self, item: KnownItem) -> &str {
        self.items.get(&item).map(String::as_str).unwrap_or(item.names()[0])
    }

    pub fn skill(&self, skill: KnownSkill) -> &str {
        self.skills.get(&skill).map(String::as_str).unwrap_or(skill.names()[0])
    }

    pub fn is_item(&self, name: &str, item: KnownItem) -> bool {
        super::rules::same_name(self.item(item), name)
    }

    pub fn is_skill(&self, name: &str, skill: KnownSkill) -> bool {
        super::rules::same_name(self.skill(skill), name)
    }
}

impl Default for WellKnown {
    fn default() -> Self {
        Self::resolve(&Rules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::rules::{ItemType, SkillType};

    #[test]
    fn test_resolves_ruleset_spelling() {
        let rules = Rules {
            items: vec![ItemType {
                name: "Silver".to_string(),
                category: Default::default(),
                resources: vec![],
                make_skill: None,
                usable: false,
            }],
            skills: vec![SkillType {
                name: "Magic".to_string(),
                cost: 0,
            }],
            ..Rules::default()
        };
        let known = WellKnown::resolve(&rules);
        assert_eq!(known.item(KnownItem::Silver), "Silver");
        assert_eq!(known.skill(KnownSkill::Magic), "Magic");
        // not in the ruleset: default spelling
        assert_eq!(known.item(KnownItem::Horse), "Pferd");
        assert!(known.is_item("silver", KnownItem::Silver));
    }
}

//! The rules database: skills, item types, buildings, ships, races and spells
//!
//! Lookups by name are case-insensitive. Names are kept as the ruleset
//! spells them (`Silber`, `Pferdedressur`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub skills: Vec<SkillType>,
    #[serde(default)]
    pub items: Vec<ItemType>,
    #[serde(default)]
    pub buildings: Vec<BuildingType>,
    #[serde(default)]
    pub ships: Vec<ShipType>,
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub spells: Vec<Spell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillType {
    pub name: String,
    /// Silver per week of study; 0 means free
    #[serde(default)]
    pub cost: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Silver,
    Luxury,
    Herb,
    Potion,
    Resource,
    Weapon,
    Armour,
    Horse,
    #[default]
    Misc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    pub item: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub name: String,
    #[serde(default)]
    pub category: ItemCategory,
    /// Raw materials for one unit of output
    #[serde(default)]
    pub resources: Vec<ResourceRequirement>,
    #[serde(default)]
    pub make_skill: Option<SkillRequirement>,
    /// Whether BENUTZE applies
    #[serde(default)]
    pub usable: bool,
}

impl ItemType {
    pub fn is_makeable(&self) -> bool {
        self.make_skill.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingType {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceRequirement>,
    #[serde(default)]
    pub make_skill: Option<SkillRequirement>,
    /// Castles are built with `MACHE BURG`
    #[serde(default)]
    pub castle: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipType {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceRequirement>,
    #[serde(default)]
    pub make_skill: Option<SkillRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    /// Silver per recruit
    #[serde(default)]
    pub recruit_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub combat: bool,
    /// Parameter letters: `u` unit, `r` region (x and y), `c` text,
    /// `i` number, `k` keyword, `b` building, `s` ship; `+` repeats the
    /// previous letter
    #[serde(default)]
    pub syntax: String,
}

/// One parameter slot of a spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpellParameter {
    Unit,
    RegionX,
    RegionY,
    Text,
    Integer,
    Keyword,
    Building,
    Ship,
}

impl Spell {
    /// Parameter slots in order; regions take two slots
    fn slots(&self) -> (Vec<SpellParameter>, bool) {
        let mut slots = Vec::new();
        let mut repeats = false;
        for letter in self.syntax.chars() {
            match letter {
                'u' => slots.push(SpellParameter::Unit),
                'r' => {
                    slots.push(SpellParameter::RegionX);
                    slots.push(SpellParameter::RegionY);
                }
                'c' => slots.push(SpellParameter::Text),
                'i' => slots.push(SpellParameter::Integer),
                'k' => slots.push(SpellParameter::Keyword),
                'b' => slots.push(SpellParameter::Building),
                's' => slots.push(SpellParameter::Ship),
                '+' => repeats = true,
                _ => {}
            }
        }
        (slots, repeats)
    }

    /// What the parameter at `index` is, if the spell takes one there
    pub fn parameter_at(&self, index: usize) -> Option<SpellParameter> {
        let (slots, repeats) = self.slots();
        match slots.get(index) {
            Some(&slot) => Some(slot),
            None if repeats => slots.last().copied(),
            None => None,
        }
    }
}

/// Case-insensitive name comparison, umlauts included
pub fn same_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

fn find_by_name<'a, T>(entries: &'a [T], name: &str, name_of: impl Fn(&T) -> &str) -> Option<&'a T> {
    entries.iter().find(|entry| same_name(name_of(entry), name))
}

impl Rules {
    pub fn skill(&self, name: &str) -> Option<&SkillType> {
        find_by_name(&self.skills, name, |s| &s.name)
    }

    pub fn item(&self, name: &str) -> Option<&ItemType> {
        find_by_name(&self.items, name, |i| &i.name)
    }

    pub fn building(&self, name: &str) -> Option<&BuildingType> {
        find_by_name(&self.buildings, name, |b| &b.name)
    }

    pub fn ship(&self, name: &str) -> Option<&ShipType> {
        find_by_name(&self.ships, name, |s| &s.name)
    }

    pub fn race(&self, name: &str) -> Option<&Race> {
        find_by_name(&self.races, name, |r| &r.name)
    }

    pub fn spell(&self, name: &str) -> Option<&Spell> {
        find_by_name(&self.spells, name, |s| &s.name)
    }

    pub fn makeable_items(&self) -> impl Iterator<Item = &ItemType> {
        self.items.iter().filter(|item| item.is_makeable())
    }

    pub fn items_in(&self, category: ItemCategory) -> impl Iterator<Item = &ItemType> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Names referenced by resource requirements that are not item types
    pub fn unknown_resources(&self) -> Vec<String> {
        let requirements = self
            .items
            .iter()
            .flat_map(|i| i.resources.iter())
            .chain(self.buildings.iter().flat_map(|b| b.resources.iter()))
            .chain(self.ships.iter().flat_map(|s| s.resources.iter()));
        let mut unknown: Vec<String> = requirements
            .filter(|r| self.item(&r.item).is_none())
            .map(|r| r.item.clone())
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}

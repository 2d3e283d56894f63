//! Read-only game world the completer queries

pub mod geometry;
pub mod ids;
pub mod known;
pub mod model;
pub mod rules;

pub use geometry::{Coordinate, Direction};
pub use ids::{EntityId, IdError};
pub use known::{KnownItem, KnownSkill, WellKnown};
pub use model::{
    Building, Faction, GameData, GameDataError, GameSnapshot, Passage, Region, Route, Ship, Unit,
};
pub use rules::{
    ItemCategory, ItemType, Race, ResourceRequirement, Rules, SkillRequirement, SkillType, Spell,
    SpellParameter,
};

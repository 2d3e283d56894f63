//! Units, factions, buildings and ships
//!
//! Every entity is offered twice, as `Name (id)` and as `id (Name)`, so
//! either can be typed. Both insert the id.

use super::Request;
use crate::completion::completion::Completion;
use crate::config::constants::{game, priority};
use crate::grammar::OrderKey;
use crate::syntax::UnitRef;
use crate::world::rules::same_name;
use crate::world::{Building, EntityId, Unit};

impl<'r> Request<'r> {
    pub(super) fn add_reference(&mut self, name: &str, id: &str, rank: i32) {
        self.add(
            Completion::new(format!("{} ({})", name, id))
                .with_value(id)
                .with_priority(rank),
        );
        self.add(
            Completion::new(format!("{} ({})", id, name))
                .with_value(id)
                .with_priority(rank + 1),
        );
    }

    fn add_unit(&mut self, unit: &Unit, rank: i32) {
        self.add_reference(&unit.name, &unit.id.to_string(), rank);
    }

    pub(super) fn is_own(&self, unit: &Unit) -> bool {
        unit.belongs_to(self.unit.faction)
    }

    fn is_allied(&self, unit: &Unit) -> bool {
        match (self.faction, unit.faction) {
            (Some(faction), Some(other)) => faction.is_allied_with(other),
            _ => false,
        }
    }

    /// Units in the region other than the current one
    pub(super) fn others(&self) -> Vec<&'r Unit> {
        let me = self.unit.id;
        self.region
            .map(|region| region.units.iter().filter(|u| u.id != me).collect())
            .unwrap_or_default()
    }

    /// Own units first, then everybody else
    pub(super) fn cmplt_units_here(&mut self) {
        for unit in self.others() {
            let rank = if self.is_own(unit) {
                priority::DEFAULT
            } else {
                priority::FOREIGN
            };
            self.add_unit(unit, rank);
        }
    }

    pub(super) fn cmplt_own_units(&mut self) {
        for unit in self.others() {
            if self.is_own(unit) {
                self.add_unit(unit, priority::DEFAULT);
            }
        }
    }

    pub(super) fn cmplt_foreign_units(&mut self) {
        for unit in self.others() {
            if !self.is_own(unit) {
                self.add_unit(unit, priority::DEFAULT);
            }
        }
    }

    /// Enemies first; allies can be attacked but rarely are
    pub(super) fn cmplt_attack(&mut self) {
        for unit in self.others() {
            if self.is_own(unit) {
                continue;
            }
            let rank = if self.is_allied(unit) {
                priority::RARE
            } else {
                priority::DEFAULT
            };
            self.add_unit(unit, rank);
        }
    }

    pub(super) fn cmplt_give(&mut self) {
        self.cmplt_units_here();
        let peasants = self.word(OrderKey::Peasants);
        self.add_reference(peasants, game::PEASANTS_ID, priority::RARE);
    }

    /// Students already listed are left out; those the teacher cannot teach
    /// anything are ranked last
    pub(super) fn cmplt_teach(&mut self, students: &[UnitRef]) {
        for unit in self.others() {
            if students.contains(&UnitRef::Id(unit.id)) {
                continue;
            }
            let rank = if !self.can_teach(unit) {
                priority::UNLIKELY
            } else if self.is_own(unit) {
                priority::DEFAULT
            } else {
                priority::FOREIGN
            };
            self.add_unit(unit, rank);
        }
    }

    fn can_teach(&self, student: &Unit) -> bool {
        self.unit.skills.keys().any(|skill| {
            self.unit.skill_level(skill) >= student.skill_level(skill) + game::TEACHING_LEVEL_GAP
        })
    }

    /// The lowest id no unit uses yet
    pub(super) fn cmplt_make_temp(&mut self) {
        let free = (1..=u32::MAX)
            .map(EntityId::new)
            .find(|&id| self.data.unit(id).is_none());
        if let Some(id) = free {
            self.add(Completion::new(id.to_string()).with_postfix(""));
        }
    }

    pub(super) fn cmplt_factions(&mut self, listed: &[EntityId]) {
        let own = self.unit.faction;
        for faction in self.data.factions() {
            if Some(faction.id) == own || listed.contains(&faction.id) {
                continue;
            }
            self.add_reference(&faction.name, &faction.id.to_string(), priority::DEFAULT);
        }
    }

    /// HELFE: factions already allied are the likelier target
    pub(super) fn cmplt_help(&mut self) {
        let own = self.unit.faction;
        let ally = self.faction;
        for faction in self.data.factions() {
            if Some(faction.id) == own {
                continue;
            }
            let rank = if ally.is_some_and(|f| f.is_allied_with(faction.id)) {
                priority::FREQUENT
            } else {
                priority::DEFAULT
            };
            self.add_reference(&faction.name, &faction.id.to_string(), rank);
        }
    }

    pub(super) fn cmplt_buildings(&mut self, accept: impl Fn(&Self, &Building) -> bool) {
        let Some(region) = self.region else {
            return;
        };
        for building in &region.buildings {
            if accept(&*self, building) {
                self.add_reference(&building.name, &building.id.to_string(), priority::DEFAULT);
            }
        }
    }

    pub(super) fn is_castle(&self, building: &Building) -> bool {
        self.data
            .rules()
            .building(&building.building_type)
            .is_some_and(|kind| kind.castle)
    }

    /// BELAGERE: buildings held by somebody else
    pub(super) fn cmplt_siege(&mut self) {
        self.cmplt_buildings(|request, building| {
            let owner = building.owner.and_then(|id| request.data.unit(id));
            !owner.is_some_and(|unit| request.is_own(unit))
        });
    }

    /// `MACHE <type> ` continues a building of that type
    pub(super) fn cmplt_make_building_type(&mut self, name: &str) {
        self.cmplt_buildings(|_, building| same_name(&building.building_type, name));
    }

    pub(super) fn cmplt_ships(&mut self) {
        let Some(region) = self.region else {
            return;
        };
        for ship in &region.ships {
            self.add_reference(&ship.name, &ship.id.to_string(), priority::DEFAULT);
        }
    }

    /// `MACHE SCHIFF `: own ships under construction come first
    pub(super) fn cmplt_make_ship(&mut self) {
        let Some(region) = self.region else {
            return;
        };
        for ship in &region.ships {
            let own = ship
                .owner
                .and_then(|id| region.unit(id))
                .is_some_and(|unit| self.is_own(unit));
            let rank = if own { priority::DEFAULT } else { priority::RARE };
            self.add_reference(&ship.name, &ship.id.to_string(), rank);
        }
    }
}

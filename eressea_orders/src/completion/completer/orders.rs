//! Order verbs and fixed keyword choices

use super::Request;
use crate::completion::completion::Completion;
use crate::config::constants::priority;
use crate::grammar::{Locale, OrderKey};
use crate::world::rules::same_name;
use crate::world::{KnownSkill, WellKnown};

/// Minimum effective skill a unit needs before a verb is offered
enum Gate {
    Skill(KnownSkill, u32),
    /// Any skill at level 1 or more
    AnySkill,
}

const fn gate(verb: OrderKey) -> Option<Gate> {
    match verb {
        OrderKey::Teach => Some(Gate::AnySkill),
        OrderKey::Spy | OrderKey::Sabotage => Some(Gate::Skill(KnownSkill::Espionage, 1)),
        OrderKey::Tax => Some(Gate::Skill(KnownSkill::Taxation, 1)),
        OrderKey::Entertain => Some(Gate::Skill(KnownSkill::Entertainment, 1)),
        OrderKey::Cast | OrderKey::CombatSpell => Some(Gate::Skill(KnownSkill::Magic, 1)),
        OrderKey::Hide => Some(Gate::Skill(KnownSkill::Stealth, 1)),
        OrderKey::Research => Some(Gate::Skill(KnownSkill::Herbalism, 7)),
        OrderKey::Plant => Some(Gate::Skill(KnownSkill::Herbalism, 6)),
        OrderKey::Grow => Some(Gate::Skill(KnownSkill::HorseTraining, 1)),
        _ => None,
    }
}

const fn verb_priority(verb: OrderKey) -> i32 {
    match verb {
        OrderKey::Work
        | OrderKey::Give
        | OrderKey::Learn
        | OrderKey::Teach
        | OrderKey::Make
        | OrderKey::Move
        | OrderKey::Recruit
        | OrderKey::Reserve
        | OrderKey::Buy
        | OrderKey::Sell
        | OrderKey::Tax
        | OrderKey::Entertain => priority::FREQUENT,
        OrderKey::Quit
        | OrderKey::Password
        | OrderKey::Email
        | OrderKey::Locale
        | OrderKey::Prefix
        | OrderKey::Number
        | OrderKey::Option
        | OrderKey::Banner
        | OrderKey::Default
        | OrderKey::Origin
        | OrderKey::Forget => priority::RARE,
        _ => priority::DEFAULT,
    }
}

impl Request<'_> {
    fn passes_gate(&self, well_known: &WellKnown, verb: OrderKey) -> bool {
        match gate(verb) {
            None => true,
            Some(Gate::AnySkill) => self
                .unit
                .skills
                .keys()
                .any(|skill| self.unit.effective_skill(skill) > 0),
            Some(Gate::Skill(skill, level)) => {
                self.unit.effective_skill(well_known.skill(skill)) >= level
            }
        }
    }

    pub(super) fn cmplt_orders(&mut self) {
        let well_known = self.data.well_known();
        for &verb in OrderKey::ORDERS {
            if !self.passes_gate(well_known, verb) {
                continue;
            }
            let mut completion = Completion::new(self.word(verb)).with_priority(verb_priority(verb));
            if verb.takes_no_arguments() {
                completion = completion.with_postfix("");
            }
            self.add(completion);
        }
    }

    /// Object keywords of BENENNE, BESCHREIBE, BOTSCHAFT and NUMMER
    pub(super) fn cmplt_entity_kinds(&mut self, with_region: bool) {
        for &kind in OrderKey::ENTITY_KINDS {
            if kind == OrderKey::Region && !with_region {
                continue;
            }
            self.add_keyword(kind, priority::DEFAULT);
        }
    }

    pub(super) fn cmplt_enter(&mut self) {
        let has_ships = self.region.is_some_and(|region| !region.ships.is_empty());
        let has_buildings = self.region.is_some_and(|region| !region.buildings.is_empty());
        let rank = |present: bool| if present { priority::DEFAULT } else { priority::RARE };
        self.add_keyword(OrderKey::Castle, rank(has_buildings));
        self.add_keyword(OrderKey::Building, rank(has_buildings));
        self.add_keyword(OrderKey::Ship, rank(has_ships));
    }

    pub(super) fn cmplt_guard(&mut self) {
        let rank = if self.unit.guarding {
            priority::DEFAULT
        } else {
            priority::RARE
        };
        self.add_keyword(OrderKey::Not, rank);
    }

    /// KÄMPFE. Standing down is less likely for a guard or an attacker.
    pub(super) fn cmplt_combat(&mut self) {
        let mut passive = priority::DEFAULT;
        if self.unit.guarding {
            passive += 1;
        }
        if self.has_order(OrderKey::Attack) {
            passive += 1;
        }
        for &status in OrderKey::COMBAT_STATUSES {
            let rank = match status {
                OrderKey::Not | OrderKey::Flee => passive,
                _ => priority::DEFAULT,
            };
            self.add_keyword(status, rank);
        }
        self.add_keyword(OrderKey::Help, priority::DEFAULT);
    }

    pub(super) fn cmplt_locale(&mut self) {
        let current = self.translations.locale();
        for locale in Locale::ALL {
            let rank = if locale == current {
                priority::RARE
            } else {
                priority::DEFAULT
            };
            self.add(Completion::new(locale.code()).with_priority(rank));
        }
    }

    /// `OPTION <name>`: switching off only makes sense for an option that is on
    pub(super) fn cmplt_option_name(&mut self, option: OrderKey) {
        let word = self.word(option);
        let enabled = self.faction.is_some_and(|faction| {
            faction
                .options
                .iter()
                .any(|name| same_name(name, word))
        });
        let rank = if enabled {
            priority::DEFAULT
        } else {
            priority::RARE
        };
        self.add_keyword(OrderKey::Not, rank);
    }

    /// TARNE: stealth levels up to the unit's own, PARTEI and races
    pub(super) fn cmplt_hide(&mut self) {
        let stealth = self
            .unit
            .effective_skill(self.data.well_known().skill(KnownSkill::Stealth));
        for level in 0..=stealth {
            self.add_number(level, priority::DEFAULT);
        }
        self.add_keyword(OrderKey::Faction, priority::DEFAULT);
        let races = &self.data.rules().races;
        for race in races {
            self.add(Completion::new(race.name.as_str()).with_priority(priority::RARE));
        }
    }

    pub(super) fn cmplt_destroy(&mut self) {
        let rank = if self.region.is_some_and(|region| !region.roads.is_empty()) {
            priority::DEFAULT
        } else {
            priority::RARE
        };
        self.add_keyword(OrderKey::Road, rank);
    }
}

#[cfg(test)]
mod tests {
    use crate::completion::completer::OrderCompleter;
    use crate::completion::Completion;
    use crate::config::constants::priority;
    use crate::config::CompleterPreferences;
    use crate::grammar::LocaleTable;
    use crate::world::GameData;

    fn world(skills: serde_json::Value, orders: Vec<&str>, guarding: bool) -> GameData {
        let json = serde_json::json!({
            "owner": "f1",
            "factions": [{"id": "f1", "name": "Eigene", "options": ["COMPUTER"]}],
            "regions": [{
                "coordinate": {"x": 0, "y": 0},
                "units": [{"id": "a", "name": "Hinz", "faction": "f1",
                           "skills": skills, "orders": orders, "guarding": guarding}]
            }]
        });
        GameData::from_json_str(&json.to_string()).unwrap()
    }

    fn complete(data: &GameData, line: &str) -> Vec<Completion> {
        let table = LocaleTable::german();
        let completer = OrderCompleter::new(data, &table, CompleterPreferences::default());
        let unit = data.unit("a".parse().unwrap()).unwrap();
        completer.complete(unit, line)
    }

    fn names(completions: &[Completion]) -> Vec<&str> {
        completions.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_skill_gated_verbs() {
        let novice = world(serde_json::json!({}), vec![], false);
        let verbs = complete(&novice, "");
        assert!(names(&verbs).contains(&"GIB"));
        assert!(!names(&verbs).contains(&"ZAUBERE"));
        assert!(!names(&verbs).contains(&"LEHRE"));
        assert!(!names(&verbs).contains(&"FORSCHE"));

        let mage = world(serde_json::json!({"Magie": 1, "Kräuterkunde": 6}), vec![], false);
        let verbs = complete(&mage, "");
        assert!(names(&verbs).contains(&"ZAUBERE"));
        assert!(names(&verbs).contains(&"KAMPFZAUBER"));
        assert!(names(&verbs).contains(&"LEHRE"));
        assert!(names(&verbs).contains(&"PFLANZE"));
        assert!(!names(&verbs).contains(&"FORSCHE"));
    }

    #[test]
    fn test_verbs_without_arguments_have_no_postfix() {
        let data = world(serde_json::json!({}), vec![], false);
        let verbs = complete(&data, "ARB");
        assert_eq!(names(&verbs), vec!["ARBEITE"]);
        assert_eq!(verbs[0].insertion(), "ARBEITE");
        assert_eq!(complete(&data, "GI")[0].insertion(), "GIB ");
    }

    #[test]
    fn test_persistent_marker_is_skipped() {
        let data = world(serde_json::json!({}), vec![], false);
        assert_eq!(names(&complete(&data, "@GI")), vec!["GIB"]);
    }

    #[test]
    fn test_combat_penalty_for_guard_with_attack() {
        let calm = world(serde_json::json!({}), vec![], false);
        let flee = complete(&calm, "KÄMPFE FL");
        assert_eq!(flee[0].priority, priority::DEFAULT);

        let fierce = world(serde_json::json!({}), vec!["ATTACKIERE b"], true);
        let flee = complete(&fierce, "KÄMPFE FL");
        assert_eq!(names(&flee), vec!["FLIEHE"]);
        assert_eq!(flee[0].priority, priority::DEFAULT + 2);
        let front = complete(&fierce, "KÄMPFE VO");
        assert_eq!(front[0].priority, priority::DEFAULT);
    }

    #[test]
    fn test_option_not_ranks_by_state() {
        let data = world(serde_json::json!({}), vec![], false);
        assert_eq!(complete(&data, "OPTION COMPUTER ")[0].priority, priority::DEFAULT);
        assert_eq!(complete(&data, "OPTION ZUGVORLAGE ")[0].priority, priority::RARE);
    }
}

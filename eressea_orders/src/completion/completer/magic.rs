//! Spells and their parameters

use super::Request;
use crate::config::compile_time::completion::MAX_SPELL_LEVEL;
use crate::config::constants::priority;
use crate::grammar::OrderKey;
use crate::syntax::QuoteState;
use crate::world::{KnownSkill, SpellParameter};

impl Request<'_> {
    fn magic_level(&self) -> u32 {
        self.unit
            .effective_skill(self.data.well_known().skill(KnownSkill::Magic))
    }

    /// Known spells of one kind; those above the caster's level rank last
    fn add_spells(&mut self, combat: bool, quote: &QuoteState) {
        let level = self.magic_level();
        for spell in &self.data.rules().spells {
            if spell.combat != combat || !self.unit.knows_spell(&spell.name) {
                continue;
            }
            let rank = if spell.level <= level {
                priority::DEFAULT
            } else {
                priority::UNLIKELY
            };
            self.add_named(&spell.name, quote, rank);
        }
    }

    pub(super) fn cmplt_combat_spell(&mut self, quote: &QuoteState, level_given: bool) {
        if !level_given && !quote.is_open() {
            self.add_keyword(OrderKey::Level, priority::RARE);
        }
        self.add_spells(true, quote);
    }

    pub(super) fn cmplt_cast(&mut self, quote: &QuoteState, region_given: bool, level_given: bool) {
        if !quote.is_open() {
            if !region_given {
                self.add_keyword(OrderKey::Region, priority::RARE);
            }
            if !level_given {
                self.add_keyword(OrderKey::Level, priority::RARE);
            }
        }
        self.add_spells(false, quote);
    }

    /// STUFE: every level the caster can reach
    pub(super) fn cmplt_spell_levels(&mut self) {
        for level in 1..=self.magic_level().min(MAX_SPELL_LEVEL) {
            self.add_number(level, priority::DEFAULT);
        }
    }

    pub(super) fn cmplt_spell_parameter(&mut self, spell: &str, arg_index: usize) {
        let Some(parameter) = self
            .data
            .rules()
            .spell(spell)
            .and_then(|spell| spell.parameter_at(arg_index))
        else {
            return;
        };
        match parameter {
            SpellParameter::Unit => self.cmplt_units_here(),
            SpellParameter::RegionX => self.cmplt_coordinates(),
            SpellParameter::Text => self.cmplt_opening_quote(),
            SpellParameter::Building => self.cmplt_buildings(|_, _| true),
            SpellParameter::Ship => self.cmplt_ships(),
            SpellParameter::RegionY | SpellParameter::Integer | SpellParameter::Keyword => {}
        }
    }

    /// ZEIGE: a spell the unit knows or an item it carries
    pub(super) fn cmplt_show(&mut self, quote: &QuoteState) {
        if !quote.is_open() {
            self.add_keyword(OrderKey::All, priority::RARE);
        }
        for spell in &self.unit.spells {
            self.add_named(spell, quote, priority::DEFAULT);
        }
        for (item, &amount) in &self.unit.items {
            if amount > 0 {
                self.add_named(item, quote, priority::DEFAULT);
            }
        }
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

    fn world() -> GameData {
        let json = serde_json::json!({
            "owner": "f1",
            "rules": {
                "skills": [{"name": "Magie"}],
                "spells": [
                    {"name": "Feuerball", "level": 2, "combat": true},
                    {"name": "Schild", "level": 5, "combat": true},
                    {"name": "Hain der tausendjährigen Eichen", "level": 3, "syntax": ""},
                    {"name": "Fernsicht", "level": 1, "syntax": "r"},
                    {"name": "Traumbild", "level": 1, "syntax": "uc"},
                    {"name": "Verbotenes", "level": 1}
                ]
            },
            "factions": [{"id": "f1", "name": "Eigene"}],
            "regions": [
                {
                    "coordinate": {"x": 0, "y": 0},
                    "name": "Mitte",
                    "units": [
                        {"id": "a", "name": "Hinz", "faction": "f1", "skills": {"Magie": 3},
                         "spells": ["Feuerball", "Schild", "Hain der tausendjährigen Eichen",
                                    "Fernsicht", "Traumbild"]},
                        {"id": "b", "name": "Kunz", "faction": "f1"}
                    ]
                },
                {"coordinate": {"x": 1, "y": 0}, "name": "Osten"}
            ]
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
    fn test_combat_spells_rank_by_level() {
        let data = world();
        let completions = complete(&data, "KAMPFZAUBER ");
        assert_eq!(names(&completions), vec!["Feuerball", "STUFE", "Schild"]);
        assert_eq!(completions[2].priority, priority::UNLIKELY);
    }

    #[test]
    fn test_cast_offers_known_spells() {
        let data = world();
        let completions = complete(&data, "ZAUBERE ");
        let names = names(&completions);
        assert!(names.contains(&"Fernsicht"));
        assert!(names.contains(&"REGION"));
        assert!(!names.contains(&"Verbotenes"));
        assert!(!names.contains(&"Feuerball"));

        let spaced = completions
            .iter()
            .find(|c| c.name == "Hain der tausendjährigen Eichen")
            .unwrap();
        assert_eq!(spaced.value, "\"Hain der tausendjährigen Eichen\"");
    }

    #[test]
    fn test_open_quote_completes_remainder() {
        let data = world();
        let completions = complete(&data, "ZAUBERE \"Hain der tau");
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].name, "tausendjährigen Eichen");
        assert_eq!(completions[0].insertion(), "tausendjährigen Eichen\"");
    }

    #[test]
    fn test_levels_and_parameters() {
        let data = world();
        assert_eq!(names(&complete(&data, "ZAUBERE STUFE ")), vec!["1", "2", "3"]);

        let region = complete(&data, "ZAUBERE Fernsicht ");
        let east = region.iter().find(|c| c.name == "1 0 (Osten)").unwrap();
        assert_eq!(east.value, "1 0");

        let target = complete(&data, "ZAUBERE Traumbild ");
        assert_eq!(names(&target), vec!["Kunz (b)", "b (Kunz)"]);
        let text = complete(&data, "ZAUBERE Traumbild b ");
        assert_eq!(text[0].insertion(), "\"\"");
    }
}

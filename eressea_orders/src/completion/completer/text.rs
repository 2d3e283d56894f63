//! Quoted free text

use super::Request;
use crate::completion::completion::Completion;
use crate::config::constants::priority;
use crate::syntax::{EntityKind, QuoteState};

/// Names with whitespace only survive tokenizing inside quotes
pub(super) fn quoted_if_needed(name: &str) -> String {
    if name.chars().any(char::is_whitespace) {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

impl Request<'_> {
    /// Empty quotes with the caret between them
    pub(super) fn cmplt_opening_quote(&mut self) {
        self.add(
            Completion::new("\"\"")
                .with_postfix("")
                .with_cursor_offset(-1),
        );
    }

    /// Close the open quote after the word being typed
    pub(super) fn cmplt_closing_quote(&mut self, delimiter: char, content: &str) {
        let last_word = content.rsplit(char::is_whitespace).next().unwrap_or("");
        let closed = format!("{}{}", last_word, delimiter);
        self.add(Completion::new(closed).with_postfix(""));
    }

    /// Offer a name as a text argument. Inside an open quote the words
    /// already typed must match; only the rest of the name and the
    /// closing quote are inserted.
    pub(super) fn add_named(&mut self, name: &str, quote: &QuoteState, rank: i32) {
        match quote {
            QuoteState::None => self.add(
                Completion::new(name)
                    .with_value(quoted_if_needed(name))
                    .with_priority(rank),
            ),
            QuoteState::Open { delimiter, content } => {
                let typed = content
                    .char_indices()
                    .rev()
                    .find(|(_, c)| c.is_whitespace())
                    .map(|(at, c)| &content[..at + c.len_utf8()])
                    .unwrap_or("");
                let Some(head) = name.get(..typed.len()) else {
                    return;
                };
                if head.to_lowercase() != typed.to_lowercase() {
                    return;
                }
                let rest = &name[typed.len()..];
                self.add(
                    Completion::new(rest)
                        .with_value(format!("{}{}", rest, delimiter))
                        .with_postfix("")
                        .with_priority(rank),
                );
            }
        }
    }

    /// BENENNE: the current name of the target, to be edited
    pub(super) fn cmplt_name_target(&mut self, kind: EntityKind, quote: &QuoteState) {
        let current = match kind {
            EntityKind::Unit => Some(self.unit.name.as_str()),
            EntityKind::Faction => self.faction.map(|faction| faction.name.as_str()),
            EntityKind::Building => self
                .unit
                .building
                .and_then(|id| self.region.and_then(|region| region.building(id)))
                .map(|building| building.name.as_str()),
            EntityKind::Ship => self
                .unit
                .ship
                .and_then(|id| self.region.and_then(|region| region.ship(id)))
                .map(|ship| ship.name.as_str()),
            EntityKind::Region => self.region.and_then(|region| region.name.as_deref()),
        };
        if !quote.is_open() {
            self.cmplt_opening_quote();
        }
        if let Some(current) = current {
            self.add_named(current, quote, priority::RARE);
        }
    }

    /// GRUPPE: the faction's existing groups
    pub(super) fn cmplt_group(&mut self, quote: &QuoteState) {
        let Some(faction) = self.faction else {
            return;
        };
        for group in &faction.groups {
            let rank = if self.unit.group.as_deref() == Some(group.as_str()) {
                priority::RARE
            } else {
                priority::DEFAULT
            };
            self.add_named(group, quote, rank);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::quoted_if_needed;
    use crate::completion::completer::OrderCompleter;
    use crate::completion::Completion;
    use crate::config::CompleterPreferences;
    use crate::grammar::LocaleTable;
    use crate::world::GameData;

    fn world() -> GameData {
        let json = serde_json::json!({
            "owner": "f1",
            "factions": [{"id": "f1", "name": "Eigene", "groups": ["Wache", "Die Späher"]}],
            "regions": [{
                "coordinate": {"x": 0, "y": 0},
                "units": [{"id": "a", "name": "Hinz der Große", "faction": "f1", "group": "Wache"}]
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

    #[test]
    fn test_quoting() {
        assert_eq!(quoted_if_needed("Wache"), "Wache");
        assert_eq!(quoted_if_needed("Die Späher"), "\"Die Späher\"");
    }

    #[test]
    fn test_quote_hooks() {
        let data = world();
        let opening = complete(&data, "BANNER ");
        assert_eq!(opening.len(), 1);
        assert_eq!(opening[0].insertion(), "\"\"");
        assert_eq!(opening[0].cursor_offset, -1);

        let closing = complete(&data, "BANNER \"Hallo Wel");
        assert_eq!(closing.len(), 1);
        assert_eq!(closing[0].name, "Wel\"");
        assert_eq!(closing[0].insertion(), "Wel\"");
    }

    #[test]
    fn test_groups() {
        let data = world();
        let groups = complete(&data, "GRUPPE ");
        assert_eq!(groups[0].name, "Die Späher");
        assert_eq!(groups[0].value, "\"Die Späher\"");
        assert_eq!(groups[1].name, "Wache");

        let inside = complete(&data, "GRUPPE \"Die Sp");
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].insertion(), "Späher\"");
    }

    #[test]
    fn test_name_offers_current_name() {
        let data = world();
        let completions = complete(&data, "BENENNE EINHEIT ");
        let names: Vec<&str> = completions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["\"\"", "Hinz der Große"]);
    }
}

//! Completion generator
//!
//! [`OrderCompleter`] runs the order parser over the line being typed with a
//! fresh [`Request`] as its listener. The request receives the hook of the
//! completion point and turns it into candidates using the unit, its region,
//! its faction and the rules. The candidates are then cropped to the stub.
//!
//! Hook implementations are grouped by what they draw on:
//! - `orders`: order verbs and fixed keyword choices
//! - `references`: units, factions, buildings and ships
//! - `items`: inventories, trade, production and skills
//! - `magic`: spells
//! - `movement`: directions, paths and coordinates
//! - `text`: quoted free text

mod items;
mod magic;
mod movement;
mod orders;
mod references;
mod text;

use crate::completion::completion::Completion;
use crate::completion::ranking::{crop, last_line, stub};
use crate::config::compile_time::completion::MAX_COMPLETIONS;
use crate::config::constants::priority;
use crate::config::{CompleterPreferences, LexicalPreferences};
use crate::grammar::{OrderKey, OrderTranslations};
use crate::lexical::tokenize_with_preferences;
use crate::logging::{codes, with_order_context, Code};
use crate::syntax::{CompletionHook, CompletionListener, OrderParser};
use crate::world::{EntityId, Faction, GameData, KnownSkill, Region, Unit};
use crate::{log_debug, log_warning};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompletionError {
    #[error("Unit {0} is not in the game data")]
    UnitNotFound(EntityId),
}

impl CompletionError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnitNotFound(_) => codes::completion::UNIT_NOT_FOUND,
        }
    }
}

/// Completes order lines against one game state
pub struct OrderCompleter<'a> {
    data: &'a GameData,
    translations: &'a dyn OrderTranslations,
    preferences: CompleterPreferences,
    lexical: LexicalPreferences,
}

impl<'a> OrderCompleter<'a> {
    pub fn new(
        data: &'a GameData,
        translations: &'a dyn OrderTranslations,
        preferences: CompleterPreferences,
    ) -> Self {
        Self {
            data,
            translations,
            preferences,
            lexical: LexicalPreferences::default(),
        }
    }

    pub fn with_lexical_preferences(mut self, lexical: LexicalPreferences) -> Self {
        self.lexical = lexical;
        self
    }

    pub fn preferences(&self) -> &CompleterPreferences {
        &self.preferences
    }

    /// Ranked completions for the last line of `text`, typed for `unit`
    pub fn complete(&self, unit: &Unit, text: &str) -> Vec<Completion> {
        with_order_context(&unit.id.to_string(), None, || {
            let line = last_line(text);
            let candidates = self.candidates(unit, line);
            let produced = candidates.len();
            let mut completions = crop(candidates, stub(line));

            if completions.len() > MAX_COMPLETIONS {
                log_warning!(code = codes::completion::CANDIDATE_LIMIT_REACHED, "Completion list truncated",
                    "candidates" => completions.len(),
                    "limit" => MAX_COMPLETIONS
                );
                completions.truncate(MAX_COMPLETIONS);
            }

            log_debug!("Completion finished",
                "produced" => produced,
                "returned" => completions.len()
            );
            completions
        })
    }

    /// Like [`complete`](Self::complete), looking the unit up by id
    pub fn complete_for(&self, unit: EntityId, text: &str) -> Result<Vec<Completion>, CompletionError> {
        let unit = self.data.unit(unit).ok_or(CompletionError::UnitNotFound(unit))?;
        Ok(self.complete(unit, text))
    }

    /// Unfiltered candidates of the hook at the completion point of `line`
    pub fn candidates(&self, unit: &Unit, line: &str) -> Vec<Completion> {
        let tokens = tokenize_with_preferences(line, self.lexical.clone());
        let mut request = Request::new(self, unit);
        let _ = OrderParser::new(tokens, self.translations)
            .with_listener(&mut request)
            .parse();
        request.completions
    }
}

/// Accumulator of one completion request
pub(crate) struct Request<'r> {
    data: &'r GameData,
    translations: &'r dyn OrderTranslations,
    preferences: &'r CompleterPreferences,
    unit: &'r Unit,
    region: Option<&'r Region>,
    faction: Option<&'r Faction>,
    completions: Vec<Completion>,
}

impl<'r> Request<'r> {
    fn new(completer: &'r OrderCompleter<'_>, unit: &'r Unit) -> Self {
        let data = completer.data;
        let region = data.region_of(unit.id);
        if region.is_none() {
            log_warning!(code = codes::completion::MISSING_CONTEXT, "Unit has no region",
                "unit" => unit.id
            );
        }
        Self {
            data,
            translations: completer.translations,
            preferences: &completer.preferences,
            unit,
            region,
            faction: unit.faction.and_then(|id| data.faction(id)),
            completions: Vec::new(),
        }
    }

    fn word(&self, key: OrderKey) -> &'r str {
        self.translations.translate(key)
    }

    fn add(&mut self, completion: Completion) {
        self.completions.push(completion);
    }

    fn add_keyword(&mut self, key: OrderKey, priority: i32) {
        let word = self.word(key);
        self.add(Completion::new(word).with_priority(priority));
    }

    fn add_keywords(&mut self, keys: &[OrderKey], priority: i32) {
        for &key in keys {
            self.add_keyword(key, priority);
        }
    }

    fn add_number(&mut self, number: u32, priority: i32) {
        self.add(Completion::new(number.to_string()).with_priority(priority));
    }

    /// Whether the unit already has an order with verb `key` this turn
    fn has_order(&self, key: OrderKey) -> bool {
        self.unit.orders.iter().any(|order| {
            order
                .trim_start()
                .trim_start_matches('@')
                .split_whitespace()
                .next()
                .and_then(|verb| self.translations.resolve(verb))
                == Some(key)
        })
    }

    fn dispatch(&mut self, hook: CompletionHook) {
        use CompletionHook as H;
        match hook {
            H::Orders => self.cmplt_orders(),
            H::OpeningQuote => self.cmplt_opening_quote(),
            H::ClosingQuote { delimiter, content } => self.cmplt_closing_quote(delimiter, &content),

            H::Attack => self.cmplt_attack(),
            H::Claim => self.cmplt_claim(None),
            H::ClaimAmount(amount) => self.cmplt_claim(Some(amount)),
            H::Steal | H::Spy => self.cmplt_foreign_units(),
            H::Siege => self.cmplt_siege(),
            H::Name | H::Describe | H::Message => self.cmplt_entity_kinds(true),
            H::NameTarget { kind, quote } => self.cmplt_name_target(kind, &quote),
            H::Use => self.cmplt_use(None),
            H::UseAmount(amount) => self.cmplt_use(Some(amount)),
            H::Enter => self.cmplt_enter(),
            H::EnterBuilding | H::MessageBuilding => self.cmplt_buildings(|_, _| true),
            H::EnterShip | H::MessageShip | H::FollowShip => self.cmplt_ships(),
            H::Guard => self.cmplt_guard(),
            H::MessageUnit | H::Ride | H::Carry | H::FollowUnit => self.cmplt_units_here(),
            H::MessageFaction | H::HideFactionNumber => self.cmplt_factions(&[]),
            H::Follow => self.add_keywords(&[OrderKey::Unit, OrderKey::Ship], priority::DEFAULT),
            H::Research => self.add_keyword(OrderKey::Herbs, priority::DEFAULT),

            H::Give => self.cmplt_give(),
            H::GiveUid(_) => self.cmplt_give_uid(),
            H::GiveUidAmount { target, amount } => self.cmplt_give_uid_amount(target, amount),
            H::GiveUidAll(_) => self.cmplt_give_uid_all(),

            H::Group { quote } => self.cmplt_group(&quote),
            H::Help => self.cmplt_help(),
            H::HelpFaction(_) => self.add_keywords(OrderKey::HELP_CATEGORIES, priority::DEFAULT),
            H::HelpFactionCategory | H::CombatHelp | H::CombatSpellSpell => {
                self.add_keyword(OrderKey::Not, priority::DEFAULT)
            }
            H::Combat => self.cmplt_combat(),
            H::CombatSpell { quote, level_given } => self.cmplt_combat_spell(&quote, level_given),
            H::CombatSpellLevel | H::CastLevel => self.cmplt_spell_levels(),

            H::Buy => self.cmplt_buy(),
            H::BuyAmount(amount) => self.cmplt_buy_amount(amount),
            H::Contact => self.cmplt_foreign_units(),
            H::Teach(students) => self.cmplt_teach(&students),
            H::Learn => self.cmplt_learn(),
            H::LearnSkill(_) => {}
            H::Locale => self.cmplt_locale(),

            H::Make => self.cmplt_make(true),
            H::MakeAmount(_) => self.cmplt_make(false),
            H::MakeTemp => self.cmplt_make_temp(),
            H::MakeCastle => self.cmplt_buildings(|request, building| request.is_castle(building)),
            H::MakeBuildingType(name) => self.cmplt_make_building_type(&name),
            H::MakeShip => self.cmplt_make_ship(),
            H::MakeRoad => self.cmplt_make_road(),

            H::Move { first } => self.cmplt_move(first),
            H::Number => self.cmplt_entity_kinds(false),
            H::Option => self.add_keywords(OrderKey::OPTIONS, priority::DEFAULT),
            H::OptionName(option) => self.cmplt_option_name(option),
            H::Plant | H::PlantAmount(_) => self.add_keywords(
                &[OrderKey::Herbs, OrderKey::Trees, OrderKey::Seeds],
                priority::DEFAULT,
            ),
            H::Piracy(listed) => self.cmplt_factions(&listed),
            H::Recruit => self.cmplt_recruit(),
            H::RecruitAmount(_) => self.cmplt_recruit_race(),
            H::Reserve => self.cmplt_reserve(),
            H::ReserveAmount(amount) => self.cmplt_reserve_amount(amount),
            H::Route => self.cmplt_route(),
            H::Sabotage => self.add_keyword(OrderKey::Ship, priority::DEFAULT),
            H::Sort => self.add_keywords(&[OrderKey::Before, OrderKey::After], priority::DEFAULT),
            H::SortUnit => self.cmplt_own_units(),

            H::Hide => self.cmplt_hide(),
            H::HideFaction => self.add_keywords(&[OrderKey::Not, OrderKey::Number], priority::DEFAULT),
            H::Tax => self.cmplt_earnings(KnownSkill::Taxation),
            H::Entertain => self.cmplt_earnings(KnownSkill::Entertainment),
            H::Origin => self.cmplt_origin(),
            H::Forget => self.cmplt_forget(),
            H::Sell => self.cmplt_sell(),
            H::SellAmount(amount) => self.cmplt_sell_amount(amount),

            H::Cast {
                quote,
                region_given,
                level_given,
            } => self.cmplt_cast(&quote, region_given, level_given),
            H::CastRegion => self.cmplt_coordinates(),
            H::CastSpell { spell, arg_index } => self.cmplt_spell_parameter(&spell, arg_index),
            H::Show { quote } => self.cmplt_show(&quote),
            H::Destroy => self.cmplt_destroy(),
            H::DestroyRoad => self.cmplt_destroy_road(),
            H::Breed => self.add_keywords(&[OrderKey::Horses, OrderKey::Herbs], priority::DEFAULT),
        }
    }
}

impl CompletionListener for Request<'_> {
    fn complete(&mut self, hook: CompletionHook) {
        log_debug!("Completion hook fired", "hook" => format!("{:?}", hook));
        self.dispatch(hook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::LocaleTable;
    use assert_matches::assert_matches;

    fn world() -> GameData {
        let json = serde_json::json!({
            "owner": "f1",
            "factions": [{"id": "f1", "name": "Eigene"}],
            "regions": [{
                "coordinate": {"x": 0, "y": 0},
                "units": [{"id": "a", "name": "Hinz", "faction": "f1",
                           "orders": ["@ATTACKIERE b"], "guarding": true}]
            }]
        });
        GameData::from_json_str(&json.to_string()).unwrap()
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let data = world();
        let table = LocaleTable::german();
        let completer = OrderCompleter::new(&data, &table, CompleterPreferences::default());
        let missing: EntityId = "zz".parse().unwrap();
        let error = completer.complete_for(missing, "GIB ").unwrap_err();
        assert_matches!(error, CompletionError::UnitNotFound(id) if id == missing);
        assert_eq!(error.error_code(), codes::completion::UNIT_NOT_FOUND);
    }

    #[test]
    fn test_unknown_verb_yields_nothing() {
        let data = world();
        let table = LocaleTable::german();
        let completer = OrderCompleter::new(&data, &table, CompleterPreferences::default());
        let unit = data.unit("a".parse().unwrap()).unwrap();
        assert!(completer.complete(unit, "FLIEGE ").is_empty());
        assert!(completer.complete(unit, "GIB ; Kommentar").is_empty());
    }

    #[test]
    fn test_existing_orders_are_recognised() {
        let data = world();
        let table = LocaleTable::german();
        let completer = OrderCompleter::new(&data, &table, CompleterPreferences::default());
        let unit = data.unit("a".parse().unwrap()).unwrap();
        let request = Request::new(&completer, unit);
        assert!(request.has_order(OrderKey::Attack));
        assert!(!request.has_order(OrderKey::Give));
    }
}

//! Locale-dependent spelling of order keywords
//!
//! The parser never compares against literal words. It asks an
//! [`OrderTranslations`] implementation which [`OrderKey`] a typed word means
//! and the completer asks it how to spell a key in the player's locale.
//! Resolution always accepts the words of every built-in locale, so `GIB`
//! and `GIVE` both resolve to [`OrderKey::Give`] whichever locale is active.

use super::keywords::OrderKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Languages with a built-in keyword table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "de")]
    German,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::German, Locale::English];

    pub const fn code(self) -> &'static str {
        match self {
            Locale::German => "de",
            Locale::English => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" | "deutsch" | "german" => Ok(Locale::German),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("unknown locale '{}'", other)),
        }
    }
}

/// Keyword translation capability injected into parser and completer
pub trait OrderTranslations: Send + Sync {
    fn locale(&self) -> Locale;

    /// Spelling of `key` in this locale
    fn translate(&self, key: OrderKey) -> &str;

    /// Key spelled by `word`, in this or any built-in locale
    fn resolve(&self, word: &str) -> Option<OrderKey>;
}

/// Canonical comparison form: upper case with umlauts spelled out
pub fn normalize_keyword(word: &str) -> String {
    let mut normalized = String::with_capacity(word.len() + 2);
    for ch in word.chars() {
        match ch {
            'ä' | 'Ä' => normalized.push_str("AE"),
            'ö' | 'Ö' => normalized.push_str("OE"),
            'ü' | 'Ü' => normalized.push_str("UE"),
            'ß' => normalized.push_str("SS"),
            c => normalized.extend(c.to_uppercase()),
        }
    }
    normalized
}

const fn german_word(key: OrderKey) -> &'static str {
    use OrderKey::*;
    match key {
        Work => "ARBEITE",
        Attack => "ATTACKIERE",
        Banner => "BANNER",
        Claim => "BEANSPRUCHE",
        Steal => "BEKLAUE",
        Siege => "BELAGERE",
        Name => "BENENNE",
        Use => "BENUTZE",
        Describe => "BESCHREIBE",
        Enter => "BETRETE",
        Guard => "BEWACHE",
        Message => "BOTSCHAFT",
        Default => "DEFAULT",
        Email => "EMAIL",
        End => "ENDE",
        Ride => "FAHRE",
        Follow => "FOLGE",
        Research => "FORSCHE",
        Give => "GIB",
        Group => "GRUPPE",
        Help => "HELFE",
        Combat => "KÄMPFE",
        CombatSpell => "KAMPFZAUBER",
        Buy => "KAUFE",
        Contact => "KONTAKTIERE",
        Teach => "LEHRE",
        Learn => "LERNE",
        Locale => "LOCALE",
        Make => "MACHE",
        Move => "NACH",
        Number => "NUMMER",
        Option => "OPTION",
        Password => "PASSWORT",
        Plant => "PFLANZE",
        Piracy => "PIRATERIE",
        Prefix => "PRÄFIX",
        Recruit => "REKRUTIERE",
        Reserve => "RESERVIERE",
        Route => "ROUTE",
        Sabotage => "SABOTIERE",
        Sort => "SORTIERE",
        Spy => "SPIONIERE",
        Quit => "STIRB",
        Hide => "TARNE",
        Carry => "TRANSPORTIERE",
        Tax => "TREIBE",
        Entertain => "UNTERHALTE",
        Origin => "URSPRUNG",
        Forget => "VERGISS",
        Sell => "VERKAUFE",
        Leave => "VERLASSE",
        Cast => "ZAUBERE",
        Show => "ZEIGE",
        Destroy => "ZERSTÖRE",
        Grow => "ZÜCHTE",
        All => "ALLES",
        Each => "JE",
        Persons => "PERSONEN",
        Unit => "EINHEIT",
        Castle => "BURG",
        Building => "GEBÄUDE",
        Ship => "SCHIFF",
        Road => "STRASSE",
        Faction => "PARTEI",
        Region => "REGION",
        Temp => "TEMP",
        Not => "NICHT",
        Level => "STUFE",
        Herbs => "KRÄUTER",
        Trees => "BÄUME",
        Seeds => "SAMEN",
        Horses => "PFERDE",
        Pause => "PAUSE",
        Before => "VOR",
        After => "HINTER",
        Peasants => "Bauern",
        Eressea => "ERESSEA",
        Next => "NÄCHSTER",
        Aggressive => "AGGRESSIV",
        Front => "VORNE",
        Rear => "HINTEN",
        Defensive => "DEFENSIV",
        Flee => "FLIEHE",
        Silver => "SILBER",
        Observe => "WAHRNEHMUNG",
        FactionStealth => "PARTEITARNUNG",
        OptReport => "AUSWERTUNG",
        OptComputer => "COMPUTER",
        OptTemplate => "ZUGVORLAGE",
        OptStatistics => "STATISTIK",
        OptAddresses => "ADRESSEN",
        OptZipped => "ZIPPED",
        OptBzip2 => "BZIP2",
        OptScore => "PUNKTE",
        NorthWest => "NW",
        NorthEast => "NO",
        East => "O",
        SouthEast => "SO",
        SouthWest => "SW",
        West => "W",
    }
}

const fn english_word(key: OrderKey) -> &'static str {
    use OrderKey::*;
    match key {
        Work => "WORK",
        Attack => "ATTACK",
        Banner => "BANNER",
        Claim => "CLAIM",
        Steal => "STEAL",
        Siege => "BESIEGE",
        Name => "NAME",
        Use => "USE",
        Describe => "DESCRIBE",
        Enter => "ENTER",
        Guard => "GUARD",
        Message => "MESSAGE",
        Default => "DEFAULT",
        Email => "EMAIL",
        End => "END",
        Ride => "RIDE",
        Follow => "FOLLOW",
        Research => "RESEARCH",
        Give => "GIVE",
        Group => "GROUP",
        Help => "HELP",
        Combat => "COMBAT",
        CombatSpell => "COMBATSPELL",
        Buy => "BUY",
        Contact => "CONTACT",
        Teach => "TEACH",
        Learn => "LEARN",
        Locale => "LOCALE",
        Make => "MAKE",
        Move => "MOVE",
        Number => "NUMBER",
        Option => "OPTION",
        Password => "PASSWORD",
        Plant => "PLANT",
        Piracy => "PIRACY",
        Prefix => "PREFIX",
        Recruit => "RECRUIT",
        Reserve => "RESERVE",
        Route => "ROUTE",
        Sabotage => "SABOTAGE",
        Sort => "SORT",
        Spy => "SPY",
        Quit => "QUIT",
        Hide => "HIDE",
        Carry => "CARRY",
        Tax => "TAX",
        Entertain => "ENTERTAIN",
        Origin => "ORIGIN",
        Forget => "FORGET",
        Sell => "SELL",
        Leave => "LEAVE",
        Cast => "CAST",
        Show => "SHOW",
        Destroy => "DESTROY",
        Grow => "GROW",
        All => "ALL",
        Each => "EACH",
        Persons => "PERSONS",
        Unit => "UNIT",
        Castle => "CASTLE",
        Building => "BUILDING",
        Ship => "SHIP",
        Road => "ROAD",
        Faction => "FACTION",
        Region => "REGION",
        Temp => "TEMP",
        Not => "NOT",
        Level => "LEVEL",
        Herbs => "HERBS",
        Trees => "TREES",
        Seeds => "SEED",
        Horses => "HORSES",
        Pause => "PAUSE",
        Before => "BEFORE",
        After => "AFTER",
        Peasants => "Peasants",
        Eressea => "ERESSEA",
        Next => "NEXT",
        Aggressive => "AGGRESSIVE",
        Front => "FRONT",
        Rear => "REAR",
        Defensive => "DEFENSIVE",
        Flee => "FLEE",
        Silver => "SILVER",
        Observe => "OBSERVE",
        FactionStealth => "FACTIONSTEALTH",
        OptReport => "REPORT",
        OptComputer => "COMPUTER",
        OptTemplate => "TEMPLATE",
        OptStatistics => "STATISTICS",
        OptAddresses => "ADDRESSES",
        OptZipped => "ZIPPED",
        OptBzip2 => "BZIP2",
        OptScore => "SCORE",
        NorthWest => "NW",
        NorthEast => "NE",
        East => "E",
        SouthEast => "SE",
        SouthWest => "SW",
        West => "W",
    }
}

/// Every key, used to build the lookup tables
const ALL_KEYS: &[OrderKey] = {
    use OrderKey::*;
    &[
        Work, Attack, Banner, Claim, Steal, Siege, Name, Use, Describe, Enter, Guard, Message,
        Default, Email, End, Ride, Follow, Research, Give, Group, Help, Combat, CombatSpell, Buy,
        Contact, Teach, Learn, Locale, Make, Move, Number, Option, Password, Plant, Piracy, Prefix,
        Recruit, Reserve, Route, Sabotage, Sort, Spy, Quit, Hide, Carry, Tax, Entertain, Origin,
        Forget, Sell, Leave, Cast, Show, Destroy, Grow, All, Each, Persons, Unit, Castle, Building,
        Ship, Road, Faction, Region, Temp, Not, Level, Herbs, Trees, Seeds, Horses, Pause, Before,
        After, Peasants, Eressea, Next, Aggressive, Front, Rear, Defensive, Flee, Silver, Observe,
        FactionStealth, OptReport, OptComputer, OptTemplate, OptStatistics, OptAddresses,
        OptZipped, OptBzip2, OptScore, NorthWest, NorthEast, East, SouthEast, SouthWest, West,
    ]
};

/// Keyword table for one locale, optionally with overridden spellings
#[derive(Debug, Clone)]
pub struct LocaleTable {
    locale: Locale,
    words: HashMap<OrderKey, String>,
    index: HashMap<String, OrderKey>,
}

impl LocaleTable {
    pub fn german() -> Self {
        Self::build(Locale::German, german_word)
    }

    pub fn english() -> Self {
        Self::build(Locale::English, english_word)
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::German => Self::german(),
            Locale::English => Self::english(),
        }
    }

    fn build(locale: Locale, word_of: fn(OrderKey) -> &'static str) -> Self {
        let mut table = Self {
            locale,
            words: HashMap::with_capacity(ALL_KEYS.len()),
            index: HashMap::with_capacity(ALL_KEYS.len()),
        };
        for &key in ALL_KEYS {
            table.insert(key, word_of(key));
        }
        table
    }

    fn insert(&mut self, key: OrderKey, word: &str) {
        self.words.insert(key, word.to_string());
        // First spelling wins when two keys share a word (DEFAULT, REGION, ...)
        self.index.entry(normalize_keyword(word)).or_insert(key);
    }

    /// Replace the spelling of one key; the old spelling stops resolving
    pub fn with_override(mut self, key: OrderKey, word: &str) -> Self {
        if let Some(old) = self.words.get(&key) {
            let old = normalize_keyword(old);
            if self.index.get(&old) == Some(&key) {
                self.index.remove(&old);
            }
        }
        self.words.insert(key, word.to_string());
        self.index.insert(normalize_keyword(word), key);
        self
    }

    fn lookup(&self, normalized: &str) -> Option<OrderKey> {
        self.index.get(normalized).copied()
    }
}

fn builtin_tables() -> &'static [LocaleTable; 2] {
    static TABLES: OnceLock<[LocaleTable; 2]> = OnceLock::new();
    TABLES.get_or_init(|| [LocaleTable::german(), LocaleTable::english()])
}

impl OrderTranslations for LocaleTable {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn translate(&self, key: OrderKey) -> &str {
        self.words.get(&key).map(String::as_str).unwrap_or(match self.locale {
            Locale::German => german_word(key),
            Locale::English => english_word(key),
        })
    }

    fn resolve(&self, word: &str) -> Option<OrderKey> {
        let normalized = normalize_keyword(word);
        self.lookup(&normalized).or_else(|| {
            builtin_tables()
                .iter()
                .filter(|table| table.locale != self.locale)
                .find_map(|table| table.lookup(&normalized))
        })
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::german()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_words() {
        for &key in ALL_KEYS {
            assert!(!german_word(key).is_empty());
            assert!(!english_word(key).is_empty());
        }
        assert!(OrderKey::ORDERS.iter().all(|k| ALL_KEYS.contains(k)));
    }

    #[test]
    fn test_resolution_across_locales() {
        let german = LocaleTable::german();
        assert_eq!(german.resolve("GIB"), Some(OrderKey::Give));
        assert_eq!(german.resolve("give"), Some(OrderKey::Give));
        assert_eq!(german.resolve("Kämpfe"), Some(OrderKey::Combat));
        assert_eq!(german.resolve("KAEMPFE"), Some(OrderKey::Combat));
        assert_eq!(german.resolve("zerstoere"), Some(OrderKey::Destroy));
        assert_eq!(german.resolve("XYZZY"), None);

        let english = LocaleTable::english();
        assert_eq!(english.resolve("NACH"), Some(OrderKey::Move));
        assert_eq!(english.translate(OrderKey::Move), "MOVE");
    }

    #[test]
    fn test_active_locale_wins_on_conflict() {
        // "O" is east in German; English has no "O"
        assert_eq!(LocaleTable::english().resolve("O"), Some(OrderKey::East));
        assert_eq!(LocaleTable::english().resolve("E"), Some(OrderKey::East));
    }

    #[test]
    fn test_override() {
        let table = LocaleTable::german().with_override(OrderKey::Give, "GEBE");
        assert_eq!(table.translate(OrderKey::Give), "GEBE");
        assert_eq!(table.resolve("GEBE"), Some(OrderKey::Give));
        // still understood through the English table
        assert_eq!(table.resolve("GIVE"), Some(OrderKey::Give));
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("de".parse::<Locale>(), Ok(Locale::German));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::English));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::English.to_string(), "en");
    }
}

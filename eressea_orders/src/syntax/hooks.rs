//! Completion hooks fired by the order parser
//!
//! Each variant names one argument position of one order grammar and carries
//! whatever the parser had already read when it reached that position.

use crate::grammar::OrderKey;
use crate::world::EntityId;

/// Whether the argument at the completion point sits inside an open quote
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    None,
    Open { delimiter: char, content: String },
}

impl QuoteState {
    pub fn is_open(&self) -> bool {
        matches!(self, QuoteState::Open { .. })
    }
}

/// A unit as named in an order argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitRef {
    Id(EntityId),
    /// `TEMP <id>`, a unit created this turn
    Temp(EntityId),
    /// `0`, the region's peasants
    Peasants,
}

impl UnitRef {
    pub fn id(self) -> Option<EntityId> {
        match self {
            UnitRef::Id(id) => Some(id),
            UnitRef::Temp(_) | UnitRef::Peasants => None,
        }
    }
}

/// What BENENNE, BESCHREIBE and BOTSCHAFT refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Unit,
    Faction,
    Building,
    Ship,
    Region,
}

impl EntityKind {
    pub fn from_key(key: OrderKey) -> Option<Self> {
        match key {
            OrderKey::Unit => Some(EntityKind::Unit),
            OrderKey::Faction => Some(EntityKind::Faction),
            OrderKey::Building | OrderKey::Castle => Some(EntityKind::Building),
            OrderKey::Ship => Some(EntityKind::Ship),
            OrderKey::Region => Some(EntityKind::Region),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionHook {
    /// Start of the line: the order verb
    Orders,
    /// A free text argument with nothing typed yet
    OpeningQuote,
    /// A free text argument whose quote is still open
    ClosingQuote { delimiter: char, content: String },

    Attack,
    Claim,
    ClaimAmount(u32),
    Steal,
    Siege,
    Name,
    NameTarget { kind: EntityKind, quote: QuoteState },
    Use,
    UseAmount(u32),
    Describe,
    Enter,
    EnterBuilding,
    EnterShip,
    Guard,
    Message,
    MessageUnit,
    MessageFaction,
    MessageBuilding,
    MessageShip,
    Ride,
    Follow,
    FollowUnit,
    FollowShip,
    Research,

    Give,
    GiveUid(UnitRef),
    GiveUidAmount { target: UnitRef, amount: u32 },
    GiveUidAll(UnitRef),

    Group { quote: QuoteState },
    Help,
    HelpFaction(EntityId),
    HelpFactionCategory,
    Combat,
    CombatHelp,
    CombatSpell { quote: QuoteState, level_given: bool },
    CombatSpellLevel,
    CombatSpellSpell,

    Buy,
    BuyAmount(u32),
    Contact,
    /// LEHRE, with the students already listed
    Teach(Vec<UnitRef>),
    Learn,
    LearnSkill(String),
    Locale,

    Make,
    MakeAmount(u32),
    MakeTemp,
    MakeCastle,
    MakeBuildingType(String),
    MakeShip,
    MakeRoad,

    /// NACH; `first` when no direction has been given yet
    Move { first: bool },
    Number,
    Option,
    OptionName(OrderKey),
    Plant,
    PlantAmount(u32),
    /// PIRATERIE, with the factions already listed
    Piracy(Vec<EntityId>),
    Recruit,
    RecruitAmount(u32),
    Reserve,
    /// After a number, `ALLES` (no amount) or `JE <n>`
    ReserveAmount(Option<u32>),
    Route,
    Sabotage,
    Sort,
    SortUnit,
    Spy,

    Hide,
    HideFaction,
    HideFactionNumber,
    Carry,
    Tax,
    Entertain,
    Origin,
    Forget,
    Sell,
    /// After a number or `ALLES` (no amount)
    SellAmount(Option<u32>),

    Cast { quote: QuoteState, region_given: bool, level_given: bool },
    CastRegion,
    CastLevel,
    /// Parameter `arg_index` of the named spell
    CastSpell { spell: String, arg_index: usize },
    Show { quote: QuoteState },
    Destroy,
    DestroyRoad,
    Breed,
}

/// Receives the hook fired at the completion point of a line
pub trait CompletionListener {
    fn complete(&mut self, hook: CompletionHook);
}

/// Records fired hooks, used where only the grammar position matters
#[derive(Debug, Default)]
pub struct HookRecorder {
    pub hooks: Vec<CompletionHook>,
}

impl CompletionListener for HookRecorder {
    fn complete(&mut self, hook: CompletionHook) {
        self.hooks.push(hook);
    }
}

//! Recursive-descent parser for one order line
//!
//! Every order verb has its own small grammar. The parser walks it token by
//! token; when it reaches the completion point of the line (see
//! [`TokenStream::completion_index`]) it fires the hook of that argument
//! position on the listener and stops. Without a listener the same walk
//! validates the line and reports the first [`SyntaxError`].

use crate::config::compile_time::syntax::MAX_ORDER_ARGUMENTS;
use crate::grammar::{OrderKey, OrderTranslations};
use crate::log_debug;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::syntax::hooks::{CompletionHook, CompletionListener, EntityKind, QuoteState, UnitRef};
use crate::tokens::{OrderToken, Token, TokenStream};
use crate::world::EntityId;

/// Why the walk stopped before the end of the grammar
enum Halt {
    /// The completion point was reached
    Completed,
    Invalid(SyntaxError),
}

impl From<SyntaxError> for Halt {
    fn from(error: SyntaxError) -> Self {
        Halt::Invalid(error)
    }
}

type Step<T> = Result<T, Halt>;

/// The pure quote hooks of free text arguments
fn quote_hook(quote: QuoteState) -> CompletionHook {
    match quote {
        QuoteState::None => CompletionHook::OpeningQuote,
        QuoteState::Open { delimiter, content } => {
            CompletionHook::ClosingQuote { delimiter, content }
        }
    }
}

fn found(token: &OrderToken) -> String {
    token.token.to_string()
}

pub struct OrderParser<'a> {
    tokens: TokenStream,
    translations: &'a dyn OrderTranslations,
    listener: Option<&'a mut dyn CompletionListener>,
    fired: bool,
}

impl<'a> OrderParser<'a> {
    pub fn new(tokens: TokenStream, translations: &'a dyn OrderTranslations) -> Self {
        Self {
            tokens,
            translations,
            listener: None,
            fired: false,
        }
    }

    /// Attach the listener that receives the completion hook
    pub fn with_listener(mut self, listener: &'a mut dyn CompletionListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Walk the line. Reaching the completion point counts as success.
    pub fn parse(&mut self) -> SyntaxResult<()> {
        match self.parse_order() {
            Ok(()) | Err(Halt::Completed) => Ok(()),
            Err(Halt::Invalid(error)) => {
                log_debug!("Order rejected",
                    "code" => error.error_code(),
                    "error" => &error
                );
                Err(error)
            }
        }
    }

    // ------------------------------------------------------------------
    // Cursor and hook plumbing
    // ------------------------------------------------------------------

    fn next(&mut self) -> (usize, OrderToken) {
        self.tokens.advance()
    }

    fn completing_at(&self, index: usize) -> bool {
        !self.fired && self.listener.is_some() && self.tokens.is_completion_point(index)
    }

    /// Fire `hook` when `index` is the completion point
    fn offer(&mut self, index: usize, hook: CompletionHook) -> Step<()> {
        if !self.completing_at(index) {
            return Ok(());
        }
        if let Some(listener) = self.listener.as_deref_mut() {
            listener.complete(hook);
        }
        self.fired = true;
        Err(Halt::Completed)
    }

    /// Stop at the completion point without offering anything
    fn stop_at(&mut self, index: usize) -> Step<()> {
        if self.completing_at(index) {
            self.fired = true;
            return Err(Halt::Completed);
        }
        Ok(())
    }

    fn keyword(&self, token: &OrderToken) -> Option<OrderKey> {
        token
            .token
            .as_word()
            .and_then(|word| self.translations.resolve(word))
    }

    fn is_keyword(&self, token: &OrderToken, key: OrderKey) -> bool {
        self.keyword(token) == Some(key)
    }

    // ------------------------------------------------------------------
    // Argument readers
    // ------------------------------------------------------------------

    fn expect_end(&mut self) -> Step<()> {
        let (_, token) = self.next();
        if token.is_end() {
            Ok(())
        } else {
            Err(SyntaxError::unexpected_token("end of order", &found(&token), token.span).into())
        }
    }

    fn require(&self, token: &OrderToken, expected: &str) -> Step<()> {
        if token.is_end() {
            return Err(SyntaxError::unexpected_end(expected, token.span).into());
        }
        if token.token.open_quote().is_some() {
            return Err(SyntaxError::UnterminatedString { span: token.span }.into());
        }
        Ok(())
    }

    fn read_number(&self, token: &OrderToken, expected: &str) -> Step<u32> {
        self.require(token, expected)?;
        match &token.token {
            Token::Number(digits) => digits
                .parse()
                .map_err(|_| SyntaxError::invalid_number(digits, token.span).into()),
            Token::Word(word) => Err(SyntaxError::invalid_number(word, token.span).into()),
            _ => Err(SyntaxError::unexpected_token(expected, &found(token), token.span).into()),
        }
    }

    fn read_coordinate(&self, token: &OrderToken) -> Step<i32> {
        self.require(token, "coordinate")?;
        match token.token.as_id_text() {
            Some(text) => text
                .parse()
                .map_err(|_| SyntaxError::invalid_number(text, token.span).into()),
            None => Err(SyntaxError::unexpected_token("coordinate", &found(token), token.span).into()),
        }
    }

    fn read_id(&self, token: &OrderToken, expected: &str) -> Step<EntityId> {
        self.require(token, expected)?;
        match token.token.as_id_text() {
            Some(text) => text
                .parse()
                .map_err(|_| SyntaxError::invalid_id(text, token.span).into()),
            None => Err(SyntaxError::unexpected_token(expected, &found(token), token.span).into()),
        }
    }

    /// `<id>`, `TEMP <id>` or `0` for the peasants
    fn read_unit_ref(&mut self, token: &OrderToken) -> Step<UnitRef> {
        if self.is_keyword(token, OrderKey::Temp) {
            let (index, token) = self.next();
            self.stop_at(index)?;
            return Ok(UnitRef::Temp(self.read_id(&token, "temporary unit id")?));
        }
        let id = self.read_id(token, "unit id")?;
        Ok(if id.is_peasants() {
            UnitRef::Peasants
        } else {
            UnitRef::Id(id)
        })
    }

    /// One word, number or closed quote: item names, skill names, races
    fn read_word(&self, token: &OrderToken, expected: &str) -> Step<String> {
        self.require(token, expected)?;
        token
            .token
            .as_text_argument()
            .map(str::to_string)
            .ok_or_else(|| SyntaxError::unexpected_token(expected, &found(token), token.span).into())
    }

    fn read_key(
        &self,
        token: &OrderToken,
        expected: &str,
        accept: impl Fn(OrderKey) -> bool,
    ) -> Step<OrderKey> {
        self.require(token, expected)?;
        self.keyword(token)
            .filter(|&key| accept(key))
            .ok_or_else(|| SyntaxError::unexpected_token(expected, &found(token), token.span).into())
    }

    /// A free text argument. At the completion point `hook` receives the quote state.
    fn read_text(
        &mut self,
        index: usize,
        token: &OrderToken,
        hook: impl FnOnce(QuoteState) -> CompletionHook,
        expected: &str,
    ) -> Step<String> {
        if self.completing_at(index) {
            let quote = match &token.token {
                Token::Quoted(quoted) if quoted.terminated => return self.stop_at(index).map(|_| String::new()),
                Token::Quoted(quoted) => QuoteState::Open {
                    delimiter: quoted.delimiter,
                    content: quoted.content.clone(),
                },
                _ => QuoteState::None,
            };
            self.offer(index, hook(quote))?;
        }
        self.read_word(token, expected)
    }

    fn read_optional_text(
        &mut self,
        index: usize,
        token: &OrderToken,
        hook: impl FnOnce(QuoteState) -> CompletionHook,
    ) -> Step<Option<String>> {
        if token.is_end() && !self.completing_at(index) {
            return Ok(None);
        }
        self.read_text(index, token, hook, "text").map(Some)
    }

    /// `<text>` and end of order
    fn read_text_order(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.read_text(index, &token, quote_hook, "text")?;
        self.expect_end()
    }

    /// `<unit>` and end of order
    fn read_unit_order(&mut self, hook: CompletionHook) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, hook)?;
        self.read_unit_ref(&token)?;
        self.expect_end()
    }

    /// Optional `<n>` and end of order
    fn read_optional_amount_order(&mut self, hook: CompletionHook) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, hook)?;
        if token.is_end() {
            return Ok(());
        }
        self.read_number(&token, "amount")?;
        self.expect_end()
    }

    /// `[<n>] <item>`
    fn read_amount_item_order(
        &mut self,
        hook: CompletionHook,
        amount_hook: fn(u32) -> CompletionHook,
    ) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, hook)?;
        let token = match token.token.as_number() {
            Some(_) => {
                let amount = self.read_number(&token, "amount")?;
                let (index, token) = self.next();
                self.offer(index, amount_hook(amount))?;
                token
            }
            None => token,
        };
        self.read_word(&token, "item")?;
        self.expect_end()
    }

    fn check_argument_count(&self, count: usize, token: &OrderToken) -> Step<()> {
        if count >= MAX_ORDER_ARGUMENTS {
            return Err(SyntaxError::TooManyArguments {
                limit: MAX_ORDER_ARGUMENTS,
                span: token.span,
            }
            .into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    fn parse_order(&mut self) -> Step<()> {
        let (mut index, mut token) = self.next();
        if token.token == Token::Persist {
            (index, token) = self.next();
        }
        self.offer(index, CompletionHook::Orders)?;
        if token.is_end() {
            return Ok(());
        }

        let verb = match self.keyword(&token).filter(|key| key.is_order()) {
            Some(verb) => verb,
            None => {
                return Err(SyntaxError::unknown_order(&token.token.as_order_string(), token.span).into())
            }
        };
        self.read_order(verb)
    }

    fn read_order(&mut self, verb: OrderKey) -> Step<()> {
        use CompletionHook as H;
        match verb {
            OrderKey::Work | OrderKey::End | OrderKey::Leave => self.expect_end(),
            OrderKey::Attack => self.read_unit_order(H::Attack),
            OrderKey::Banner
            | OrderKey::Default
            | OrderKey::Password
            | OrderKey::Quit => self.read_text_order(),
            OrderKey::Claim => self.read_amount_item_order(H::Claim, H::ClaimAmount),
            OrderKey::Steal => self.read_unit_order(H::Steal),
            OrderKey::Siege => {
                let (index, token) = self.next();
                self.offer(index, H::Siege)?;
                self.read_id(&token, "building id")?;
                self.expect_end()
            }
            OrderKey::Name => self.read_name(),
            OrderKey::Use => self.read_amount_item_order(H::Use, H::UseAmount),
            OrderKey::Describe => {
                let (index, token) = self.next();
                self.offer(index, H::Describe)?;
                self.read_key(&token, "unit, faction, building, ship or region", |key| {
                    EntityKind::from_key(key).is_some()
                })?;
                self.read_text_order()
            }
            OrderKey::Enter => self.read_enter(),
            OrderKey::Guard => {
                let (index, token) = self.next();
                self.offer(index, H::Guard)?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_key(&token, "NICHT", |key| key == OrderKey::Not)?;
                self.expect_end()
            }
            OrderKey::Message => self.read_message(),
            OrderKey::Email => {
                let (_, token) = self.next();
                self.read_word(&token, "email address")?;
                self.expect_end()
            }
            OrderKey::Ride => self.read_unit_order(H::Ride),
            OrderKey::Follow => self.read_follow(),
            OrderKey::Research => {
                let (index, token) = self.next();
                self.offer(index, H::Research)?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_key(&token, "KRÄUTER", |key| key == OrderKey::Herbs)?;
                self.expect_end()
            }
            OrderKey::Give => self.read_give(),
            OrderKey::Group => {
                let (index, token) = self.next();
                self.read_optional_text(index, &token, |quote| H::Group { quote })?;
                self.expect_end()
            }
            OrderKey::Help => self.read_help(),
            OrderKey::Combat => self.read_combat(),
            OrderKey::CombatSpell => self.read_combat_spell(),
            OrderKey::Buy => {
                let (index, token) = self.next();
                self.offer(index, H::Buy)?;
                let amount = self.read_number(&token, "amount")?;
                let (index, token) = self.next();
                self.offer(index, H::BuyAmount(amount))?;
                self.read_word(&token, "luxury good")?;
                self.expect_end()
            }
            OrderKey::Contact => self.read_unit_order(H::Contact),
            OrderKey::Teach => self.read_teach(),
            OrderKey::Learn => {
                let (index, token) = self.next();
                self.offer(index, H::Learn)?;
                let skill = self.read_word(&token, "skill")?;
                let (index, token) = self.next();
                self.offer(index, H::LearnSkill(skill))?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_number(&token, "level")?;
                self.expect_end()
            }
            OrderKey::Locale => {
                let (index, token) = self.next();
                self.offer(index, H::Locale)?;
                self.read_word(&token, "locale")?;
                self.expect_end()
            }
            OrderKey::Make => self.read_make(),
            OrderKey::Move => self.read_move(),
            OrderKey::Number => {
                let (index, token) = self.next();
                self.offer(index, H::Number)?;
                self.read_key(&token, "unit, faction, building or ship", |key| {
                    matches!(
                        EntityKind::from_key(key),
                        Some(EntityKind::Unit | EntityKind::Faction | EntityKind::Building | EntityKind::Ship)
                    )
                })?;
                let (_, token) = self.next();
                if token.is_end() {
                    return Ok(());
                }
                self.read_id(&token, "new id")?;
                self.expect_end()
            }
            OrderKey::Option => {
                let (index, token) = self.next();
                self.offer(index, H::Option)?;
                let option = self.read_key(&token, "option", OrderKey::is_option)?;
                let (index, token) = self.next();
                self.offer(index, H::OptionName(option))?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_key(&token, "NICHT", |key| key == OrderKey::Not)?;
                self.expect_end()
            }
            OrderKey::Plant => self.read_plant(),
            OrderKey::Piracy => self.read_piracy(),
            OrderKey::Prefix => {
                let (index, token) = self.next();
                self.read_optional_text(index, &token, quote_hook)?;
                self.expect_end()
            }
            OrderKey::Recruit => {
                let (index, token) = self.next();
                self.offer(index, H::Recruit)?;
                let amount = self.read_number(&token, "amount")?;
                let (index, token) = self.next();
                self.offer(index, H::RecruitAmount(amount))?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_word(&token, "race")?;
                self.expect_end()
            }
            OrderKey::Reserve => self.read_reserve(),
            OrderKey::Route => self.read_route(),
            OrderKey::Sabotage => {
                let (index, token) = self.next();
                self.offer(index, H::Sabotage)?;
                self.read_key(&token, "SCHIFF", |key| key == OrderKey::Ship)?;
                self.expect_end()
            }
            OrderKey::Sort => {
                let (index, token) = self.next();
                self.offer(index, H::Sort)?;
                self.read_key(&token, "VOR or HINTER", |key| {
                    matches!(key, OrderKey::Before | OrderKey::After)
                })?;
                self.read_unit_order(H::SortUnit)
            }
            OrderKey::Spy => self.read_unit_order(H::Spy),
            OrderKey::Hide => self.read_hide(),
            OrderKey::Carry => self.read_unit_order(H::Carry),
            OrderKey::Tax => self.read_optional_amount_order(H::Tax),
            OrderKey::Entertain => self.read_optional_amount_order(H::Entertain),
            OrderKey::Origin => {
                let (index, token) = self.next();
                self.offer(index, H::Origin)?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_coordinate(&token)?;
                let (index, token) = self.next();
                self.stop_at(index)?;
                self.read_coordinate(&token)?;
                self.expect_end()
            }
            OrderKey::Forget => {
                let (index, token) = self.next();
                self.offer(index, H::Forget)?;
                self.read_word(&token, "skill")?;
                self.expect_end()
            }
            OrderKey::Sell => {
                let (index, token) = self.next();
                self.offer(index, H::Sell)?;
                let amount = if self.is_keyword(&token, OrderKey::All) {
                    None
                } else {
                    Some(self.read_number(&token, "amount or ALLES")?)
                };
                let (index, token) = self.next();
                self.offer(index, H::SellAmount(amount))?;
                self.read_word(&token, "luxury good")?;
                self.expect_end()
            }
            OrderKey::Cast => self.read_cast(),
            OrderKey::Show => {
                let (index, token) = self.next();
                let subject = self.read_text(index, &token, |quote| H::Show { quote }, "item, potion or spell")?;
                let (index, token) = self.next();
                if token.is_end() {
                    return Ok(());
                }
                if self.translations.resolve(&subject) != Some(OrderKey::All) {
                    return Err(SyntaxError::unexpected_token("end of order", &found(&token), token.span).into());
                }
                self.stop_at(index)?;
                self.read_word(&token, "category")?;
                self.expect_end()
            }
            OrderKey::Destroy => self.read_destroy(),
            OrderKey::Grow => {
                let (index, token) = self.next();
                self.offer(index, H::Breed)?;
                if token.is_end() {
                    return Ok(());
                }
                let token = match token.token.as_number() {
                    Some(_) => {
                        self.read_number(&token, "amount")?;
                        let (index, token) = self.next();
                        self.offer(index, H::Breed)?;
                        token
                    }
                    None => token,
                };
                self.read_key(&token, "PFERDE or KRÄUTER", |key| {
                    matches!(key, OrderKey::Horses | OrderKey::Herbs)
                })?;
                self.expect_end()
            }
            other => Err(SyntaxError::unknown_order(self.translations.translate(other), self.tokens.current().span).into()),
        }
    }

    fn read_name(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Name)?;
        let key = self.read_key(&token, "unit, faction, building, ship or region", |key| {
            EntityKind::from_key(key).is_some()
        })?;
        let kind = EntityKind::from_key(key).unwrap_or(EntityKind::Unit);
        let (index, token) = self.next();
        self.read_text(index, &token, |quote| CompletionHook::NameTarget { kind, quote }, "name")?;
        self.expect_end()
    }

    fn read_enter(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Enter)?;
        let key = self.read_key(&token, "BURG or SCHIFF", |key| {
            matches!(key, OrderKey::Castle | OrderKey::Building | OrderKey::Ship)
        })?;
        let (index, token) = self.next();
        if key == OrderKey::Ship {
            self.offer(index, CompletionHook::EnterShip)?;
            self.read_id(&token, "ship id")?;
        } else {
            self.offer(index, CompletionHook::EnterBuilding)?;
            self.read_id(&token, "building id")?;
        }
        self.expect_end()
    }

    fn read_message(&mut self) -> Step<()> {
        use CompletionHook as H;
        let (index, token) = self.next();
        self.offer(index, H::Message)?;
        let key = self.read_key(&token, "EINHEIT, PARTEI, REGION, BURG or SCHIFF", |key| {
            EntityKind::from_key(key).is_some()
        })?;
        match EntityKind::from_key(key) {
            Some(EntityKind::Unit) => {
                let (index, token) = self.next();
                self.offer(index, H::MessageUnit)?;
                self.read_unit_ref(&token)?;
            }
            Some(EntityKind::Faction) => {
                let (index, token) = self.next();
                self.offer(index, H::MessageFaction)?;
                self.read_id(&token, "faction id")?;
            }
            Some(EntityKind::Building) => {
                let (index, token) = self.next();
                self.offer(index, H::MessageBuilding)?;
                self.read_id(&token, "building id")?;
            }
            Some(EntityKind::Ship) => {
                let (index, token) = self.next();
                self.offer(index, H::MessageShip)?;
                self.read_id(&token, "ship id")?;
            }
            Some(EntityKind::Region) | None => {}
        }
        self.read_text_order()
    }

    fn read_follow(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Follow)?;
        let key = self.read_key(&token, "EINHEIT or SCHIFF", |key| {
            matches!(key, OrderKey::Unit | OrderKey::Ship)
        })?;
        let (index, token) = self.next();
        if key == OrderKey::Ship {
            self.offer(index, CompletionHook::FollowShip)?;
            self.read_id(&token, "ship id")?;
        } else {
            self.offer(index, CompletionHook::FollowUnit)?;
            self.read_unit_ref(&token)?;
        }
        self.expect_end()
    }

    /// `GIB <unit> (<n> | ALLES | JE <n>) [<item> | PERSONEN]`, `GIB <unit> EINHEIT`
    fn read_give(&mut self) -> Step<()> {
        use CompletionHook as H;
        let (index, token) = self.next();
        self.offer(index, H::Give)?;
        let target = self.read_unit_ref(&token)?;

        let (index, token) = self.next();
        self.offer(index, H::GiveUid(target))?;
        let amount = match self.keyword(&token) {
            Some(OrderKey::Unit) | Some(OrderKey::Herbs) => return self.expect_end(),
            Some(OrderKey::All) => {
                let (index, token) = self.next();
                self.offer(index, H::GiveUidAll(target))?;
                if token.is_end() {
                    return Ok(());
                }
                self.read_word(&token, "item or PERSONEN")?;
                return self.expect_end();
            }
            Some(OrderKey::Each) => {
                let (index, token) = self.next();
                self.stop_at(index)?;
                self.read_number(&token, "amount")?
            }
            _ => self.read_number(&token, "amount, ALLES, JE or EINHEIT")?,
        };

        let (index, token) = self.next();
        self.offer(index, H::GiveUidAmount { target, amount })?;
        self.read_word(&token, "item or PERSONEN")?;
        self.expect_end()
    }

    fn read_help(&mut self) -> Step<()> {
        use CompletionHook as H;
        let (index, token) = self.next();
        self.offer(index, H::Help)?;
        let faction = self.read_id(&token, "faction id")?;
        let (index, token) = self.next();
        self.offer(index, H::HelpFaction(faction))?;
        self.read_key(&token, "help category", OrderKey::is_help_category)?;
        let (index, token) = self.next();
        self.offer(index, H::HelpFactionCategory)?;
        if token.is_end() {
            return Ok(());
        }
        self.read_key(&token, "NICHT", |key| key == OrderKey::Not)?;
        self.expect_end()
    }

    fn read_combat(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Combat)?;
        if token.is_end() {
            return Ok(());
        }
        let key = self.read_key(&token, "combat status", |key| {
            key == OrderKey::Help || key.is_combat_status()
        })?;
        if key == OrderKey::Help {
            let (index, token) = self.next();
            self.offer(index, CompletionHook::CombatHelp)?;
            if token.is_end() {
                return Ok(());
            }
            self.read_key(&token, "NICHT", |key| key == OrderKey::Not)?;
        }
        self.expect_end()
    }

    /// `KAMPFZAUBER [STUFE <n>] <spell> [NICHT]`
    fn read_combat_spell(&mut self) -> Step<()> {
        use CompletionHook as H;
        let mut level_given = false;
        loop {
            let (index, token) = self.next();
            if !level_given && !self.completing_at(index) && self.is_keyword(&token, OrderKey::Level) {
                let (index, token) = self.next();
                self.offer(index, H::CombatSpellLevel)?;
                self.read_number(&token, "spell level")?;
                level_given = true;
                continue;
            }
            self.read_text(index, &token, |quote| H::CombatSpell { quote, level_given }, "spell")?;
            break;
        }
        let (index, token) = self.next();
        self.offer(index, H::CombatSpellSpell)?;
        if token.is_end() {
            return Ok(());
        }
        self.read_key(&token, "NICHT", |key| key == OrderKey::Not)?;
        self.expect_end()
    }

    fn read_teach(&mut self) -> Step<()> {
        let mut students = Vec::new();
        loop {
            let (index, token) = self.next();
            self.offer(index, CompletionHook::Teach(students.clone()))?;
            if token.is_end() && !students.is_empty() {
                return Ok(());
            }
            self.check_argument_count(students.len(), &token)?;
            students.push(self.read_unit_ref(&token)?);
        }
    }

    /// `MACHE [<n>] (<item> | <building> [<id>] | BURG [<id>] | SCHIFF [<id>] | STRASSE <dir>)`,
    /// `MACHE TEMP <id>`
    fn read_make(&mut self) -> Step<()> {
        use CompletionHook as H;
        let (index, token) = self.next();
        self.offer(index, H::Make)?;
        if self.is_keyword(&token, OrderKey::Temp) {
            let (index, token) = self.next();
            self.offer(index, H::MakeTemp)?;
            self.read_id(&token, "temporary unit id")?;
            return self.expect_end();
        }

        let token = match token.token.as_number() {
            Some(_) => {
                let amount = self.read_number(&token, "amount")?;
                let (index, token) = self.next();
                self.offer(index, H::MakeAmount(amount))?;
                token
            }
            None => token,
        };

        let (hook, expected) = match self.keyword(&token) {
            Some(OrderKey::Castle) => (H::MakeCastle, "building id"),
            Some(OrderKey::Ship) => (H::MakeShip, "ship id"),
            Some(OrderKey::Road) => {
                let (index, token) = self.next();
                self.offer(index, H::MakeRoad)?;
                self.read_key(&token, "direction", OrderKey::is_direction)?;
                return self.expect_end();
            }
            _ => {
                let name = self.read_word(&token, "item, building or ship")?;
                (H::MakeBuildingType(name), "building id")
            }
        };

        let (index, token) = self.next();
        self.offer(index, hook)?;
        if token.is_end() {
            return Ok(());
        }
        self.read_id(&token, expected)?;
        self.expect_end()
    }

    fn read_move(&mut self) -> Step<()> {
        let mut steps = 0;
        loop {
            let (index, token) = self.next();
            self.offer(index, CompletionHook::Move { first: steps == 0 })?;
            if token.is_end() && steps > 0 {
                return Ok(());
            }
            self.check_argument_count(steps, &token)?;
            self.read_key(&token, "direction", OrderKey::is_direction)?;
            steps += 1;
        }
    }

    fn read_route(&mut self) -> Step<()> {
        let mut steps = 0;
        loop {
            let (index, token) = self.next();
            self.offer(index, CompletionHook::Route)?;
            if token.is_end() && steps > 0 {
                return Ok(());
            }
            self.check_argument_count(steps, &token)?;
            self.read_key(&token, "direction or PAUSE", |key| {
                key.is_direction() || key == OrderKey::Pause
            })?;
            steps += 1;
        }
    }

    fn read_piracy(&mut self) -> Step<()> {
        let mut factions = Vec::new();
        loop {
            let (index, token) = self.next();
            self.offer(index, CompletionHook::Piracy(factions.clone()))?;
            if token.is_end() {
                return Ok(());
            }
            self.check_argument_count(factions.len(), &token)?;
            factions.push(self.read_id(&token, "faction id")?);
        }
    }

    fn read_plant(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Plant)?;
        let token = match token.token.as_number() {
            Some(_) => {
                let amount = self.read_number(&token, "amount")?;
                let (index, token) = self.next();
                self.offer(index, CompletionHook::PlantAmount(amount))?;
                token
            }
            None => token,
        };
        self.read_key(&token, "KRÄUTER, BÄUME or SAMEN", |key| {
            matches!(key, OrderKey::Herbs | OrderKey::Trees | OrderKey::Seeds)
        })?;
        self.expect_end()
    }

    /// `RESERVIERE (<n> | ALLES | JE <n>) <item>`
    fn read_reserve(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Reserve)?;
        let amount = match self.keyword(&token) {
            Some(OrderKey::All) => None,
            Some(OrderKey::Each) => {
                let (index, token) = self.next();
                self.stop_at(index)?;
                Some(self.read_number(&token, "amount")?)
            }
            _ => Some(self.read_number(&token, "amount, ALLES or JE")?),
        };
        let (index, token) = self.next();
        self.offer(index, CompletionHook::ReserveAmount(amount))?;
        self.read_word(&token, "item")?;
        self.expect_end()
    }

    /// `TARNE [<n> | <race> | PARTEI [NICHT | NUMMER <faction>]]`
    fn read_hide(&mut self) -> Step<()> {
        use CompletionHook as H;
        let (index, token) = self.next();
        self.offer(index, H::Hide)?;
        if token.is_end() {
            return Ok(());
        }
        if token.token.as_number().is_some() {
            self.read_number(&token, "stealth level")?;
            return self.expect_end();
        }
        if !self.is_keyword(&token, OrderKey::Faction) {
            self.read_word(&token, "race")?;
            return self.expect_end();
        }

        let (index, token) = self.next();
        self.offer(index, H::HideFaction)?;
        if token.is_end() {
            return Ok(());
        }
        let key = self.read_key(&token, "NICHT or NUMMER", |key| {
            matches!(key, OrderKey::Not | OrderKey::Number)
        })?;
        if key == OrderKey::Number {
            let (index, token) = self.next();
            self.offer(index, H::HideFactionNumber)?;
            self.read_id(&token, "faction id")?;
        }
        self.expect_end()
    }

    /// `ZAUBERE [REGION <x> <y>] [STUFE <n>] <spell> <parameters>`
    fn read_cast(&mut self) -> Step<()> {
        use CompletionHook as H;
        let mut region_given = false;
        let mut level_given = false;
        let spell = loop {
            let (index, token) = self.next();
            if !self.completing_at(index) {
                let key = self.keyword(&token);
                if !region_given && key == Some(OrderKey::Region) {
                    let (index, token) = self.next();
                    self.offer(index, H::CastRegion)?;
                    self.read_coordinate(&token)?;
                    let (index, token) = self.next();
                    self.stop_at(index)?;
                    self.read_coordinate(&token)?;
                    region_given = true;
                    continue;
                }
                if !level_given && key == Some(OrderKey::Level) {
                    let (index, token) = self.next();
                    self.offer(index, H::CastLevel)?;
                    self.read_number(&token, "spell level")?;
                    level_given = true;
                    continue;
                }
            }
            break self.read_text(
                index,
                &token,
                |quote| H::Cast {
                    quote,
                    region_given,
                    level_given,
                },
                "spell",
            )?;
        };

        let mut arg_index = 0;
        loop {
            let (index, token) = self.next();
            self.offer(
                index,
                H::CastSpell {
                    spell: spell.clone(),
                    arg_index,
                },
            )?;
            if token.is_end() {
                return Ok(());
            }
            self.check_argument_count(arg_index, &token)?;
            self.read_word(&token, "spell parameter")?;
            arg_index += 1;
        }
    }

    /// `ZERSTÖRE [<n>] [STRASSE <dir>]`
    fn read_destroy(&mut self) -> Step<()> {
        let (index, token) = self.next();
        self.offer(index, CompletionHook::Destroy)?;
        if token.is_end() {
            return Ok(());
        }
        let token = match token.token.as_number() {
            Some(_) => {
                self.read_number(&token, "amount")?;
                let (index, token) = self.next();
                self.offer(index, CompletionHook::Destroy)?;
                if token.is_end() {
                    return Ok(());
                }
                token
            }
            None => token,
        };
        self.read_key(&token, "STRASSE", |key| key == OrderKey::Road)?;
        let (index, token) = self.next();
        self.offer(index, CompletionHook::DestroyRoad)?;
        self.read_key(&token, "direction", OrderKey::is_direction)?;
        self.expect_end()
    }
}

/// Check one order line for syntax errors
pub fn check_tokens(tokens: TokenStream, translations: &dyn OrderTranslations) -> SyntaxResult<()> {
    OrderParser::new(tokens, translations).parse()
}

//! Inventories, trade, production and skills

use super::text::quoted_if_needed;
use super::Request;
use crate::completion::completion::Completion;
use crate::config::constants::{game, priority};
use crate::grammar::OrderKey;
use crate::syntax::UnitRef;
use crate::world::rules::same_name;
use crate::world::{ItemType, KnownItem, KnownSkill, Unit};
use std::collections::BTreeMap;

/// `MAGIC_COST_BASE * (1 + (n + n²) / 2)` for reaching level `n`
fn magic_cost(next_level: u32) -> u32 {
    game::MAGIC_COST_BASE * (1 + (next_level + next_level * next_level) / 2)
}

fn amount_rank(held: u32, wanted: Option<u32>) -> i32 {
    match wanted {
        Some(wanted) if held < wanted => priority::UNLIKELY,
        _ => priority::DEFAULT,
    }
}

impl<'r> Request<'r> {
    /// What the faction's units in this region hold together
    fn pool(&self) -> BTreeMap<String, u32> {
        let mut pool = BTreeMap::new();
        let holders: Vec<&Unit> = match self.region {
            Some(region) => region
                .units
                .iter()
                .filter(|u| u.id == self.unit.id || self.is_own(u))
                .collect(),
            None => vec![self.unit],
        };
        for unit in holders {
            for (item, &amount) in &unit.items {
                let pooled = pool.entry(item.clone()).or_insert(0u32);
                *pooled = pooled.saturating_add(amount);
            }
        }
        pool
    }

    fn pooled(&self, pool: &BTreeMap<String, u32>, item: &str) -> u32 {
        pool.iter()
            .filter(|(name, _)| same_name(name, item))
            .fold(0u32, |total, (_, &amount)| total.saturating_add(amount))
    }

    fn add_item(&mut self, item: &str, rank: i32) {
        self.add(
            Completion::new(item)
                .with_value(quoted_if_needed(item))
                .with_priority(rank),
        );
    }

    /// `<n> <item>` for everything the unit carries
    fn add_held_amounts(&mut self, rank: i32) {
        for (item, &amount) in &self.unit.items {
            if amount == 0 {
                continue;
            }
            let text = format!("{} {}", amount, quoted_if_needed(item));
            self.add(Completion::new(text).with_priority(rank));
        }
    }

    fn add_held_items(&mut self, wanted: Option<u32>) {
        for (item, &amount) in &self.unit.items {
            if amount > 0 {
                self.add_item(item, amount_rank(amount, wanted));
            }
        }
    }

    pub(super) fn cmplt_claim(&mut self, amount: Option<u32>) {
        for (item, held) in self.pool() {
            if self.unit.item_amount(&item) < held {
                self.add_item(&item, amount_rank(held, amount));
            }
        }
    }

    pub(super) fn cmplt_use(&mut self, amount: Option<u32>) {
        let rules = self.data.rules();
        for (item, &held) in &self.unit.items {
            if held > 0 && rules.item(item).is_some_and(|kind| kind.usable) {
                self.add_item(item, amount_rank(held, amount));
            }
        }
    }

    pub(super) fn cmplt_give_uid(&mut self) {
        self.add_keywords(&[OrderKey::All, OrderKey::Each], priority::DEFAULT);
        self.add_keywords(&[OrderKey::Unit, OrderKey::Herbs], priority::RARE);
        self.add_held_amounts(priority::DEFAULT);
        let persons = format!("{} {}", self.unit.persons, self.word(OrderKey::Persons));
        self.add(Completion::new(persons).with_priority(priority::RARE));
    }

    pub(super) fn cmplt_give_uid_amount(&mut self, target: UnitRef, amount: u32) {
        self.add_held_items(Some(amount));
        self.add_keyword(OrderKey::Persons, amount_rank(self.unit.persons, Some(amount)));
        if self.preferences.multi_resource_gives {
            self.cmplt_multi_resource_gives(target, amount);
        }
    }

    pub(super) fn cmplt_give_uid_all(&mut self) {
        self.add_held_items(None);
        self.add_keyword(OrderKey::Persons, priority::DEFAULT);
    }

    /// Hand over every raw material of an item at once. `amount` is the
    /// amount of the first resource; the others follow as extra GIB orders.
    fn cmplt_multi_resource_gives(&mut self, target: UnitRef, amount: u32) {
        let target = match target {
            UnitRef::Id(id) => id.to_string(),
            UnitRef::Temp(id) => format!("{} {}", self.word(OrderKey::Temp), id),
            UnitRef::Peasants => game::PEASANTS_ID.to_string(),
        };
        let give = self.word(OrderKey::Give);
        for item in &self.data.rules().items {
            let Some(first) = item.resources.first() else {
                continue;
            };
            let distinct = item.resources.iter().enumerate().all(|(i, resource)| {
                item.resources[..i]
                    .iter()
                    .all(|earlier| !same_name(&earlier.item, &resource.item))
            });
            if item.resources.len() < 2 || !distinct || first.amount == 0 {
                continue;
            }
            let multiple = amount / first.amount;
            if multiple == 0 {
                continue;
            }
            let Some(wanted) = item
                .resources
                .iter()
                .map(|r| r.amount.checked_mul(multiple))
                .collect::<Option<Vec<u32>>>()
            else {
                continue;
            };
            let held = item
                .resources
                .iter()
                .zip(&wanted)
                .all(|(r, &wanted)| self.unit.item_amount(&r.item) >= wanted);
            if !held {
                continue;
            }

            let names: Vec<&str> = item.resources.iter().map(|r| r.item.as_str()).collect();
            let mut value = quoted_if_needed(&first.item);
            for (resource, wanted) in item.resources.iter().zip(&wanted).skip(1) {
                value.push_str(&format!(
                    "\n{} {} {} {}",
                    give,
                    target,
                    wanted,
                    quoted_if_needed(&resource.item)
                ));
            }
            self.add(
                Completion::new(format!("{} ({})", names.join(" + "), item.name))
                    .with_value(value)
                    .with_postfix("")
                    .with_priority(priority::RARE),
            );
        }
    }

    fn silver(&self) -> u32 {
        self.unit
            .item_amount(self.data.well_known().item(KnownItem::Silver))
    }

    /// The produced luxury and its price here
    fn luxury_on_offer(&self) -> Option<(&'r str, u32)> {
        let region = self.region?;
        let luxury = region.produced_luxury.as_deref()?;
        Some((luxury, region.price(luxury).unwrap_or(0)))
    }

    pub(super) fn cmplt_buy(&mut self) {
        if let Some((_, price)) = self.luxury_on_offer() {
            if price > 0 && self.silver() / price > 0 {
                self.add_number(self.silver() / price, priority::DEFAULT);
            }
        }
    }

    pub(super) fn cmplt_buy_amount(&mut self, amount: u32) {
        if let Some((luxury, price)) = self.luxury_on_offer() {
            let rank = amount_rank(self.silver(), Some(amount.saturating_mul(price)));
            self.add_item(luxury, rank);
        }
    }

    /// Luxuries the region buys, with the amount the unit holds
    fn sellable(&self) -> Vec<(String, u32)> {
        let Some(region) = self.region else {
            return Vec::new();
        };
        region
            .prices
            .keys()
            .filter(|luxury| {
                !region
                    .produced_luxury
                    .as_deref()
                    .is_some_and(|produced| same_name(produced, luxury))
            })
            .map(|luxury| (luxury.clone(), self.unit.item_amount(luxury)))
            .collect()
    }

    pub(super) fn cmplt_sell(&mut self) {
        self.add_keyword(OrderKey::All, priority::DEFAULT);
        for (luxury, held) in self.sellable() {
            if held > 0 {
                let text = format!("{} {}", held, quoted_if_needed(&luxury));
                self.add(Completion::new(text).with_priority(priority::DEFAULT));
            }
        }
    }

    pub(super) fn cmplt_sell_amount(&mut self, amount: Option<u32>) {
        for (luxury, held) in self.sellable() {
            let rank = if held == 0 {
                priority::RARE
            } else {
                amount_rank(held, amount)
            };
            self.add_item(&luxury, rank);
        }
    }

    pub(super) fn cmplt_reserve(&mut self) {
        self.add_keywords(&[OrderKey::All, OrderKey::Each], priority::DEFAULT);
        for (item, amount) in self.pool() {
            let text = format!("{} {}", amount, quoted_if_needed(&item));
            self.add(Completion::new(text).with_priority(priority::DEFAULT));
        }
    }

    pub(super) fn cmplt_reserve_amount(&mut self, amount: Option<u32>) {
        let pool = self.pool();
        let silver = self.data.well_known().item(KnownItem::Silver);
        if self.pooled(&pool, silver) == 0 {
            self.add_item(silver, priority::RARE);
        }
        for (item, held) in pool {
            self.add_item(&item, amount_rank(held, amount));
        }
    }

    /// Every skill of the ruleset with the silver one week of study costs.
    /// A paid skill is followed by the RESERVIERE order for its cost.
    pub(super) fn cmplt_learn(&mut self) {
        let well_known = self.data.well_known();
        let silver = well_known.item(KnownItem::Silver);
        let reserve = self.word(OrderKey::Reserve);
        for skill in &self.data.rules().skills {
            let level = self.unit.skill_level(&skill.name);
            let cost = if well_known.is_skill(&skill.name, KnownSkill::Magic) {
                magic_cost(level + 1)
            } else {
                skill.cost
            };
            let rank = if level > 0 {
                priority::FREQUENT
            } else {
                priority::DEFAULT
            };
            let mut completion = Completion::new(skill.name.as_str())
                .with_value(quoted_if_needed(&skill.name))
                .with_priority(rank);
            if cost > 0 {
                completion = completion
                    .with_value(format!(
                        "{}\n{} {} {}",
                        quoted_if_needed(&skill.name),
                        reserve,
                        cost,
                        quoted_if_needed(silver)
                    ))
                    .with_postfix("");
            }
            self.add(completion);
        }
    }

    pub(super) fn cmplt_forget(&mut self) {
        for skill in self.unit.skills.keys() {
            self.add_item(skill, priority::DEFAULT);
        }
    }

    /// Raw materials at hand: region stock plus the faction's goods here
    fn available(&self, pool: &BTreeMap<String, u32>, item: &str) -> u32 {
        let stock = self.region.map(|region| region.resource(item)).unwrap_or(0);
        stock.saturating_add(self.pooled(pool, item))
    }

    /// Skill and one unit's worth of raw materials are present. Items without
    /// resources or with resources the rules do not know cannot be made.
    fn can_make(&self, pool: &BTreeMap<String, u32>, item: &ItemType) -> bool {
        let Some(requirement) = &item.make_skill else {
            return false;
        };
        if self.unit.effective_skill(&requirement.skill) < requirement.level {
            return false;
        }
        let rules = self.data.rules();
        !item.resources.is_empty()
            && item.resources.iter().all(|resource| {
                rules.item(&resource.item).is_some()
                    && self.available(pool, &resource.item) >= resource.amount
            })
    }

    /// MACHE, at the first argument or after an amount
    pub(super) fn cmplt_make(&mut self, first: bool) {
        if first {
            self.add_keyword(OrderKey::Temp, priority::DEFAULT);
        }
        self.add_keywords(&[OrderKey::Castle, OrderKey::Ship, OrderKey::Road], priority::DEFAULT);

        let rules = self.data.rules();
        for building in &rules.buildings {
            if !building.castle {
                self.add_item(&building.name, priority::DEFAULT);
            }
        }
        for ship in &rules.ships {
            self.add_item(&ship.name, priority::DEFAULT);
        }

        let pool = self.pool();
        let limit = self.preferences.limit_make_completion;
        for item in rules.makeable_items() {
            let possible = self.can_make(&pool, item);
            if limit && !possible {
                continue;
            }
            let rank = if possible {
                priority::DEFAULT
            } else {
                priority::RARE
            };
            self.add_item(&item.name, rank);
        }
    }

    fn recruit_cost(&self) -> u32 {
        let race = self
            .unit
            .race
            .as_deref()
            .or_else(|| self.faction.and_then(|f| f.race.as_deref()));
        race.and_then(|race| self.data.rules().race(race))
            .map(|race| race.recruit_cost)
            .unwrap_or(0)
    }

    /// As many recruits as silver and peasants allow
    pub(super) fn cmplt_recruit(&mut self) {
        let Some(region) = self.region else {
            return;
        };
        let by_peasants = region.peasants / game::PEASANTS_PER_RECRUIT;
        let cost = self.recruit_cost();
        let most = if cost > 0 {
            by_peasants.min(self.silver() / cost)
        } else {
            by_peasants
        };
        if most > 0 {
            self.add_number(most, priority::DEFAULT);
        }
    }

    pub(super) fn cmplt_recruit_race(&mut self) {
        let own = self
            .unit
            .race
            .as_deref()
            .or_else(|| self.faction.and_then(|f| f.race.as_deref()));
        for race in &self.data.rules().races {
            let rank = if own.is_some_and(|own| same_name(own, &race.name)) {
                priority::DEFAULT
            } else {
                priority::UNLIKELY
            };
            self.add_item(&race.name, rank);
        }
    }

    /// TREIBE and UNTERHALTE: the most the unit can earn
    pub(super) fn cmplt_earnings(&mut self, skill: KnownSkill) {
        let level = self
            .unit
            .effective_skill(self.data.well_known().skill(skill));
        let most = self.unit.persons * level * game::SILVER_PER_LEVEL;
        if most > 0 {
            self.add_number(most, priority::DEFAULT);
        }
    }
}

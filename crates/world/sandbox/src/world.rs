//! Simulated world state and the per-tick update.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use script_runtime::{BankOp, Control, MarketOp};
use tracing::{debug, trace};
use world_core::{
    ActorRef, Amount, Area, BankedItem, CarriedItem, Creature, EntityId, EntityRef, EquipmentSlot,
    GroundItem, Interfaces, ItemId, Level, LocalActor, MAX_CARRIED_SLOTS, Position, Skill, Tick,
    Verb, WornItem, WorldObject, WorldSnapshot,
};

use crate::action::Action;
use crate::entities::{DialogueScript, ItemDef, Listing, Npc};

type Scheduled = (Tick, Box<dyn FnOnce(&mut SandboxWorld) + Send>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stack {
    id: ItemId,
    quantity: u64,
}

struct NpcState {
    creature: Creature,
    toughness: u32,
    dialogue: Option<DialogueScript>,
}

#[derive(Debug, Clone, Copy)]
struct Engagement {
    target: EntityId,
    remaining: u32,
}

/// Progress of a fight against one creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CombatStatus {
    Fighting,
    Defeated,
    Disengaged,
    Gone,
}

/// Mutable world behind a [`Sandbox`](crate::Sandbox).
pub struct SandboxWorld {
    tick: Tick,
    pub actor: LocalActor,
    pub interfaces: Interfaces,
    creatures: Vec<NpcState>,
    objects: Vec<WorldObject>,
    ground: Vec<GroundItem>,
    carried: BTreeMap<u8, Stack>,
    worn: BTreeMap<EquipmentSlot, Stack>,
    bank: Vec<Stack>,
    items: HashMap<ItemId, ItemDef>,
    pub(crate) listings: HashMap<ItemId, Listing>,
    pub(crate) currency: ItemId,
    pub(crate) bank_points: HashSet<EntityRef>,
    pub(crate) clerks: HashSet<EntityId>,
    pub(crate) spells: HashMap<String, Control>,
    pub(crate) teleports: HashMap<Control, Position>,
    pub(crate) unreachable: Vec<Area>,
    dialogue: Option<DialogueScript>,
    engagement: Option<Engagement>,
    defeated: Vec<EntityId>,
    pending: VecDeque<Action>,
    log: Vec<Action>,
    scheduled: Vec<Scheduled>,
    next_handle: u32,
}

impl SandboxWorld {
    pub(crate) fn new() -> Self {
        Self {
            tick: Tick::ZERO,
            actor: LocalActor {
                handle: EntityId(0),
                name: "Sandbox".to_owned(),
                ..LocalActor::default()
            },
            interfaces: Interfaces::empty(),
            creatures: Vec::new(),
            objects: Vec::new(),
            ground: Vec::new(),
            carried: BTreeMap::new(),
            worn: BTreeMap::new(),
            bank: Vec::new(),
            items: HashMap::new(),
            listings: HashMap::new(),
            currency: ItemId(995),
            bank_points: HashSet::new(),
            clerks: HashSet::new(),
            spells: HashMap::new(),
            teleports: HashMap::new(),
            unreachable: Vec::new(),
            dialogue: None,
            engagement: None,
            defeated: Vec::new(),
            pending: VecDeque::new(),
            log: Vec::new(),
            scheduled: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Every request received so far.
    pub fn actions(&self) -> &[Action] {
        &self.log
    }

    // ------------------------------------------------------------------
    // Seeding and scripted changes
    // ------------------------------------------------------------------

    pub fn define(&mut self, item: ItemDef) {
        self.items.insert(item.id, item);
    }

    /// Places a creature and returns its handle.
    pub fn spawn(&mut self, npc: Npc) -> EntityId {
        let handle = self.next_handle();
        let target = npc.aggressive.then(|| self.actor.actor_ref());
        debug!(%handle, name = %npc.name, "spawn creature");
        self.creatures.push(NpcState {
            creature: Creature {
                handle,
                id: npc.id,
                name: npc.name,
                position: npc.position,
                verbs: npc.verbs,
                target,
                animation: None,
            },
            toughness: npc.toughness,
            dialogue: npc.dialogue,
        });
        handle
    }

    /// Removes every creature called `name`. Returns how many were removed.
    pub fn despawn(&mut self, name: &str) -> usize {
        let before = self.creatures.len();
        self.creatures.retain(|npc| npc.creature.name != name);
        before - self.creatures.len()
    }

    pub fn add_object(
        &mut self,
        id: u32,
        name: impl Into<String>,
        position: Position,
        verbs: Vec<Verb>,
    ) -> EntityId {
        let handle = self.next_handle();
        self.objects.push(WorldObject {
            handle,
            id,
            name: name.into(),
            position,
            verbs,
        });
        handle
    }

    pub fn drop_item(&mut self, item: ItemId, quantity: u64, position: Position) -> EntityId {
        let handle = self.next_handle();
        let name = self.def(item).name;
        self.ground.push(GroundItem {
            handle,
            id: item,
            name,
            position,
            quantity,
            verbs: vec![Verb::Take],
        });
        handle
    }

    /// Adds up to `quantity` to the carried inventory. Returns how many fit.
    pub fn give(&mut self, item: ItemId, quantity: u64) -> u64 {
        if quantity == 0 {
            return 0;
        }
        if self.def(item).stackable {
            if let Some(stack) = self.carried.values_mut().find(|s| s.id == item) {
                stack.quantity += quantity;
                return quantity;
            }
            return match self.free_slot() {
                Some(slot) => {
                    self.carried.insert(slot, Stack { id: item, quantity });
                    quantity
                }
                None => 0,
            };
        }

        let mut added = 0;
        while added < quantity {
            let Some(slot) = self.free_slot() else { break };
            self.carried.insert(slot, Stack { id: item, quantity: 1 });
            added += 1;
        }
        added
    }

    pub fn wear(&mut self, item: ItemId, slot: EquipmentSlot) {
        self.worn.insert(slot, Stack { id: item, quantity: 1 });
    }

    pub fn deposit(&mut self, item: ItemId, quantity: u64) {
        if quantity == 0 {
            return;
        }
        match self.bank.iter_mut().find(|s| s.id == item) {
            Some(stack) => stack.quantity += quantity,
            None => self.bank.push(Stack { id: item, quantity }),
        }
    }

    pub fn carried_quantity(&self, item: ItemId) -> u64 {
        self.carried
            .values()
            .filter(|s| s.id == item)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn bank_quantity(&self, item: ItemId) -> u64 {
        self.bank
            .iter()
            .filter(|s| s.id == item)
            .map(|s| s.quantity)
            .sum()
    }

    pub fn worn_item(&self, slot: EquipmentSlot) -> Option<ItemId> {
        self.worn.get(&slot).map(|s| s.id)
    }

    pub fn set_level(&mut self, skill: Skill, level: Level) {
        self.actor.levels.set(skill, level);
    }

    /// Raises `skill` by one and shows the level-up message over a one-page
    /// dialogue.
    pub fn level_up(&mut self, skill: Skill) {
        let level = self.actor.levels.get(skill);
        self.actor
            .levels
            .set(skill, Level::new(level.base + 1, level.current + 1));
        let pages = self.dialogue.as_ref().map_or(0, |d| d.pages) + 1;
        self.dialogue = Some(DialogueScript {
            pages,
            ..self.dialogue.take().unwrap_or_default()
        });
        self.interfaces
            .insert(Interfaces::LEVEL_UP | Interfaces::DIALOGUE);
    }

    /// Runs `change` at the start of tick `at`.
    pub fn schedule<F>(&mut self, at: Tick, change: F)
    where
        F: FnOnce(&mut SandboxWorld) + Send + 'static,
    {
        self.scheduled.push((at, Box::new(change)));
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    pub(crate) fn record(&mut self, action: Action) {
        trace!(?action, "record");
        self.log.push(action);
    }

    /// Records `action` and applies it on the next tick.
    pub(crate) fn enqueue(&mut self, action: Action) {
        self.record(action.clone());
        self.pending.push_back(action);
    }

    pub(crate) fn has_creature(&self, handle: EntityId) -> bool {
        self.creatures.iter().any(|npc| npc.creature.handle == handle)
    }

    pub(crate) fn combat_status(&self, handle: EntityId) -> CombatStatus {
        if self.defeated.contains(&handle) {
            return CombatStatus::Defeated;
        }
        if !self.has_creature(handle) {
            return CombatStatus::Gone;
        }
        match self.engagement {
            Some(engagement) if engagement.target != handle => CombatStatus::Disengaged,
            _ => CombatStatus::Fighting,
        }
    }

    pub(crate) fn dialogue_open(&self) -> bool {
        self.interfaces.contains(Interfaces::DIALOGUE)
    }

    /// Picks `option` if the open dialogue offers it.
    pub(crate) fn choose(&self, option: &str) -> bool {
        self.dialogue
            .as_ref()
            .is_some_and(|d| d.options.iter().any(|o| o == option))
    }

    pub(crate) fn continue_dialogue(&mut self) {
        let Some(dialogue) = self.dialogue.as_mut() else {
            return;
        };
        dialogue.pages = dialogue.pages.saturating_sub(1);
        if dialogue.pages == 0 {
            self.end_dialogue();
        }
    }

    pub(crate) fn end_dialogue(&mut self) {
        self.dialogue = None;
        self.interfaces.remove(Interfaces::DIALOGUE);
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advances one tick and returns the snapshot for it.
    pub(crate) fn step(&mut self) -> WorldSnapshot {
        self.tick = self.tick + 1;

        let now = self.tick;
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.scheduled = later;
        for (_, change) in due {
            change(self);
        }

        while let Some(action) = self.pending.pop_front() {
            self.apply(action);
        }
        self.progress_combat();
        self.snapshot()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut snapshot = WorldSnapshot {
            tick: self.tick,
            actor: self.actor.clone(),
            creatures: self.creatures.iter().map(|npc| npc.creature.clone()).collect(),
            objects: self.objects.clone(),
            ground_items: self.ground.clone(),
            worn: self
                .worn
                .iter()
                .map(|(slot, stack)| WornItem {
                    slot: *slot,
                    id: stack.id,
                    name: self.def(stack.id).name,
                    quantity: stack.quantity,
                    verbs: vec![Verb::Remove],
                })
                .collect(),
            interfaces: self.interfaces,
            ..WorldSnapshot::default()
        };
        for (slot, stack) in &self.carried {
            let def = self.def(stack.id);
            // At most MAX_CARRIED_SLOTS stacks are ever held.
            let _ = snapshot.carried.try_push(CarriedItem {
                slot: *slot,
                id: stack.id,
                verbs: def.carried_verbs(),
                name: def.name,
                quantity: stack.quantity,
            });
        }
        if self.interfaces.contains(Interfaces::BANK) {
            snapshot.banked = self
                .bank
                .iter()
                .map(|stack| BankedItem {
                    id: stack.id,
                    name: self.def(stack.id).name,
                    quantity: stack.quantity,
                })
                .collect();
        }
        snapshot
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Interact { target, verb } => self.interact(target, verb),
            Action::Bank(op) => self.bank_op(op),
            Action::Market(op) => self.market_op(op),
            Action::Unequip(slot) => self.unequip(slot),
            Action::DismissLevelUp => self.interfaces.remove(Interfaces::LEVEL_UP),
            Action::WalkTo(area) => self.actor.position = area.anchor(),
            Action::Activate(control) => {
                if let Some(destination) = self.teleports.get(&control) {
                    debug!(%destination, "teleport");
                    self.actor.position = *destination;
                }
            }
            Action::Kill {
                target: EntityRef::Creature(handle),
                ..
            } => self.engage(handle),
            other => trace!(action = ?other, "no world effect"),
        }
    }

    fn interact(&mut self, target: EntityRef, verb: Verb) {
        match (target, verb) {
            (EntityRef::Creature(_) | EntityRef::Object(_), Verb::Bank)
            | (EntityRef::Creature(_), Verb::TalkTo)
            | (EntityRef::Object(_), Verb::Use)
                if self.bank_points.contains(&target) =>
            {
                self.show(Interfaces::BANK)
            }
            (EntityRef::Creature(handle), Verb::Exchange) if self.clerks.contains(&handle) => {
                self.show(Interfaces::MARKETPLACE)
            }
            (EntityRef::Creature(handle), Verb::TalkTo) => self.start_dialogue(handle),
            (EntityRef::Creature(handle), Verb::Attack) => self.engage(handle),
            (EntityRef::GroundItem(handle), Verb::Take) => self.pick_up(handle),
            (EntityRef::Carried { slot }, Verb::Wear | Verb::Wield) => self.equip(slot),
            (EntityRef::Carried { slot }, Verb::Drop) => self.drop_slot(slot),
            (EntityRef::Carried { slot }, Verb::Eat | Verb::Drink) => self.consume(slot),
            (EntityRef::Worn { slot }, Verb::Remove) => self.unequip(slot),
            _ => trace!(?target, %verb, "interaction has no effect"),
        }
    }

    /// Bank and marketplace are mutually exclusive.
    fn show(&mut self, interface: Interfaces) {
        self.interfaces
            .remove(Interfaces::BANK | Interfaces::MARKETPLACE);
        self.interfaces.insert(interface);
    }

    fn bank_op(&mut self, op: BankOp) {
        if !self.interfaces.contains(Interfaces::BANK) {
            debug!(?op, "bank closed, ignoring");
            return;
        }
        match op {
            // Sandbox stacks carry no noted or charge state, so both match
            // modes select by id.
            BankOp::Withdraw { item, amount, .. } => {
                let Some(index) = self.bank.iter().position(|s| s.id == item) else {
                    debug!(%item, "not banked");
                    return;
                };
                let banked = self.bank[index].quantity;
                let wanted = match amount {
                    Amount::Exact(n) => n.min(banked),
                    Amount::All => banked,
                };
                let moved = self.give(item, wanted);
                self.bank[index].quantity -= moved;
                if self.bank[index].quantity == 0 {
                    self.bank.remove(index);
                }
            }
            BankOp::DepositInventory => {
                for stack in std::mem::take(&mut self.carried).into_values() {
                    self.deposit(stack.id, stack.quantity);
                }
            }
            BankOp::Close => self.interfaces.remove(Interfaces::BANK),
        }
    }

    fn market_op(&mut self, op: MarketOp) {
        if !self.interfaces.contains(Interfaces::MARKETPLACE) {
            debug!(?op, "marketplace closed, ignoring");
            return;
        }
        match op {
            MarketOp::Buy { item, quantity } => {
                let Some(listing) = self.listings.get(&item).copied() else {
                    debug!(%item, "not listed");
                    return;
                };
                let cost = listing.price.saturating_mul(quantity);
                if listing.stock < quantity {
                    debug!(%item, quantity, stock = listing.stock, "out of stock");
                    return;
                }
                if self.carried_quantity(self.currency) < cost {
                    debug!(%item, cost, "cannot afford");
                    return;
                }
                if !self.room_for(item, quantity) {
                    debug!(%item, quantity, "no room");
                    return;
                }
                self.take(self.currency, cost);
                self.give(item, quantity);
                if let Some(listing) = self.listings.get_mut(&item) {
                    listing.stock -= quantity;
                }
            }
            MarketOp::Close => self.interfaces.remove(Interfaces::MARKETPLACE),
        }
    }

    fn start_dialogue(&mut self, handle: EntityId) {
        let script = self
            .creatures
            .iter()
            .find(|npc| npc.creature.handle == handle)
            .and_then(|npc| npc.dialogue.clone());
        if let Some(script) = script {
            self.dialogue = Some(script);
            self.interfaces.insert(Interfaces::DIALOGUE);
        }
    }

    fn engage(&mut self, handle: EntityId) {
        let player = self.actor.actor_ref();
        let Some(npc) = self
            .creatures
            .iter_mut()
            .find(|npc| npc.creature.handle == handle)
        else {
            return;
        };
        npc.creature.target = Some(player);
        self.actor.target = Some(ActorRef::Creature(handle));
        self.engagement = Some(Engagement {
            target: handle,
            remaining: npc.toughness,
        });
    }

    fn progress_combat(&mut self) {
        let Some(engagement) = self.engagement.as_mut() else {
            return;
        };
        let target = engagement.target;
        if !self.creatures.iter().any(|npc| npc.creature.handle == target) {
            self.engagement = None;
            self.actor.target = None;
            return;
        }
        engagement.remaining = engagement.remaining.saturating_sub(1);
        if engagement.remaining == 0 {
            debug!(%target, "creature defeated");
            self.engagement = None;
            self.actor.target = None;
            self.creatures.retain(|npc| npc.creature.handle != target);
            self.defeated.push(target);
        }
    }

    fn pick_up(&mut self, handle: EntityId) {
        let Some(index) = self.ground.iter().position(|g| g.handle == handle) else {
            return;
        };
        let (item, quantity) = (self.ground[index].id, self.ground[index].quantity);
        if self.room_for(item, quantity) {
            self.give(item, quantity);
            self.ground.remove(index);
        }
    }

    fn equip(&mut self, slot: u8) {
        let Some(stack) = self.carried.get(&slot).copied() else {
            return;
        };
        let Some(equipment_slot) = self.def(stack.id).slot else {
            return;
        };
        self.carried.remove(&slot);
        if let Some(previous) = self.worn.insert(equipment_slot, stack) {
            self.give(previous.id, previous.quantity);
        }
    }

    fn unequip(&mut self, slot: EquipmentSlot) {
        let Some(stack) = self.worn.get(&slot).copied() else {
            return;
        };
        if self.room_for(stack.id, stack.quantity) {
            self.worn.remove(&slot);
            self.give(stack.id, stack.quantity);
        }
    }

    fn drop_slot(&mut self, slot: u8) {
        if let Some(stack) = self.carried.remove(&slot) {
            let position = self.actor.position;
            self.drop_item(stack.id, stack.quantity, position);
        }
    }

    fn consume(&mut self, slot: u8) {
        if let Some(stack) = self.carried.get_mut(&slot) {
            stack.quantity -= 1;
            if stack.quantity == 0 {
                self.carried.remove(&slot);
            }
        }
    }

    /// Removes up to `quantity` of `item` from the carried inventory.
    fn take(&mut self, item: ItemId, mut quantity: u64) {
        let slots: Vec<u8> = self
            .carried
            .iter()
            .filter(|(_, s)| s.id == item)
            .map(|(slot, _)| *slot)
            .collect();
        for slot in slots {
            if quantity == 0 {
                break;
            }
            if let Some(stack) = self.carried.get_mut(&slot) {
                let taken = stack.quantity.min(quantity);
                stack.quantity -= taken;
                quantity -= taken;
                if stack.quantity == 0 {
                    self.carried.remove(&slot);
                }
            }
        }
    }

    fn room_for(&self, item: ItemId, quantity: u64) -> bool {
        let free = MAX_CARRIED_SLOTS - self.carried.len();
        if self.def(item).stackable {
            free > 0 || self.carried.values().any(|s| s.id == item)
        } else {
            free as u64 >= quantity
        }
    }

    fn free_slot(&self) -> Option<u8> {
        (0..MAX_CARRIED_SLOTS as u8).find(|slot| !self.carried.contains_key(slot))
    }

    fn def(&self, item: ItemId) -> ItemDef {
        self.items
            .get(&item)
            .cloned()
            .unwrap_or_else(|| ItemDef::unknown(item))
    }

    fn next_handle(&mut self) -> EntityId {
        let handle = EntityId(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COINS: ItemId = ItemId(995);
    const ARROWS: ItemId = ItemId(882);
    const LOBSTER: ItemId = ItemId(379);

    fn world() -> SandboxWorld {
        let mut world = SandboxWorld::new();
        world.define(ItemDef::new(995, "Coins").stackable());
        world.define(ItemDef::new(882, "Bronze arrow").stackable());
        world.define(ItemDef::new(379, "Lobster"));
        world
    }

    fn open_bank(world: &mut SandboxWorld) {
        world.interfaces.insert(Interfaces::BANK);
    }

    #[test]
    fn actions_apply_on_the_next_tick() {
        let mut world = world();
        world.deposit(COINS, 1000);
        open_bank(&mut world);

        world.enqueue(Action::Bank(BankOp::Withdraw {
            item: COINS,
            amount: Amount::Exact(500),
            mode: Default::default(),
        }));
        assert_eq!(world.carried_quantity(COINS), 0);

        let snapshot = world.step();
        assert_eq!(snapshot.tick, Tick(1));
        assert_eq!(world.carried_quantity(COINS), 500);
        assert_eq!(world.bank_quantity(COINS), 500);
    }

    #[test]
    fn withdraw_clamps_to_banked_stock_and_slots() {
        let mut world = world();
        world.deposit(LOBSTER, 40);
        open_bank(&mut world);

        world.enqueue(Action::Bank(BankOp::Withdraw {
            item: LOBSTER,
            amount: Amount::All,
            mode: Default::default(),
        }));
        world.step();

        assert_eq!(world.carried_quantity(LOBSTER), MAX_CARRIED_SLOTS as u64);
        assert_eq!(world.bank_quantity(LOBSTER), 40 - MAX_CARRIED_SLOTS as u64);
    }

    #[test]
    fn bank_ops_are_ignored_while_closed() {
        let mut world = world();
        world.give(COINS, 10);
        world.enqueue(Action::Bank(BankOp::DepositInventory));
        world.step();
        assert_eq!(world.carried_quantity(COINS), 10);
    }

    #[test]
    fn banked_items_are_only_visible_while_open() {
        let mut world = world();
        world.deposit(ARROWS, 300);
        assert!(world.snapshot().banked.is_empty());
        open_bank(&mut world);
        assert_eq!(world.snapshot().banked.len(), 1);
    }

    #[test]
    fn purchase_charges_currency() {
        let mut world = world();
        world.give(COINS, 100);
        world.listings.insert(ARROWS, Listing { price: 2, stock: 1000 });
        world.interfaces.insert(Interfaces::MARKETPLACE);

        world.enqueue(Action::Market(MarketOp::Buy {
            item: ARROWS,
            quantity: 30,
        }));
        world.step();

        assert_eq!(world.carried_quantity(ARROWS), 30);
        assert_eq!(world.carried_quantity(COINS), 40);
    }

    #[test]
    fn unaffordable_purchase_delivers_nothing() {
        let mut world = world();
        world.give(COINS, 10);
        world.listings.insert(ARROWS, Listing { price: 2, stock: 1000 });
        world.interfaces.insert(Interfaces::MARKETPLACE);

        world.enqueue(Action::Market(MarketOp::Buy {
            item: ARROWS,
            quantity: 30,
        }));
        world.step();

        assert_eq!(world.carried_quantity(ARROWS), 0);
        assert_eq!(world.carried_quantity(COINS), 10);
    }

    #[test]
    fn combat_lasts_the_creature_toughness() {
        let mut world = world();
        let goblin = world.spawn(Npc::new(3029, "Goblin", Position::new(1, 1)).toughness(2));

        world.enqueue(Action::Interact {
            target: EntityRef::Creature(goblin),
            verb: Verb::Attack,
        });
        world.step();
        assert_eq!(world.combat_status(goblin), CombatStatus::Fighting);
        assert_eq!(world.actor.target, Some(ActorRef::Creature(goblin)));

        world.step();
        assert_eq!(world.combat_status(goblin), CombatStatus::Defeated);
        assert!(world.actor.target.is_none());
    }

    #[test]
    fn scheduled_changes_run_at_their_tick() {
        let mut world = world();
        world.schedule(Tick(2), |w| {
            w.spawn(Npc::new(1, "Imp", Position::new(0, 0)));
        });

        assert!(world.step().creatures.is_empty());
        assert_eq!(world.step().creatures.len(), 1);
    }

    #[test]
    fn opening_the_bank_closes_the_marketplace() {
        let mut world = world();
        let booth = world.add_object(10355, "Bank booth", Position::new(0, 0), vec![Verb::Bank]);
        world.bank_points.insert(EntityRef::Object(booth));
        world.interfaces.insert(Interfaces::MARKETPLACE);

        world.enqueue(Action::Interact {
            target: EntityRef::Object(booth),
            verb: Verb::Bank,
        });
        let snapshot = world.step();

        assert!(snapshot.is_open(Interfaces::BANK));
        assert!(!snapshot.is_open(Interfaces::MARKETPLACE));
    }
}

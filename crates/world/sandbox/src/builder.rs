use std::sync::Arc;

use script_runtime::Control;
use world_core::{Area, EntityRef, ItemId, Level, Position, Skill, Tick, Verb};

use crate::entities::{ItemDef, Listing, Npc};
use crate::host::{Pacing, Sandbox};
use crate::world::SandboxWorld;

/// Seeds a [`Sandbox`].
///
/// Coins (`995`) are predefined as the stackable world currency.
pub struct SandboxBuilder {
    world: SandboxWorld,
    pacing: Pacing,
}

impl SandboxBuilder {
    pub(crate) fn new() -> Self {
        let mut world = SandboxWorld::new();
        world.define(ItemDef::new(995, "Coins").stackable());
        Self {
            world,
            pacing: Pacing::default(),
        }
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.world.actor.position = position;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.world.actor.name = name.into();
        self
    }

    pub fn level(mut self, skill: Skill, level: Level) -> Self {
        self.world.set_level(skill, level);
        self
    }

    pub fn item(mut self, item: ItemDef) -> Self {
        self.world.define(item);
        self
    }

    /// Replaces the currency item.
    pub fn currency(mut self, item: ItemDef) -> Self {
        self.world.currency = item.id;
        self.world.define(item.stackable());
        self
    }

    pub fn carrying(mut self, item: ItemId, quantity: u64) -> Self {
        self.world.give(item, quantity);
        self
    }

    /// Equips `item` into the slot its definition names.
    pub fn wearing(mut self, item: ItemDef) -> Self {
        if let Some(slot) = item.slot {
            self.world.wear(item.id, slot);
        }
        self.world.define(item);
        self
    }

    pub fn banked(mut self, item: ItemId, quantity: u64) -> Self {
        self.world.deposit(item, quantity);
        self
    }

    pub fn creature(mut self, npc: Npc) -> Self {
        self.world.spawn(npc);
        self
    }

    pub fn banker(mut self, name: impl Into<String>, position: Position) -> Self {
        let handle = self
            .world
            .spawn(Npc::new(1613, name, position).verb(Verb::Bank));
        self.world.bank_points.insert(EntityRef::Creature(handle));
        self
    }

    /// A banker that only offers Talk-to; talking opens the bank.
    pub fn talking_banker(mut self, name: impl Into<String>, position: Position) -> Self {
        let handle = self
            .world
            .spawn(Npc::new(1613, name, position).verb(Verb::TalkTo));
        self.world.bank_points.insert(EntityRef::Creature(handle));
        self
    }

    pub fn booth(mut self, name: impl Into<String>, position: Position) -> Self {
        let handle = self
            .world
            .add_object(10355, name, position, vec![Verb::Bank]);
        self.world.bank_points.insert(EntityRef::Object(handle));
        self
    }

    /// A bank chest answering `verb` (`Bank` or `Use`).
    pub fn chest(mut self, name: impl Into<String>, position: Position, verb: Verb) -> Self {
        let handle = self.world.add_object(4483, name, position, vec![verb]);
        self.world.bank_points.insert(EntityRef::Object(handle));
        self
    }

    pub fn clerk(mut self, name: impl Into<String>, position: Position) -> Self {
        let handle = self
            .world
            .spawn(Npc::new(2148, name, position).verb(Verb::Exchange));
        self.world.clerks.insert(handle);
        self
    }

    pub fn object(
        mut self,
        id: u32,
        name: impl Into<String>,
        position: Position,
        verbs: Vec<Verb>,
    ) -> Self {
        self.world.add_object(id, name, position, verbs);
        self
    }

    pub fn ground_item(mut self, item: ItemId, quantity: u64, position: Position) -> Self {
        self.world.drop_item(item, quantity, position);
        self
    }

    pub fn listing(mut self, item: ItemId, price: u64, stock: u64) -> Self {
        self.world.listings.insert(item, Listing { price, stock });
        self
    }

    pub fn spell(mut self, name: impl Into<String>, control: Control) -> Self {
        self.world.spells.insert(name.into(), control);
        self
    }

    /// A spell that moves the actor to `destination` when activated.
    pub fn teleport(
        mut self,
        name: impl Into<String>,
        control: Control,
        destination: Position,
    ) -> Self {
        self.world.spells.insert(name.into(), control);
        self.world.teleports.insert(control, destination);
        self
    }

    pub fn unreachable(mut self, area: Area) -> Self {
        self.world.unreachable.push(area);
        self
    }

    /// Runs `change` at the start of tick `at`.
    pub fn schedule<F>(mut self, at: u64, change: F) -> Self
    where
        F: FnOnce(&mut SandboxWorld) + Send + 'static,
    {
        self.world.schedule(Tick(at), change);
        self
    }

    pub fn build(self) -> Arc<Sandbox> {
        Arc::new(Sandbox::new(self.world, self.pacing))
    }
}

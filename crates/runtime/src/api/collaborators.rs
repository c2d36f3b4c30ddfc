//! Host-provided capabilities the runtime is composed from.
//!
//! Hosts (a live client, the in-memory sandbox, a test double) implement these
//! traits; scripts only ever see them through a [`ScriptContext`](crate::ScriptContext).
//!
//! Everything that may take several ticks is `async`. Plain controls are
//! synchronous: they enqueue an action for the next tick and return, so the
//! only place a script suspends is a wait.
use std::sync::Arc;

use async_trait::async_trait;
use world_core::{Amount, Area, EntityRef, EquipmentSlot, ItemId, Tick, Verb, WorldSnapshot};

use super::errors::{
    CatalogError, ClockError, CombatError, ControlError, DialogueError, NavigationError,
};

/// Read access to the most recent world snapshot.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> Arc<WorldSnapshot>;
}

/// Observes the world's tick counter. The runtime never drives it.
#[async_trait]
pub trait TickClock: Send + Sync {
    fn current(&self) -> Tick;

    /// Resolves with the new tick once the world has moved past `since`.
    async fn advanced(&self, since: Tick) -> Result<Tick, ClockError>;
}

/// How a withdrawal identifies bank stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Any stack with the item id.
    #[default]
    ById,
    /// Only a stack whose full signature (id, noted state, charges) matches.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankOp {
    Withdraw {
        item: ItemId,
        amount: Amount,
        mode: MatchMode,
    },
    DepositInventory,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketOp {
    Buy { item: ItemId, quantity: u64 },
    Close,
}

/// Interface widget that invokes a spell or prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Control {
    pub interface: u16,
    pub child: u16,
}

/// Fire-and-forget control surface of the local actor.
pub trait Controls: Send + Sync {
    fn interact(&self, target: EntityRef, verb: Verb) -> Result<(), ControlError>;

    fn use_on(&self, item: EntityRef, target: EntityRef) -> Result<(), ControlError>;

    fn cast_on(&self, spell: Control, target: EntityRef) -> Result<(), ControlError>;

    /// Clicks a control with no target (teleports, prayer toggles).
    fn activate(&self, control: Control) -> Result<(), ControlError>;

    fn unequip(&self, slot: EquipmentSlot) -> Result<(), ControlError>;

    fn bank(&self, op: BankOp) -> Result<(), ControlError>;

    fn market(&self, op: MarketOp) -> Result<(), ControlError>;

    fn dismiss_level_up(&self) -> Result<(), ControlError>;
}

/// Walking and pathfinding.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Returns once the actor stands inside `area`, or fails after a bounded
    /// number of attempts.
    async fn walk_to(&self, area: &Area) -> Result<(), NavigationError>;
}

/// Multi-page NPC dialogue.
#[async_trait]
pub trait Dialogue: Send + Sync {
    /// Continues through the open dialogue, picking `options` in order.
    /// An empty list continues a single page.
    async fn chat(&self, options: &[String]) -> Result<(), DialogueError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Defeated,
    Disengaged,
}

/// Runs a fight loop against one creature.
#[async_trait]
pub trait Combat: Send + Sync {
    /// Fights `target` with `prayers` activated in order, until it dies or the
    /// actor disengages.
    async fn kill(&self, target: EntityRef, prayers: &[Control])
    -> Result<CombatOutcome, CombatError>;
}

/// Resolves named spells and prayers to their controls.
pub trait Spellbook: Send + Sync {
    fn resolve(&self, name: &str) -> Result<Control, CatalogError>;
}

//! Async scripting substrate for tick-driven worlds.
//!
//! Scripts run as a single logical sequence against a host world that advances
//! once per tick. This crate turns short declarative calls ("obtain these
//! items", "kill this creature", "talk to this NPC") into entity queries, tick
//! waits and multi-step interface protocols.
//!
//! Modules are organized by responsibility:
//! - [`api`] defines the collaborator traits hosts implement and the error taxonomy
//! - [`context`] composes collaborators into a [`ScriptContext`]
//! - [`wait`] hosts [`SyncWait`], the only suspension point
//! - [`feed`] adapts a host-pushed snapshot stream into a tick clock
//! - [`session`] drives the bank and marketplace interfaces
//! - [`acquisition`] plans and executes item acquisition
//! - [`orchestrator`] provides equip/combat/dialogue/interaction helpers
//! - [`events`] provides a topic-based event bus for observers
//! - [`config`] loads world-specific constants
pub mod acquisition;
pub mod api;
pub mod config;
pub mod context;
pub mod events;
pub mod feed;
pub mod orchestrator;
pub mod session;
pub mod wait;

pub use acquisition::{AcquisitionReport, InventoryLedger};
pub use api::{
    BankOp, CatalogError, ClockError, Collaborator, Combat, CombatError, CombatOutcome, Control,
    ControlError, Controls, Dialogue, DialogueError, MarketOp, MatchMode, NavigationError,
    Navigator, Precondition, Result, ScriptError, SessionKind, SnapshotSource, Spellbook,
    TickClock, WaitError,
};
pub use config::{ConfigError, ScriptConfig};
pub use context::{ScriptContext, ScriptContextBuilder};
pub use events::{AcquisitionEvent, Event, EventBus, SessionEvent, Topic, WaitEvent};
pub use feed::{FeedPublisher, WorldFeed};
pub use orchestrator::Selector;
pub use session::{BankSession, MarketSession, SessionState};
pub use wait::SyncWait;

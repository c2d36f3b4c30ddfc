//! Public runtime API surface.
//!
//! Collaborator traits hosts implement, and the error types scripts handle.

pub mod collaborators;
pub mod errors;

pub use collaborators::{
    BankOp, Combat, CombatOutcome, Control, Controls, Dialogue, MarketOp, MatchMode, Navigator,
    SnapshotSource, Spellbook, TickClock,
};
pub use errors::{
    CatalogError, ClockError, Collaborator, CombatError, ControlError, DialogueError,
    NavigationError, Precondition, Result, ScriptError, SessionKind, WaitError,
};

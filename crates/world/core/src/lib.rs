//! Synchronous world model shared by scripts and hosts.
//!
//! `world-core` describes what a script can see on a single tick: the local
//! actor, nearby creatures and objects, ground items, carried/worn/banked
//! inventories and the modal interfaces that are open. It performs no I/O and
//! never waits; suspension and side effects live in `script-runtime`.
//!
//! Modules:
//! - [`model`]: value types (ids, positions, areas, verbs, entity variants)
//! - [`query`]: composable entity filters and reducers
//! - [`snapshot`]: the per-tick [`WorldSnapshot`]
//! - [`error`]: severity classification shared by all error enums
pub mod error;
pub mod model;
pub mod query;
pub mod snapshot;

pub use error::{ErrorSeverity, WorldError};
pub use model::{
    ActorRef, Amount, Area, BankedItem, CarriedItem, Creature, EntityId, EntityKind, EntityRef,
    EquipmentSlot, GroundItem, ItemId, ItemQuantity, Level, LocalActor, Position, Skill,
    SkillLevels, Tick, Verb, VerbError, WornItem, WorldObject,
};
pub use query::{EntityQuery, Positioned, QueryError, Queryable, Targeting};
pub use snapshot::{Interfaces, MAX_CARRIED_SLOTS, WorldSnapshot};

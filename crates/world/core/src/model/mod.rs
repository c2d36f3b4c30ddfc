//! Value types describing one tick of the world.
mod actor;
mod area;
mod common;
mod entity;
mod quantity;
mod verb;

pub use actor::{Level, LocalActor, Skill, SkillLevels};
pub use area::Area;
pub use common::{EntityId, ItemId, Position, Tick};
pub use entity::{
    ActorRef, BankedItem, CarriedItem, Creature, EntityKind, EntityRef, EquipmentSlot,
    GroundItem, WornItem, WorldObject,
};
pub use quantity::{Amount, ItemQuantity};
pub use verb::{Verb, VerbError};

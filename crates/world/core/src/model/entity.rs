//! Entity variants as seen in a single-tick snapshot.
//!
//! Every value here is a copy of host state valid only for the tick it was
//! read on. Interactions name their target through an [`EntityRef`], never
//! through a reference kept from an older snapshot.

use super::{EntityId, ItemId, Position, Verb};

/// Entity variant discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum EntityKind {
    #[strum(serialize = "creature")]
    Creature,
    #[strum(serialize = "carried item")]
    CarriedItem,
    #[strum(serialize = "worn item")]
    WornItem,
    #[strum(serialize = "ground item")]
    GroundItem,
    #[strum(serialize = "world object")]
    WorldObject,
    #[strum(serialize = "banked item")]
    BankedItem,
}

/// Identifies an actor (the local player or a creature) as a combat target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorRef {
    Player(EntityId),
    Creature(EntityId),
}

/// Addresses an interaction target by stable handle rather than by snapshot reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Creature(EntityId),
    Object(EntityId),
    GroundItem(EntityId),
    Carried { slot: u8 },
    Worn { slot: EquipmentSlot },
    Banked(ItemId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Creature(_) => EntityKind::Creature,
            EntityRef::Object(_) => EntityKind::WorldObject,
            EntityRef::GroundItem(_) => EntityKind::GroundItem,
            EntityRef::Carried { .. } => EntityKind::CarriedItem,
            EntityRef::Worn { .. } => EntityKind::WornItem,
            EntityRef::Banked(_) => EntityKind::BankedItem,
        }
    }
}

/// Equipment slots of the worn inventory.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipmentSlot {
    Head,
    Cape,
    Amulet,
    Weapon,
    Body,
    Shield,
    Legs,
    Gloves,
    Boots,
    Ring,
    Ammo,
}

/// A non-player character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Creature {
    pub handle: EntityId,
    /// Definition id shared by every creature of this type.
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub verbs: Vec<Verb>,
    pub target: Option<ActorRef>,
    pub animation: Option<u32>,
}

impl Creature {
    pub fn actor_ref(&self) -> ActorRef {
        ActorRef::Creature(self.handle)
    }
}

/// An item stack in the carried inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarriedItem {
    pub slot: u8,
    pub id: ItemId,
    pub name: String,
    pub quantity: u64,
    pub verbs: Vec<Verb>,
}

/// An item in an equipment slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WornItem {
    pub slot: EquipmentSlot,
    pub id: ItemId,
    pub name: String,
    pub quantity: u64,
    pub verbs: Vec<Verb>,
}

/// An item stack lying on a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundItem {
    pub handle: EntityId,
    pub id: ItemId,
    pub name: String,
    pub position: Position,
    pub quantity: u64,
    pub verbs: Vec<Verb>,
}

/// Scenery the actor can interact with (booths, chests, ladders, doors).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldObject {
    pub handle: EntityId,
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub verbs: Vec<Verb>,
}

/// A stack held in bank storage. Only visible while the bank interface is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankedItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: u64,
}

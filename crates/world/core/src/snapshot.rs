//! Read-only view of the world for one tick.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::model::{
    BankedItem, CarriedItem, Creature, GroundItem, LocalActor, Tick, WornItem, WorldObject,
};
use crate::query::EntityQuery;

/// Carried inventory capacity.
pub const MAX_CARRIED_SLOTS: usize = 28;

bitflags! {
    /// Modal interfaces currently open on the client.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Interfaces: u8 {
        const BANK        = 1 << 0;
        const MARKETPLACE = 1 << 1;
        const LEVEL_UP    = 1 << 2;
        const DIALOGUE    = 1 << 3;
    }
}

/// Everything a script may observe on one tick.
///
/// Banked items are only populated while [`Interfaces::BANK`] is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub actor: LocalActor,
    pub creatures: Vec<Creature>,
    pub objects: Vec<WorldObject>,
    pub ground_items: Vec<GroundItem>,
    pub carried: ArrayVec<CarriedItem, MAX_CARRIED_SLOTS>,
    pub worn: Vec<WornItem>,
    pub banked: Vec<BankedItem>,
    pub interfaces: Interfaces,
}

impl WorldSnapshot {
    pub fn creatures(&self) -> EntityQuery<'_, Creature> {
        EntityQuery::new(&self.creatures, self.actor.position)
    }

    pub fn objects(&self) -> EntityQuery<'_, WorldObject> {
        EntityQuery::new(&self.objects, self.actor.position)
    }

    pub fn ground_items(&self) -> EntityQuery<'_, GroundItem> {
        EntityQuery::new(&self.ground_items, self.actor.position)
    }

    pub fn carried(&self) -> EntityQuery<'_, CarriedItem> {
        EntityQuery::new(self.carried.as_slice(), self.actor.position)
    }

    pub fn worn(&self) -> EntityQuery<'_, WornItem> {
        EntityQuery::new(&self.worn, self.actor.position)
    }

    pub fn banked(&self) -> EntityQuery<'_, BankedItem> {
        EntityQuery::new(&self.banked, self.actor.position)
    }

    pub fn is_open(&self, interface: Interfaces) -> bool {
        self.interfaces.contains(interface)
    }

    pub fn free_slots(&self) -> usize {
        MAX_CARRIED_SLOTS - self.carried.len()
    }

    /// True while the actor is animating (skilling, attacking, eating).
    pub fn is_animating(&self) -> bool {
        self.actor.animation.is_some()
    }
}

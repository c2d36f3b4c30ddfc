//! Definitions the sandbox is seeded with.

use world_core::{EquipmentSlot, ItemId, Position, Verb};

/// Static description of an item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    /// Stackable items occupy one carried slot regardless of quantity.
    pub stackable: bool,
    pub slot: Option<EquipmentSlot>,
}

impl ItemDef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            stackable: false,
            slot: None,
        }
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    pub fn equips_to(mut self, slot: EquipmentSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub(crate) fn unknown(id: ItemId) -> Self {
        Self::new(id.0, format!("Item {}", id.0))
    }

    pub(crate) fn carried_verbs(&self) -> Vec<Verb> {
        let mut verbs = match self.slot {
            Some(EquipmentSlot::Weapon) => vec![Verb::Wield],
            Some(_) => vec![Verb::Wear],
            None => Vec::new(),
        };
        verbs.extend([Verb::Use, Verb::Drop]);
        verbs
    }
}

/// Marketplace offer for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    /// Unit price in the world currency.
    pub price: u64,
    pub stock: u64,
}

/// What a creature says when talked to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueScript {
    /// Options the player may pick. Picking any ends the conversation.
    pub options: Vec<String>,
    /// Pages continued without picking an option before it ends.
    pub pages: u32,
}

impl DialogueScript {
    pub fn pages(pages: u32) -> Self {
        Self {
            options: Vec::new(),
            pages,
        }
    }

    pub fn with_options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            pages: 1,
        }
    }
}

/// A creature to place in the sandbox.
#[derive(Debug, Clone)]
pub struct Npc {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) verbs: Vec<Verb>,
    /// Ticks of combat it survives.
    pub(crate) toughness: u32,
    pub(crate) dialogue: Option<DialogueScript>,
    pub(crate) aggressive: bool,
}

impl Npc {
    pub fn new(id: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            verbs: Vec::new(),
            toughness: 3,
            dialogue: None,
            aggressive: false,
        }
    }

    pub fn verb(mut self, verb: Verb) -> Self {
        if !self.verbs.contains(&verb) {
            self.verbs.push(verb);
        }
        self
    }

    pub fn attackable(self) -> Self {
        self.verb(Verb::Attack)
    }

    /// Targets the player as soon as it spawns.
    pub fn aggressive(mut self) -> Self {
        self.aggressive = true;
        self.attackable()
    }

    pub fn toughness(mut self, ticks: u32) -> Self {
        self.toughness = ticks.max(1);
        self
    }

    pub fn talks(mut self, script: DialogueScript) -> Self {
        self.dialogue = Some(script);
        self.verb(Verb::TalkTo)
    }
}

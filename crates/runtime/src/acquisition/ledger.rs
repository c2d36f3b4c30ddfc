//! Item counts across the three inventories of one snapshot.
//!
//! Carried, worn and banked stock are distinct views; an item is never assumed
//! to be in one because it is missing from another. Banked counts are only
//! meaningful while the bank interface is open.

use world_core::{ItemId, ItemQuantity, WorldSnapshot};

pub struct InventoryLedger<'a> {
    snapshot: &'a WorldSnapshot,
}

impl<'a> InventoryLedger<'a> {
    pub fn new(snapshot: &'a WorldSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn carried(&self, item: ItemId) -> u64 {
        self.snapshot.carried().with_id(item).quantity()
    }

    pub fn worn(&self, item: ItemId) -> u64 {
        self.snapshot.worn().with_id(item).quantity()
    }

    pub fn banked(&self, item: ItemId) -> u64 {
        self.snapshot.banked().with_id(item).quantity()
    }

    /// Ground-truth owned quantity: carried + worn + banked.
    pub fn owned(&self, item: ItemId) -> u64 {
        self.carried(item) + self.worn(item) + self.banked(item)
    }

    /// Every request is met by carried and worn stock combined.
    pub fn holds(&self, items: &[ItemQuantity]) -> bool {
        items
            .iter()
            .all(|i| self.carried(i.item) + self.worn(i.item) >= i.quantity)
    }

    /// Every request is met by carried stock alone.
    pub fn carried_holds(&self, items: &[ItemQuantity]) -> bool {
        items.iter().all(|i| self.carried(i.item) >= i.quantity)
    }

    /// `requested - banked - carried` for each item, keeping positive results.
    pub fn purchase_shortfalls(&self, items: &[ItemQuantity]) -> Vec<ItemQuantity> {
        shortfalls(items, |item| self.banked(item) + self.carried(item))
    }

    /// `requested - carried` for each item, keeping positive results.
    pub fn withdrawal_needs(&self, items: &[ItemQuantity]) -> Vec<ItemQuantity> {
        shortfalls(items, |item| self.carried(item))
    }
}

fn shortfalls(items: &[ItemQuantity], held: impl Fn(ItemId) -> u64) -> Vec<ItemQuantity> {
    items
        .iter()
        .map(|i| ItemQuantity::new(i.item, i.quantity.saturating_sub(held(i.item))))
        .filter(|i| i.quantity > 0)
        .collect()
}

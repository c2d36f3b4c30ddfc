use tracing::info;
use world_core::{Area, EquipmentSlot, ItemId, ItemQuantity, Verb};

use crate::api::Result;
use crate::context::ScriptContext;

impl ScriptContext {
    /// Obtains any of `ids` not already worn, then wears or wields them all.
    pub async fn equip(&self, ids: &[ItemId]) -> Result<()> {
        let missing: Vec<ItemQuantity> = {
            let snapshot = self.snapshot();
            ids.iter()
                .filter(|id| !snapshot.worn().with_id(**id).exists())
                .map(|id| ItemQuantity::new(*id, 1))
                .collect()
        };
        if missing.is_empty() {
            return Ok(());
        }
        self.obtain(&missing).await?;

        {
            let snapshot = self.snapshot();
            for request in &missing {
                let item = snapshot
                    .carried()
                    .with_id(request.item)
                    .matching("equippable", |i| i.verbs.iter().any(|v| v.is_equip()))
                    .first()?;
                let verb = equip_verb(&item.verbs);
                self.interact_with(item, verb)?;
            }
        }

        self.wait()
            .until("equipment worn", |s| {
                ids.iter().all(|id| s.worn().with_id(*id).exists())
            })
            .await?;
        Ok(())
    }

    /// Wears the carried item called `name`. A no-op if it is already worn.
    pub async fn equip_named(&self, name: &str) -> Result<()> {
        {
            let snapshot = self.snapshot();
            if snapshot.worn().with_name(name).exists() {
                return Ok(());
            }
            let item = snapshot
                .carried()
                .with_name(name)
                .matching("equippable", |i| i.verbs.iter().any(|v| v.is_equip()))
                .first()?;
            self.interact_with(item, equip_verb(&item.verbs))?;
        }

        self.wait()
            .until("item worn", |s| s.worn().with_name(name).exists())
            .await?;
        Ok(())
    }

    /// Removes the worn item called `name` from `slot`, if it is worn.
    pub async fn unequip(&self, name: &str, slot: EquipmentSlot) -> Result<()> {
        if !self.snapshot().worn().with_name(name).exists() {
            return Ok(());
        }
        info!(name, %slot, "unequip");
        self.controls().unequip(slot)?;
        self.wait().tick().await?;
        Ok(())
    }

    /// Whether an item called `name` is carried or worn.
    pub fn has_item(&self, name: &str) -> bool {
        let snapshot = self.snapshot();
        snapshot.carried().with_name(name).exists() || snapshot.worn().with_name(name).exists()
    }

    /// Whether at least `quantity` units called `name` are carried.
    pub fn has_item_count(&self, name: &str, quantity: u64) -> bool {
        self.snapshot().carried().with_name(name).quantity() >= quantity
    }

    pub fn item_on_ground(&self, name: &str) -> bool {
        self.snapshot().ground_items().with_name(name).exists()
    }

    /// Picks up the nearest ground item called `name`, walking to `area` first
    /// when given, and waits for it to be carried.
    pub async fn take(&self, area: Option<&Area>, name: &str) -> Result<()> {
        if let Some(area) = area {
            self.navigator().walk_to(area).await?;
        }

        self.wait()
            .until("ground item", |s| s.ground_items().with_name(name).exists())
            .await?;

        let before = {
            let snapshot = self.snapshot();
            let item = snapshot
                .ground_items()
                .with_name(name)
                .with_verb(Verb::Take)
                .nearest()?;
            self.interact_with(item, Verb::Take)?;
            snapshot.carried().with_name(name).quantity()
        };

        self.wait()
            .until("item taken", |s| {
                s.carried().with_name(name).quantity() > before
            })
            .await?;
        Ok(())
    }

    /// Waits until an item called `name` is carried.
    pub async fn wait_item(&self, name: &str) -> Result<()> {
        self.wait()
            .until("item carried", |s| s.carried().with_name(name).exists())
            .await?;
        Ok(())
    }
}

fn equip_verb(verbs: &[Verb]) -> Verb {
    verbs
        .iter()
        .copied()
        .find(|v| v.is_equip())
        .unwrap_or(Verb::Wear)
}

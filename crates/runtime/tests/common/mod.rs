#![allow(dead_code)]

use std::sync::Arc;

use script_runtime::{ScriptConfig, ScriptContext};
use world_core::{Area, EquipmentSlot, ItemId, Position};
use world_sandbox::{ItemDef, Sandbox, SandboxBuilder};

pub const COINS: ItemId = ItemId(995);
pub const BRONZE_ARROW: ItemId = ItemId(882);
pub const BRONZE_SWORD: ItemId = ItemId(1277);

/// Where every scenario starts. Inside the test marketplace.
pub const START: Position = Position::new(5, 5);

/// Default configuration with a marketplace around [`START`] and no bank
/// locations, so nothing walks unless a scenario asks for it.
pub fn config() -> ScriptConfig {
    let mut config = ScriptConfig::default();
    config.marketplace.area = Area::rectangle(0, 0, 20, 20);
    config.bank.locations.clear();
    config
}

/// A sandbox with the common item definitions and a banker next to the actor.
pub fn world() -> SandboxBuilder {
    Sandbox::builder()
        .at(START)
        .item(ItemDef::new(882, "Bronze arrow").stackable())
        .item(ItemDef::new(1277, "Bronze sword").equips_to(EquipmentSlot::Weapon))
        .banker("Banker", Position::new(6, 5))
}

pub fn context(sandbox: &Arc<Sandbox>) -> ScriptContext {
    context_with(sandbox, config())
}

pub fn context_with(sandbox: &Arc<Sandbox>, config: ScriptConfig) -> ScriptContext {
    ScriptContext::builder()
        .config(config)
        .host(Arc::clone(sandbox))
        .build()
        .expect("sandbox provides every collaborator")
}

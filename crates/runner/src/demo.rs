//! A small Lumbridge world and the supply-run script played in it.

use anyhow::{Context, Result};
use script_runtime::{Control, ScriptConfig, ScriptContext};
use tracing::info;
use world_core::{Area, EquipmentSlot, ItemId, ItemQuantity, Position};
use world_sandbox::{DialogueScript, ItemDef, Npc, Pacing, Sandbox, SandboxBuilder};

const BRONZE_SWORD: ItemId = ItemId(1277);
const LOBSTER: ItemId = ItemId(379);

const LUMBRIDGE: Position = Position::new(3222, 3218);
const HOME_TELEPORT: Control = Control {
    interface: 218,
    child: 7,
};
const PROTECT_FROM_MELEE: Control = Control {
    interface: 541,
    child: 23,
};

fn castle_courtyard() -> Area {
    Area::rectangle(3215, 3210, 3230, 3225)
}

fn goblin_field() -> Area {
    Area::rectangle(3240, 3240, 3260, 3255)
}

/// Seeds bankers in every configured bank and a clerk in the marketplace, so
/// the world matches whatever configuration the script runs with.
pub fn world(config: &ScriptConfig, pacing: Pacing) -> std::sync::Arc<Sandbox> {
    let banker = config
        .bank
        .bankers
        .first()
        .cloned()
        .unwrap_or_else(|| "Banker".to_owned());

    let mut builder: SandboxBuilder = Sandbox::builder()
        .pacing(pacing)
        .named("Questbot")
        .at(LUMBRIDGE)
        .currency(ItemDef::new(config.marketplace.currency.0, "Coins"))
        .item(ItemDef::new(1277, "Bronze sword").equips_to(EquipmentSlot::Weapon))
        .item(ItemDef::new(379, "Lobster"))
        .banked(config.marketplace.currency, 5_000)
        .banked(BRONZE_SWORD, 1)
        .clerk(&config.marketplace.clerk, config.marketplace.area.anchor())
        .listing(BRONZE_SWORD, 30, 100)
        .listing(LOBSTER, 150, 1_000)
        .creature(
            Npc::new(3077, "Hans", Position::new(3221, 3219))
                .talks(DialogueScript::with_options(["Who are you?"])),
        )
        .creature(Npc::new(3029, "Goblin", Position::new(3250, 3248)).attackable())
        .creature(
            Npc::new(3029, "Goblin", Position::new(3252, 3246))
                .attackable()
                .toughness(5),
        )
        .spell(&config.magic.home_teleport, HOME_TELEPORT)
        .teleport(&config.magic.home_teleport, HOME_TELEPORT, LUMBRIDGE)
        .spell("Protect from Melee", PROTECT_FROM_MELEE);

    for area in &config.bank.locations {
        builder = builder.banker(banker.clone(), area.anchor());
    }
    builder.build()
}

/// Equips a sword, stocks up on food and money, greets Hans, fights a goblin
/// and teleports home.
pub async fn supply_run(ctx: &ScriptContext) -> Result<()> {
    ctx.equip(&[BRONZE_SWORD])
        .await
        .context("equipping a weapon")?;

    let currency = ctx.config().marketplace.currency;
    let report = ctx
        .obtain(&[
            ItemQuantity::new(currency, 500),
            ItemQuantity::new(LOBSTER, 5),
        ])
        .await
        .context("stocking supplies")?;
    info!(
        purchases = report.purchases.len(),
        withdrawals = report.withdrawals.len(),
        deposited = report.deposited,
        "supplies ready"
    );

    ctx.chat_npc(&castle_courtyard(), "Hans".into(), &["Who are you?"])
        .await
        .context("talking to Hans")?;

    ctx.navigator()
        .walk_to(&goblin_field())
        .await
        .context("walking to the goblins")?;
    let outcome = ctx
        .kill_npc("Goblin".into(), &["Protect from Melee"])
        .await
        .context("fighting a goblin")?;
    info!(?outcome, "fight over");

    if ctx.handle_level_up().await? {
        info!("level up dismissed");
    }
    if ctx.needs_stat_restore() {
        info!("stats drained, restoring at home");
    }

    ctx.teleport_home().await.context("teleporting home")?;
    info!(position = %ctx.snapshot().actor.position, "supply run complete");
    Ok(())
}

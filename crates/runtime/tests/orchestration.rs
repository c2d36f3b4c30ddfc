mod common;

use std::sync::Arc;

use script_runtime::{
    Collaborator, CombatOutcome, Control, DialogueError, ScriptContext, ScriptError, Selector,
};
use world_core::{Area, EntityRef, EquipmentSlot, Interfaces, Level, Position, Skill, Verb};
use world_sandbox::{Action, DialogueScript, Npc};

use common::{BRONZE_ARROW, BRONZE_SWORD, COINS, START, config, context, world};

const PROTECT_FROM_MELEE: Control = Control {
    interface: 541,
    child: 23,
};

fn here() -> Area {
    Area::rectangle(0, 0, 10, 10)
}

// ============================================================================
// Combat
// ============================================================================

/// Two goblins of the same type: the far one is already attacking us. By id,
/// the attacker wins over the closer idle one.
#[tokio::test]
async fn kill_by_id_prefers_the_attacker() {
    let sandbox = world()
        .creature(Npc::new(3029, "Goblin", Position::new(6, 5)).attackable())
        .creature(Npc::new(3029, "Goblin", Position::new(15, 15)).aggressive())
        .build();
    let ctx = context(&sandbox);

    let outcome = ctx
        .kill_npc(Selector::Id(3029), &[])
        .await
        .expect("fight");
    assert_eq!(outcome, CombatOutcome::Defeated);

    let snapshot = ctx.snapshot();
    let survivors = snapshot.creatures().with_id(3029u32);
    assert_eq!(survivors.count(), 1);
    assert_eq!(
        survivors.first().map(|g| g.position),
        Ok(Position::new(6, 5))
    );
}

#[tokio::test]
async fn kill_by_name_takes_the_nearest() {
    let sandbox = world()
        .creature(Npc::new(3029, "Goblin", Position::new(6, 5)).attackable())
        .creature(Npc::new(3029, "Goblin", Position::new(15, 15)).aggressive())
        .build();
    let ctx = context(&sandbox);

    ctx.kill_npc("Goblin".into(), &[]).await.expect("fight");

    let snapshot = ctx.snapshot();
    assert_eq!(
        snapshot.creatures().with_name("Goblin").first().map(|g| g.position),
        Ok(Position::new(15, 15))
    );
}

#[tokio::test]
async fn prayers_are_resolved_before_the_fight() {
    let sandbox = world()
        .spell("Protect from Melee", PROTECT_FROM_MELEE)
        .creature(Npc::new(3029, "Goblin", Position::new(6, 5)).attackable())
        .build();
    let ctx = context(&sandbox);

    ctx.kill_npc("Goblin".into(), &["Protect from Melee"])
        .await
        .expect("fight");
    assert!(sandbox.actions().iter().any(|a| matches!(
        a,
        Action::Kill { prayers, .. } if prayers == &[PROTECT_FROM_MELEE]
    )));

    let err = ctx
        .kill_npc("Goblin".into(), &["Smite"])
        .await
        .expect_err("unknown prayer");
    assert!(matches!(err, ScriptError::Catalog(_)));
}

#[tokio::test]
async fn combat_needs_a_combat_collaborator() {
    let sandbox = world()
        .creature(Npc::new(3029, "Goblin", Position::new(6, 5)).attackable())
        .build();
    let ctx = ScriptContext::builder()
        .config(config())
        .snapshots(Arc::clone(&sandbox) as _)
        .clock(Arc::clone(&sandbox) as _)
        .controls(Arc::clone(&sandbox) as _)
        .navigator(Arc::clone(&sandbox) as _)
        .build()
        .expect("core collaborators present");

    let err = ctx
        .kill_npc("Goblin".into(), &[])
        .await
        .expect_err("no combat host");
    assert!(matches!(
        err,
        ScriptError::MissingCollaborator(Collaborator::Combat)
    ));
}

#[tokio::test]
async fn combat_state_queries() {
    let sandbox = world()
        .level(Skill::Attack, Level::new(40, 35))
        .creature(Npc::new(3029, "Goblin", Position::new(6, 5)).aggressive())
        .build();
    let ctx = context(&sandbox);

    assert!(ctx.in_combat());
    assert!(ctx.needs_stat_restore());
}

// ============================================================================
// Items
// ============================================================================

#[tokio::test]
async fn equip_fetches_from_the_bank_then_wields() {
    let sandbox = world().banked(BRONZE_SWORD, 1).build();
    let ctx = context(&sandbox);

    ctx.equip(&[BRONZE_SWORD]).await.expect("equip");

    assert_eq!(
        sandbox.with_world(|w| w.worn_item(EquipmentSlot::Weapon)),
        Some(BRONZE_SWORD)
    );
    assert!(sandbox.actions().iter().any(|a| matches!(
        a,
        Action::Interact {
            verb: Verb::Wield,
            ..
        }
    )));
    assert!(ctx.has_item("Bronze sword"));

    let sent = sandbox.actions().len();
    ctx.equip(&[BRONZE_SWORD]).await.expect("already worn");
    assert_eq!(sandbox.actions().len(), sent);
}

#[tokio::test]
async fn equip_named_and_unequip() {
    let sandbox = world().carrying(BRONZE_SWORD, 1).build();
    let ctx = context(&sandbox);

    ctx.equip_named("Bronze sword").await.expect("wield");
    assert!(ctx.snapshot().worn().with_name("Bronze sword").exists());

    ctx.unequip("Bronze sword", EquipmentSlot::Weapon)
        .await
        .expect("remove");
    assert!(ctx.snapshot().carried().with_name("Bronze sword").exists());
}

#[tokio::test]
async fn take_picks_up_the_nearest_stack() {
    let sandbox = world()
        .ground_item(BRONZE_ARROW, 20, Position::new(7, 5))
        .build();
    let ctx = context(&sandbox);
    assert!(ctx.item_on_ground("Bronze arrow"));

    ctx.take(None, "Bronze arrow").await.expect("take");

    assert!(ctx.has_item_count("Bronze arrow", 20));
    assert!(!ctx.item_on_ground("Bronze arrow"));
}

// ============================================================================
// Dialogue
// ============================================================================

#[tokio::test]
async fn chat_npc_answers_in_order() {
    let sandbox = world()
        .creature(
            Npc::new(3077, "Hans", Position::new(6, 6))
                .talks(DialogueScript::with_options(["Who are you?"])),
        )
        .build();
    let ctx = context(&sandbox);

    ctx.chat_npc(&here(), "Hans".into(), &["Who are you?"])
        .await
        .expect("conversation");

    let actions = sandbox.actions();
    assert!(actions.iter().any(|a| matches!(
        a,
        Action::Interact {
            target: EntityRef::Creature(_),
            verb: Verb::TalkTo
        }
    )));
    assert!(actions.contains(&Action::Chat(vec!["Who are you?".to_owned()])));
    assert!(!ctx.snapshot().is_open(Interfaces::DIALOGUE));
}

#[tokio::test]
async fn missing_dialogue_option_propagates() {
    let sandbox = world()
        .creature(
            Npc::new(3077, "Hans", Position::new(6, 6))
                .talks(DialogueScript::with_options(["Who are you?"])),
        )
        .build();
    let ctx = context(&sandbox);

    let err = ctx
        .chat_npc(&here(), "Hans".into(), &["Can I have a castle?"])
        .await
        .expect_err("not offered");
    assert!(matches!(
        err,
        ScriptError::Dialogue(DialogueError::OptionMissing(_))
    ));
}

#[tokio::test]
async fn level_up_is_dismissed_and_dialogue_resumed() {
    let sandbox = world()
        .schedule(1, |w| w.level_up(Skill::Attack))
        .build();
    let ctx = context(&sandbox);

    assert!(!ctx.handle_level_up().await.expect("nothing showing"));
    ctx.wait().tick().await.expect("tick");
    assert!(ctx.snapshot().is_open(Interfaces::LEVEL_UP));

    assert!(ctx.handle_level_up().await.expect("level-up"));
    let snapshot = ctx.snapshot();
    assert!(!snapshot.is_open(Interfaces::LEVEL_UP));
    assert!(!snapshot.is_open(Interfaces::DIALOGUE));
    assert_eq!(snapshot.actor.levels.base(Skill::Attack), 2);
}

// ============================================================================
// Interaction and magic
// ============================================================================

#[tokio::test]
async fn interact_object_validates_the_verb() {
    let sandbox = world()
        .object(1530, "Door", Position::new(5, 6), vec![Verb::Open])
        .build();
    let ctx = context(&sandbox);

    ctx.interact_object(&here(), "Door".into(), Verb::Open)
        .await
        .expect("open door");
    assert!(matches!(
        sandbox.actions().last(),
        Some(Action::Interact {
            target: EntityRef::Object(_),
            verb: Verb::Open
        })
    ));

    let err = ctx
        .interact_object(&here(), "Door".into(), Verb::Attack)
        .await
        .expect_err("doors cannot be attacked");
    assert!(matches!(err, ScriptError::Verb(_)));
}

#[tokio::test]
async fn use_item_on_object_sends_both_refs() {
    let sandbox = world()
        .carrying(COINS, 1)
        .object(6, "Fountain", Position::new(6, 6), vec![Verb::Use])
        .build();
    let ctx = context(&sandbox);

    ctx.use_item_on_object(&here(), "Coins".into(), "Fountain")
        .await
        .expect("use coins on fountain");
    assert!(matches!(
        sandbox.actions().last(),
        Some(Action::UseOn {
            item: EntityRef::Carried { slot: 0 },
            target: EntityRef::Object(_)
        })
    ));
}

#[tokio::test]
async fn teleport_home_moves_the_actor() {
    let lumbridge = Position::new(3222, 3218);
    let sandbox = world()
        .teleport(
            "Lumbridge Home Teleport",
            Control {
                interface: 218,
                child: 7,
            },
            lumbridge,
        )
        .build();
    let ctx = context(&sandbox);
    assert_eq!(ctx.snapshot().actor.position, START);

    ctx.teleport_home().await.expect("teleport");
    assert_eq!(ctx.snapshot().actor.position, lumbridge);
}

#[tokio::test]
async fn cast_on_npc_targets_the_creature() {
    let confuse = Control {
        interface: 218,
        child: 10,
    };
    let sandbox = world()
        .spell("Confuse", confuse)
        .creature(Npc::new(3029, "Goblin", Position::new(6, 5)))
        .build();
    let ctx = context(&sandbox);

    ctx.cast_spell_on_npc("Goblin", "Confuse")
        .await
        .expect("cast");
    assert!(matches!(
        sandbox.actions().last(),
        Some(Action::CastOn { spell, target: EntityRef::Creature(_) }) if *spell == confuse
    ));
}

#[tokio::test]
async fn wait_animation_end_sees_start_and_stop() {
    let sandbox = world()
        .schedule(2, |w| w.actor.animation = Some(808))
        .schedule(4, |w| w.actor.animation = None)
        .build();
    let ctx = context(&sandbox);

    ctx.wait_animation_end(808).await.expect("animation");
    assert_eq!(ctx.snapshot().tick.0, 4);
}

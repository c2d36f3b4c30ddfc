use tracing::info;
use world_core::{EntityRef, Queryable, Verb};

use super::Selector;
use crate::api::{CombatOutcome, Control, Result};
use crate::context::ScriptContext;

impl ScriptContext {
    /// Waits for an attackable creature matching `npc` and fights the nearest.
    ///
    /// When selecting by id, a creature already targeting the actor is
    /// preferred over a closer idle one.
    pub async fn kill_npc(&self, npc: Selector, prayers: &[&str]) -> Result<CombatOutcome> {
        let prayers = self.resolve_prayers(prayers)?;

        self.wait()
            .until("attackable creature", |s| {
                npc.narrow(s.creatures()).with_verb(Verb::Attack).exists()
            })
            .await?;

        let target = {
            let snapshot = self.snapshot();
            let me = snapshot.actor.actor_ref();
            let attacking_me = match npc {
                Selector::Id(_) => npc
                    .narrow(snapshot.creatures())
                    .with_verb(Verb::Attack)
                    .with_target(me)
                    .nearest()
                    .ok(),
                Selector::Name(_) => None,
            };
            let creature = match attacking_me {
                Some(creature) => creature,
                None => npc
                    .narrow(snapshot.creatures())
                    .with_verb(Verb::Attack)
                    .nearest()?,
            };
            info!(target = ?creature.handle, name = %creature.name, "engaging");
            creature.entity_ref()
        };

        self.fight(target, &prayers).await
    }

    /// Fights an already located creature.
    pub async fn kill(&self, target: EntityRef, prayers: &[&str]) -> Result<CombatOutcome> {
        let prayers = self.resolve_prayers(prayers)?;
        self.fight(target, &prayers).await
    }

    async fn fight(&self, target: EntityRef, prayers: &[Control]) -> Result<CombatOutcome> {
        let outcome = self.combat()?.kill(target, prayers).await?;
        info!(?target, ?outcome, "combat finished");
        Ok(outcome)
    }

    fn resolve_prayers(&self, prayers: &[&str]) -> Result<Vec<Control>> {
        if prayers.is_empty() {
            return Ok(Vec::new());
        }
        let spellbook = self.spellbook()?;
        prayers
            .iter()
            .map(|name| spellbook.resolve(name).map_err(Into::into))
            .collect()
    }

    /// Whether a creature is targeting the actor or the actor has a target.
    pub fn in_combat(&self) -> bool {
        let snapshot = self.snapshot();
        snapshot.actor.target.is_some()
            || snapshot
                .creatures()
                .with_target(snapshot.actor.actor_ref())
                .exists()
    }

    /// Whether any configured combat skill is drained below its base level.
    pub fn needs_stat_restore(&self) -> bool {
        let snapshot = self.snapshot();
        self.config()
            .combat
            .restore_skills
            .iter()
            .any(|skill| snapshot.actor.levels.get(*skill).is_drained())
    }
}

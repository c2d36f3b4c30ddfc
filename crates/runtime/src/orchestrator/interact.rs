use tracing::info;
use world_core::{Area, Queryable, Verb};

use super::Selector;
use crate::api::Result;
use crate::context::ScriptContext;

impl ScriptContext {
    /// Walks to `area` and issues `verb` on the nearest matching object offering it.
    pub async fn interact_object(&self, area: &Area, object: Selector, verb: Verb) -> Result<()> {
        Verb::for_kind(world_core::EntityKind::WorldObject, verb)?;
        self.navigator().walk_to(area).await?;

        let snapshot = self.snapshot();
        let target = object
            .narrow(snapshot.objects())
            .with_verb(verb)
            .nearest()?;
        self.interact_with(target, verb)
    }

    /// Walks to `area` and issues `verb` on the nearest matching creature offering it.
    pub async fn interact_npc(&self, area: &Area, npc: Selector, verb: Verb) -> Result<()> {
        Verb::for_kind(world_core::EntityKind::Creature, verb)?;
        self.navigator().walk_to(area).await?;

        let snapshot = self.snapshot();
        let target = npc
            .narrow(snapshot.creatures())
            .with_verb(verb)
            .nearest()?;
        self.interact_with(target, verb)
    }

    /// Issues `verb` on the first carried item called `name`.
    pub fn interact_item(&self, name: &str, verb: Verb) -> Result<()> {
        let snapshot = self.snapshot();
        let item = snapshot.carried().with_name(name).first()?;
        self.interact_with(item, verb)
    }

    /// Uses one carried item on another.
    pub fn use_item_on_item(&self, item: Selector, other: &str) -> Result<()> {
        let snapshot = self.snapshot();
        let source = item.narrow(snapshot.carried()).first()?;
        let target = snapshot.carried().with_name(other).first()?;
        self.use_on(source, target)
    }

    /// Walks to `area` and uses a carried item on the nearest object called `object`.
    pub async fn use_item_on_object(&self, area: &Area, item: Selector, object: &str) -> Result<()> {
        self.navigator().walk_to(area).await?;

        let snapshot = self.snapshot();
        let source = item.narrow(snapshot.carried()).first()?;
        let target = snapshot.objects().with_name(object).nearest()?;
        self.use_on(source, target)
    }

    /// Uses a carried item on the nearest creature called `npc`.
    pub fn use_item_on_npc(&self, item: &str, npc: &str) -> Result<()> {
        let snapshot = self.snapshot();
        let source = snapshot.carried().with_name(item).first()?;
        let target = snapshot.creatures().with_name(npc).nearest()?;
        self.use_on(source, target)
    }

    fn use_on<S: Queryable, T: Queryable>(&self, source: &S, target: &T) -> Result<()> {
        info!(item = source.name(), target = target.name(), "use item");
        self.controls()
            .use_on(source.entity_ref(), target.entity_ref())?;
        Ok(())
    }

    /// Waits until a creature called `name` is visible.
    pub async fn wait_npc(&self, name: &str) -> Result<()> {
        self.wait()
            .until("creature visible", |s| s.creatures().with_name(name).exists())
            .await?;
        Ok(())
    }

    /// Waits for the actor to start animation `id`, then to go idle.
    pub async fn wait_animation_end(&self, id: u32) -> Result<()> {
        self.wait()
            .until("animation start", |s| s.actor.animation == Some(id))
            .await?;
        self.wait()
            .until("animation end", |s| s.actor.animation.is_none())
            .await?;
        Ok(())
    }
}

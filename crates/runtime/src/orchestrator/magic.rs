use tracing::info;
use world_core::Queryable;

use crate::api::Result;
use crate::context::ScriptContext;

impl ScriptContext {
    /// Casts the configured home teleport.
    pub async fn teleport_home(&self) -> Result<()> {
        let spell = &self.config().magic.home_teleport;
        let control = self.spellbook()?.resolve(spell)?;
        info!(spell = %spell, "teleporting home");
        self.controls().activate(control)?;
        self.wait().tick().await?;
        Ok(())
    }

    /// Casts `spell` on the nearest creature called `npc`.
    pub async fn cast_spell_on_npc(&self, npc: &str, spell: &str) -> Result<()> {
        let control = self.spellbook()?.resolve(spell)?;
        {
            let snapshot = self.snapshot();
            let target = snapshot.creatures().with_name(npc).nearest()?;
            info!(spell, target = npc, "cast on creature");
            self.controls().cast_on(control, target.entity_ref())?;
        }
        self.wait().tick().await?;
        Ok(())
    }

    /// Casts `spell` on the first carried item called `item`.
    pub async fn cast_spell_on_item(&self, item: &str, spell: &str) -> Result<()> {
        let control = self.spellbook()?.resolve(spell)?;
        {
            let snapshot = self.snapshot();
            let target = snapshot.carried().with_name(item).first()?;
            info!(spell, target = item, "cast on item");
            self.controls().cast_on(control, target.entity_ref())?;
        }
        self.wait().tick().await?;
        Ok(())
    }
}

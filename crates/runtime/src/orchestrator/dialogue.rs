use tracing::{debug, info};
use world_core::{Area, Interfaces, Verb};

use super::Selector;
use crate::api::Result;
use crate::context::ScriptContext;

impl ScriptContext {
    /// Walks to `area`, talks to the nearest matching creature and answers its
    /// dialogue with `options` in order.
    pub async fn chat_npc(&self, area: &Area, npc: Selector, options: &[&str]) -> Result<()> {
        self.navigator().walk_to(area).await?;

        {
            let snapshot = self.snapshot();
            let target = npc
                .narrow(snapshot.creatures())
                .with_verb(Verb::TalkTo)
                .nearest()?;
            self.interact_with(target, Verb::TalkTo)?;
        }

        self.chat(options).await?;
        self.wait().tick().await?;
        Ok(())
    }

    /// Continues the open dialogue, picking `options` in order.
    pub async fn chat(&self, options: &[&str]) -> Result<()> {
        let options: Vec<String> = options.iter().map(|o| (*o).to_owned()).collect();
        debug!(?options, "chat");
        self.dialogue()?.chat(&options).await?;
        Ok(())
    }

    /// Continues through `pages` dialogue pages without choosing options.
    pub async fn chat_times(&self, pages: usize) -> Result<()> {
        for _ in 0..pages {
            self.chat(&[]).await?;
        }
        Ok(())
    }

    /// Dismisses a level-up message if one is showing and resumes the dialogue.
    ///
    /// Returns whether a level-up was handled.
    pub async fn handle_level_up(&self) -> Result<bool> {
        if !self.snapshot().is_open(Interfaces::LEVEL_UP) {
            return Ok(false);
        }
        info!("closing level-up dialogue");
        self.controls().dismiss_level_up()?;
        self.wait().tick().await?;
        self.chat(&[]).await?;
        Ok(true)
    }
}

//! Capability composition for scripts.
//!
//! A [`ScriptContext`] bundles the host collaborators a script needs together
//! with its configuration, wait primitive and event bus. Scripts receive one
//! explicitly; test doubles implement only the traits they exercise.

use std::sync::Arc;

use world_core::{Verb, WorldSnapshot};

use crate::api::{
    Collaborator, Combat, Controls, Dialogue, Navigator, Result, ScriptError, SnapshotSource,
    Spellbook, TickClock,
};
use crate::config::ScriptConfig;
use crate::events::EventBus;
use crate::feed::WorldFeed;
use crate::wait::SyncWait;

pub struct ScriptContext {
    snapshots: Arc<dyn SnapshotSource>,
    controls: Arc<dyn Controls>,
    navigator: Arc<dyn Navigator>,
    dialogue: Option<Arc<dyn Dialogue>>,
    combat: Option<Arc<dyn Combat>>,
    spellbook: Option<Arc<dyn Spellbook>>,
    wait: SyncWait,
    config: Arc<ScriptConfig>,
    events: EventBus,
}

impl ScriptContext {
    pub fn builder() -> ScriptContextBuilder {
        ScriptContextBuilder::new()
    }

    /// Snapshot of the latest published tick. Never cache it across a wait.
    pub fn snapshot(&self) -> Arc<WorldSnapshot> {
        self.snapshots.snapshot()
    }

    pub fn wait(&self) -> &SyncWait {
        &self.wait
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn controls(&self) -> &dyn Controls {
        self.controls.as_ref()
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub fn dialogue(&self) -> Result<&dyn Dialogue> {
        self.dialogue
            .as_deref()
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Dialogue))
    }

    pub fn combat(&self) -> Result<&dyn Combat> {
        self.combat
            .as_deref()
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Combat))
    }

    pub fn spellbook(&self) -> Result<&dyn Spellbook> {
        self.spellbook
            .as_deref()
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Spellbook))
    }

    /// Sends `verb` to `entity` after checking the verb suits its kind.
    pub fn interact_with<E: world_core::Queryable>(&self, entity: &E, verb: Verb) -> Result<()> {
        let verb = Verb::for_kind(E::KIND, verb)?;
        let target = entity.entity_ref();
        tracing::info!(?target, name = entity.name(), %verb, "interact");
        self.controls.interact(target, verb)?;
        Ok(())
    }
}

/// Builder for [`ScriptContext`].
///
/// Snapshots, clock, controls and navigator are required. Dialogue, combat and
/// spellbook are optional; helpers that need a missing one fail with
/// [`ScriptError::MissingCollaborator`] when called.
pub struct ScriptContextBuilder {
    config: ScriptConfig,
    snapshots: Option<Arc<dyn SnapshotSource>>,
    clock: Option<Arc<dyn TickClock>>,
    controls: Option<Arc<dyn Controls>>,
    navigator: Option<Arc<dyn Navigator>>,
    dialogue: Option<Arc<dyn Dialogue>>,
    combat: Option<Arc<dyn Combat>>,
    spellbook: Option<Arc<dyn Spellbook>>,
    events: Option<EventBus>,
}

impl ScriptContextBuilder {
    fn new() -> Self {
        Self {
            config: ScriptConfig::default(),
            snapshots: None,
            clock: None,
            controls: None,
            navigator: None,
            dialogue: None,
            combat: None,
            spellbook: None,
            events: None,
        }
    }

    /// Override script configuration
    pub fn config(mut self, config: ScriptConfig) -> Self {
        self.config = config;
        self
    }

    pub fn snapshots(mut self, snapshots: Arc<dyn SnapshotSource>) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn TickClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Uses a host feed as both snapshot source and clock.
    pub fn feed(self, feed: WorldFeed) -> Self {
        let feed = Arc::new(feed);
        self.snapshots(feed.clone()).clock(feed)
    }

    pub fn controls(mut self, controls: Arc<dyn Controls>) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn dialogue(mut self, dialogue: Arc<dyn Dialogue>) -> Self {
        self.dialogue = Some(dialogue);
        self
    }

    pub fn combat(mut self, combat: Arc<dyn Combat>) -> Self {
        self.combat = Some(combat);
        self
    }

    pub fn spellbook(mut self, spellbook: Arc<dyn Spellbook>) -> Self {
        self.spellbook = Some(spellbook);
        self
    }

    /// Shares an existing event bus instead of creating one from the config.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Wires a single host object that implements every collaborator.
    pub fn host<H>(self, host: Arc<H>) -> Self
    where
        H: SnapshotSource
            + TickClock
            + Controls
            + Navigator
            + Dialogue
            + Combat
            + Spellbook
            + 'static,
    {
        self.snapshots(host.clone())
            .clock(host.clone())
            .controls(host.clone())
            .navigator(host.clone())
            .dialogue(host.clone())
            .combat(host.clone())
            .spellbook(host)
    }

    pub fn build(self) -> Result<ScriptContext> {
        let snapshots = self
            .snapshots
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Snapshots))?;
        let clock = self
            .clock
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Clock))?;
        let controls = self
            .controls
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Controls))?;
        let navigator = self
            .navigator
            .ok_or(ScriptError::MissingCollaborator(Collaborator::Navigator))?;

        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.events.capacity));
        let wait = SyncWait::new(
            snapshots.clone(),
            clock,
            self.config.waits.default_ticks,
            events.clone(),
        );

        Ok(ScriptContext {
            snapshots,
            controls,
            navigator,
            dialogue: self.dialogue,
            combat: self.combat,
            spellbook: self.spellbook,
            wait,
            config: Arc::new(self.config),
            events,
        })
    }
}

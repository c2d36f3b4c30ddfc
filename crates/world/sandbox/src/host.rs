//! Collaborator implementations over a [`SandboxWorld`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use script_runtime::feed::{self, FeedPublisher};
use script_runtime::{
    BankOp, CatalogError, ClockError, Combat, CombatError, CombatOutcome, Control, ControlError,
    Controls, Dialogue, DialogueError, MarketOp, NavigationError, Navigator, SnapshotSource,
    Spellbook, TickClock, WorldFeed,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use world_core::{Area, EntityRef, EquipmentSlot, Tick, Verb, WorldSnapshot};

use crate::action::Action;
use crate::builder::SandboxBuilder;
use crate::world::{CombatStatus, SandboxWorld};

/// Ticks a walk may take before the navigator gives up.
const WALK_ATTEMPTS: u32 = 3;

/// Ticks the dialogue host waits for a talk-to to open a conversation.
const DIALOGUE_OPEN_TICKS: u32 = 3;

/// Who advances the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// The world steps whenever a waiter asks for a tick past the current one.
    #[default]
    OnDemand,
    /// An external ticker steps the world; waiters only observe.
    Ticker,
}

/// Deterministic in-memory host implementing every runtime collaborator.
pub struct Sandbox {
    world: Mutex<SandboxWorld>,
    publisher: FeedPublisher,
    feed: WorldFeed,
    pacing: Pacing,
    disconnected: AtomicBool,
}

impl Sandbox {
    pub fn builder() -> SandboxBuilder {
        SandboxBuilder::new()
    }

    pub(crate) fn new(world: SandboxWorld, pacing: Pacing) -> Self {
        let (publisher, feed) = feed::channel(world.snapshot());
        Self {
            world: Mutex::new(world),
            publisher,
            feed,
            pacing,
            disconnected: AtomicBool::new(false),
        }
    }

    /// Feed of published snapshots, usable as snapshot source and clock.
    pub fn feed(&self) -> WorldFeed {
        self.feed.clone()
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Runs `f` against the live world. Changes become visible on the next tick.
    pub fn with_world<R>(&self, f: impl FnOnce(&mut SandboxWorld) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of every request received so far.
    pub fn actions(&self) -> Vec<Action> {
        self.lock().actions().to_vec()
    }

    /// Advances the world one tick and publishes the result.
    pub fn step(&self) -> Tick {
        let mut world = self.lock();
        let snapshot = world.step();
        let tick = snapshot.tick;
        self.publisher.publish(snapshot);
        tick
    }

    /// Makes every subsequent control call fail with [`ControlError::Disconnected`].
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }

    /// Steps the world every `period` until the returned task is aborted.
    pub fn spawn_ticker(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let sandbox = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let tick = sandbox.step();
                debug!(%tick, "sandbox tick");
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, SandboxWorld> {
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, action: Action) -> Result<(), ControlError> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(ControlError::Disconnected);
        }
        self.lock().enqueue(action);
        Ok(())
    }

    async fn next_tick(&self) -> Tick {
        let now = self.feed.current();
        // The publisher lives as long as `self`, so the feed cannot close here.
        self.advanced(now).await.unwrap_or(now)
    }
}

impl SnapshotSource for Sandbox {
    fn snapshot(&self) -> Arc<WorldSnapshot> {
        self.feed.snapshot()
    }
}

#[async_trait]
impl TickClock for Sandbox {
    fn current(&self) -> Tick {
        self.feed.current()
    }

    async fn advanced(&self, since: Tick) -> Result<Tick, ClockError> {
        if self.pacing == Pacing::OnDemand && self.feed.current() <= since {
            self.step();
        }
        self.feed.advanced(since).await
    }
}

impl Controls for Sandbox {
    fn interact(&self, target: EntityRef, verb: Verb) -> Result<(), ControlError> {
        self.send(Action::Interact { target, verb })
    }

    fn use_on(&self, item: EntityRef, target: EntityRef) -> Result<(), ControlError> {
        self.send(Action::UseOn { item, target })
    }

    fn cast_on(&self, spell: Control, target: EntityRef) -> Result<(), ControlError> {
        self.send(Action::CastOn { spell, target })
    }

    fn activate(&self, control: Control) -> Result<(), ControlError> {
        self.send(Action::Activate(control))
    }

    fn unequip(&self, slot: EquipmentSlot) -> Result<(), ControlError> {
        self.send(Action::Unequip(slot))
    }

    fn bank(&self, op: BankOp) -> Result<(), ControlError> {
        self.send(Action::Bank(op))
    }

    fn market(&self, op: MarketOp) -> Result<(), ControlError> {
        self.send(Action::Market(op))
    }

    fn dismiss_level_up(&self) -> Result<(), ControlError> {
        self.send(Action::DismissLevelUp)
    }
}

#[async_trait]
impl Navigator for Sandbox {
    async fn walk_to(&self, area: &Area) -> Result<(), NavigationError> {
        let blocked = self.lock().unreachable.contains(area);
        if blocked {
            return Err(NavigationError::Unreachable {
                area: area.to_string(),
            });
        }
        if area.contains(self.snapshot().actor.position) {
            return Ok(());
        }

        info!(%area, "walking");
        self.lock().enqueue(Action::WalkTo(area.clone()));
        for _ in 0..WALK_ATTEMPTS {
            self.next_tick().await;
            if area.contains(self.snapshot().actor.position) {
                return Ok(());
            }
        }
        Err(NavigationError::AttemptsExhausted {
            area: area.to_string(),
            attempts: WALK_ATTEMPTS,
        })
    }
}

#[async_trait]
impl Dialogue for Sandbox {
    async fn chat(&self, options: &[String]) -> Result<(), DialogueError> {
        self.lock().record(Action::Chat(options.to_vec()));

        for _ in 0..DIALOGUE_OPEN_TICKS {
            let open = self.lock().dialogue_open();
            if open {
                break;
            }
            self.next_tick().await;
        }
        let open = self.lock().dialogue_open();
        if !open {
            return Err(DialogueError::NotOpen);
        }

        if options.is_empty() {
            self.lock().continue_dialogue();
        } else {
            for option in options {
                let offered = self.lock().choose(option);
                if !offered {
                    return Err(DialogueError::OptionMissing(option.clone()));
                }
                debug!(option = %option, "dialogue option");
                self.next_tick().await;
            }
            self.lock().end_dialogue();
        }
        self.next_tick().await;
        Ok(())
    }
}

#[async_trait]
impl Combat for Sandbox {
    async fn kill(
        &self,
        target: EntityRef,
        prayers: &[Control],
    ) -> Result<CombatOutcome, CombatError> {
        let EntityRef::Creature(handle) = target else {
            return Err(CombatError::TargetLost);
        };
        let present = self.lock().has_creature(handle);
        if !present {
            return Err(CombatError::TargetLost);
        }

        self.lock().enqueue(Action::Kill {
            target,
            prayers: prayers.to_vec(),
        });
        loop {
            self.next_tick().await;
            let status = self.lock().combat_status(handle);
            match status {
                CombatStatus::Fighting => continue,
                CombatStatus::Defeated => return Ok(CombatOutcome::Defeated),
                CombatStatus::Disengaged => return Ok(CombatOutcome::Disengaged),
                CombatStatus::Gone => return Err(CombatError::TargetLost),
            }
        }
    }
}

impl Spellbook for Sandbox {
    fn resolve(&self, name: &str) -> Result<Control, CatalogError> {
        self.lock()
            .spells
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::Unknown(name.to_owned()))
    }
}

//! Tick-synchronised waiting.
//!
//! [`SyncWait`] is the only suspension point of the runtime. Each wait
//! subscribes to tick advances and evaluates its condition exactly once per
//! advance against the snapshot published for that tick:
//!
//! ```text
//! Waiting ──condition true──▶ Satisfied(tick)
//!    │
//!    └──max_ticks evaluations, all false──▶ TimedOut
//! ```
//!
//! Nothing is retried automatically; callers decide what a timeout means.
use std::sync::Arc;

use tracing::{debug, trace, warn};
use world_core::{Tick, WorldSnapshot};

use crate::api::{SnapshotSource, TickClock, WaitError};
use crate::events::{Event, EventBus, WaitEvent};

#[derive(Clone)]
pub struct SyncWait {
    snapshots: Arc<dyn SnapshotSource>,
    clock: Arc<dyn TickClock>,
    default_ticks: u32,
    events: EventBus,
}

impl SyncWait {
    pub fn new(
        snapshots: Arc<dyn SnapshotSource>,
        clock: Arc<dyn TickClock>,
        default_ticks: u32,
        events: EventBus,
    ) -> Self {
        Self {
            snapshots,
            clock,
            default_ticks,
            events,
        }
    }

    pub fn default_ticks(&self) -> u32 {
        self.default_ticks
    }

    /// Waits with the default tick budget.
    pub async fn until<F>(&self, label: &str, condition: F) -> Result<Tick, WaitError>
    where
        F: FnMut(&WorldSnapshot) -> bool + Send,
    {
        self.until_within(label, self.default_ticks, condition).await
    }

    /// Waits for `condition` to hold on a fresh snapshot, evaluating it at most
    /// `max_ticks` times.
    ///
    /// Returns the tick on which the condition was first observed to hold.
    ///
    /// # Errors
    ///
    /// [`WaitError::TimedOut`] after exactly `max_ticks` unsuccessful
    /// evaluations; [`WaitError::Clock`] if the world stops ticking.
    pub async fn until_within<F>(
        &self,
        label: &str,
        max_ticks: u32,
        mut condition: F,
    ) -> Result<Tick, WaitError>
    where
        F: FnMut(&WorldSnapshot) -> bool + Send,
    {
        let mut tick = self.clock.current();
        for evaluation in 1..=max_ticks {
            tick = self.clock.advanced(tick).await?;
            let snapshot = self.snapshots.snapshot();
            if condition(&snapshot) {
                debug!(label, %tick, evaluation, "wait satisfied");
                return Ok(tick);
            }
            trace!(label, %tick, evaluation, "wait pending");
        }

        warn!(label, max_ticks, %tick, "wait timed out");
        self.events.publish(Event::WaitTimedOut(WaitEvent {
            label: label.to_owned(),
            ticks: max_ticks,
            tick,
        }));
        Err(WaitError::TimedOut {
            label: label.to_owned(),
            ticks: max_ticks,
        })
    }

    /// Waits for exactly one tick to pass.
    pub async fn tick(&self) -> Result<Tick, WaitError> {
        let now = self.clock.current();
        Ok(self.clock.advanced(now).await?)
    }
}

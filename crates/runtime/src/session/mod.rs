//! Sessions over transient, UI-backed world resources.
//!
//! ```text
//! Closed ──open()──▶ Opening ──interface visible──▶ Open ──close()──▶ Closed
//!                       │
//!                       └──timeout / precondition──▶ error (caller retries)
//! ```
//!
//! A session handle is created per logical operation and never persisted. The
//! world allows one interface of a kind at a time; handles only mirror it.
mod bank;
mod market;

pub use bank::BankSession;
pub use market::MarketSession;

use tracing::debug;
use world_core::Tick;

use crate::api::SessionKind;
use crate::events::{Event, EventBus, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
}

/// Lifecycle bookkeeping shared by both session kinds.
#[derive(Debug)]
struct Lifecycle {
    kind: SessionKind,
    state: SessionState,
}

impl Lifecycle {
    fn new(kind: SessionKind, state: SessionState) -> Self {
        Self { kind, state }
    }

    fn transition(&mut self, next: SessionState, events: &EventBus, tick: Tick) {
        if self.state == next {
            return;
        }
        debug!(session = %self.kind, from = ?self.state, to = ?next, %tick, "session transition");
        self.state = next;
        match next {
            SessionState::Open => events.publish(Event::Session(SessionEvent::Opened {
                session: self.kind,
                tick,
            })),
            SessionState::Closed => events.publish(Event::Session(SessionEvent::Closed {
                session: self.kind,
                tick,
            })),
            SessionState::Opening => {}
        }
    }
}

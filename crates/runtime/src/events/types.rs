//! Event types for different topics.

use serde::{Deserialize, Serialize};
use world_core::{Amount, ItemId, Tick};

use crate::api::SessionKind;

/// Session lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Opened { session: SessionKind, tick: Tick },
    Closed { session: SessionKind, tick: Tick },
}

/// Real-world side effects issued while acquiring items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionEvent {
    Purchased { item: ItemId, quantity: u64, tick: Tick },
    Withdrawn { item: ItemId, amount: Amount, tick: Tick },
    Deposited { tick: Tick },
}

/// Waits that exhausted their tick budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitEvent {
    pub label: String,
    pub ticks: u32,
    /// Tick of the last evaluation.
    pub tick: Tick,
}

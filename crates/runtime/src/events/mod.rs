//! Topic-based event bus for script runtime events.
//!
//! Sessions, acquisitions and waits publish here on a best-effort basis; a
//! host UI or a test subscribes only to the topics it needs.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AcquisitionEvent, SessionEvent, WaitEvent};

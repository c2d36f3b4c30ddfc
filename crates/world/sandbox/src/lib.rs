//! In-memory world host for script development and tests.
//!
//! A [`Sandbox`] owns a small simulated world (actor, creatures, objects,
//! carried/worn/banked items, a bank and a marketplace) and implements every
//! collaborator trait of `script-runtime`, so one `Arc<Sandbox>` can back a
//! whole [`ScriptContext`](script_runtime::ScriptContext).
//!
//! Control requests are recorded as [`Action`]s and applied on the following
//! tick. With [`Pacing::OnDemand`] the world only advances when a script waits,
//! which makes every run reproducible; [`Pacing::Ticker`] steps it on a timer
//! instead.
mod action;
mod builder;
mod entities;
mod host;
mod world;

pub use action::Action;
pub use builder::SandboxBuilder;
pub use entities::{DialogueScript, ItemDef, Listing, Npc};
pub use host::{Pacing, Sandbox};
pub use world::SandboxWorld;

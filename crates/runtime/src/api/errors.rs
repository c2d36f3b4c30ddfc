//! Unified error types surfaced by the script runtime.
//!
//! Collaborator failures are wrapped into [`ScriptError`] so scripts can bubble
//! them up with `?` and still tell a missing entity apart from a timeout or an
//! unmet acquisition.
use std::fmt;

use thiserror::Error;
use world_core::{ErrorSeverity, ItemId, QueryError, VerbError, WorldError};

pub use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, ScriptError>;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// A reducer found no entity where one was required.
    #[error(transparent)]
    NotFound(#[from] QueryError),

    #[error("timed out after {ticks} ticks waiting for {label}")]
    Timeout { label: String, ticks: u32 },

    #[error("insufficient {item}: requested {requested}, holding {held}")]
    InsufficientResources {
        item: ItemId,
        requested: u64,
        held: u64,
    },

    #[error("precondition violated: {0}")]
    PreconditionViolation(Precondition),

    #[error(transparent)]
    Verb(#[from] VerbError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Control(#[from] ControlError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("script context requires a {0} collaborator")]
    MissingCollaborator(Collaborator),
}

impl From<WaitError> for ScriptError {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::TimedOut { label, ticks } => ScriptError::Timeout { label, ticks },
            WaitError::Clock(err) => ScriptError::Clock(err),
        }
    }
}

impl WorldError for ScriptError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScriptError::NotFound(err) => err.severity(),
            ScriptError::Timeout { .. } => ErrorSeverity::Recoverable,
            ScriptError::InsufficientResources { .. } => ErrorSeverity::Recoverable,
            ScriptError::PreconditionViolation(_) => ErrorSeverity::Validation,
            ScriptError::Verb(err) => err.severity(),
            ScriptError::Clock(err) => err.severity(),
            ScriptError::Control(err) => err.severity(),
            ScriptError::Navigation(err) => err.severity(),
            ScriptError::Dialogue(err) => err.severity(),
            ScriptError::Combat(err) => err.severity(),
            ScriptError::Catalog(err) => err.severity(),
            ScriptError::MissingCollaborator(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScriptError::NotFound(err) => err.error_code(),
            ScriptError::Timeout { .. } => "SCRIPT_TIMEOUT",
            ScriptError::InsufficientResources { .. } => "SCRIPT_INSUFFICIENT_RESOURCES",
            ScriptError::PreconditionViolation(_) => "SCRIPT_PRECONDITION_VIOLATION",
            ScriptError::Verb(err) => err.error_code(),
            ScriptError::Clock(err) => err.error_code(),
            ScriptError::Control(err) => err.error_code(),
            ScriptError::Navigation(err) => err.error_code(),
            ScriptError::Dialogue(err) => err.error_code(),
            ScriptError::Combat(err) => err.error_code(),
            ScriptError::Catalog(err) => err.error_code(),
            ScriptError::MissingCollaborator(_) => "SCRIPT_MISSING_COLLABORATOR",
        }
    }
}

/// Preconditions checked before an interaction is sent to the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// No banker, booth or chest is visible from the actor's position.
    NoBankAccess,
    /// The configured marketplace clerk is not visible.
    NoMarketClerk { clerk: String },
    /// An operation was attempted on a session that is not open.
    SessionNotOpen { session: SessionKind },
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::NoBankAccess => write!(f, "no banker, bank booth or bank chest nearby"),
            Precondition::NoMarketClerk { clerk } => write!(f, "no '{clerk}' nearby"),
            Precondition::SessionNotOpen { session } => write!(f, "{session} session is not open"),
        }
    }
}

/// Transient UI-backed resources a session can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, serde::Serialize, serde::Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum SessionKind {
    Bank,
    Marketplace,
}

/// Capabilities a [`ScriptContext`](crate::ScriptContext) is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collaborator {
    Snapshots,
    Clock,
    Controls,
    Navigator,
    Dialogue,
    Combat,
    Spellbook,
}

/// Failures of [`SyncWait`](crate::SyncWait).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("timed out after {ticks} ticks waiting for {label}")]
    TimedOut { label: String, ticks: u32 },

    #[error(transparent)]
    Clock(#[from] ClockError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The host stopped publishing ticks.
    #[error("world tick feed closed")]
    Closed,
}

impl WorldError for ClockError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "CLOCK_CLOSED"
    }
}

/// Rejections from the host control surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("host connection lost")]
    Disconnected,

    #[error("host rejected {action}: {reason}")]
    Rejected { action: String, reason: String },
}

impl WorldError for ControlError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ControlError::Disconnected => ErrorSeverity::Fatal,
            ControlError::Rejected { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ControlError::Disconnected => "CONTROL_DISCONNECTED",
            ControlError::Rejected { .. } => "CONTROL_REJECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no path to {area}")]
    Unreachable { area: String },

    #[error("gave up walking to {area} after {attempts} attempts")]
    AttemptsExhausted { area: String, attempts: u32 },
}

impl WorldError for NavigationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            NavigationError::Unreachable { .. } => ErrorSeverity::Validation,
            NavigationError::AttemptsExhausted { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            NavigationError::Unreachable { .. } => "NAVIGATION_UNREACHABLE",
            NavigationError::AttemptsExhausted { .. } => "NAVIGATION_EXHAUSTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    #[error("no dialogue is open")]
    NotOpen,

    #[error("dialogue option '{0}' not offered")]
    OptionMissing(String),
}

impl WorldError for DialogueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DialogueError::NotOpen => ErrorSeverity::Recoverable,
            DialogueError::OptionMissing(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DialogueError::NotOpen => "DIALOGUE_NOT_OPEN",
            DialogueError::OptionMissing(_) => "DIALOGUE_OPTION_MISSING",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("combat target disappeared")]
    TargetLost,

    #[error("actor died during combat")]
    ActorDied,
}

impl WorldError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::TargetLost => ErrorSeverity::Recoverable,
            CombatError::ActorDied => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::TargetLost => "COMBAT_TARGET_LOST",
            CombatError::ActorDied => "COMBAT_ACTOR_DIED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown spell or prayer '{0}'")]
    Unknown(String),
}

impl WorldError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "CATALOG_UNKNOWN"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_errors_map_onto_the_script_taxonomy() {
        let err: ScriptError = WaitError::TimedOut {
            label: "bank open".into(),
            ticks: 10,
        }
        .into();
        assert!(matches!(err, ScriptError::Timeout { ticks: 10, .. }));
        assert_eq!(err.error_code(), "SCRIPT_TIMEOUT");
        assert!(err.severity().is_recoverable());

        let err: ScriptError = WaitError::Clock(ClockError::Closed).into();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn precondition_messages_name_the_missing_access_point() {
        let err = ScriptError::PreconditionViolation(Precondition::NoBankAccess);
        assert_eq!(
            err.to_string(),
            "precondition violated: no banker, bank booth or bank chest nearby"
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}

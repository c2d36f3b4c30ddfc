use crate::error::{ErrorSeverity, WorldError};
use crate::model::EntityKind;

/// Reducer failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The filtered candidate set was empty.
    #[error("no {kind} matches {criteria}")]
    NotFound { kind: EntityKind, criteria: String },
}

impl QueryError {
    pub fn kind(&self) -> EntityKind {
        match self {
            QueryError::NotFound { kind, .. } => *kind,
        }
    }
}

impl WorldError for QueryError {
    fn severity(&self) -> ErrorSeverity {
        // The entity may spawn or walk into view on a later tick.
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            QueryError::NotFound { .. } => "QUERY_NOT_FOUND",
        }
    }
}

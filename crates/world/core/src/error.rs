//! Common error infrastructure shared by every crate in the workspace.
//!
//! Domain-specific errors (e.g. [`QueryError`](crate::query::QueryError),
//! [`VerbError`](crate::model::VerbError)) live next to the code that raises
//! them and classify themselves through [`WorldError`].

/// Severity level of an error, used by scripts to decide between retrying and aborting.
///
/// - **Recoverable**: the world may change on a later tick (entity not spawned yet, wait timed out)
/// - **Validation**: the request itself is wrong and retrying unchanged cannot help
/// - **Internal**: the host and the script disagree about world state
/// - **Fatal**: the host connection is gone; the script cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if retrying on a later tick may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a host or script bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform classification for every error enum in the workspace.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by recoverability, not by impact
/// - Error codes are stable SCREAMING_SNAKE_CASE identifiers for logs and tests
pub trait WorldError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }
}

//! Error types for the proof kernel.

use std::fmt;

/// Unified error type for all kernel operations.
///
/// Derivation/type errors have no variant here on purpose: an ill-typed
/// composition is rejected by the compiler and never becomes a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BhkError {
    /// A rule name was looked up that the registry does not contain
    UnknownRule { rule: String },
    /// A rule table declares the same rule name twice
    DuplicateRule { rule: String },
    /// A rule's declared dependency resolves to no registry entry
    UnresolvedDependency { rule: String, dependency: String },
    /// A rule table declares a cyclic dependency chain
    DependencyCycle { rule: String },
    /// A rule table contains no entries
    EmptyRegistry,
    /// A smoke instantiation did not behave as its signature claims
    SmokeFailure { rule: String, reason: String },
    /// Unknown rule status
    UnknownStatus { value: String },
    /// Serialization error
    Serialization { message: String },
}

impl fmt::Display for BhkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRule { rule } => {
                write!(f, "rule '{}' is not registered", rule)
            }
            Self::DuplicateRule { rule } => {
                write!(f, "rule '{}' is registered more than once", rule)
            }
            Self::UnresolvedDependency { rule, dependency } => {
                write!(
                    f,
                    "rule '{}' depends on '{}', which is not registered",
                    rule, dependency
                )
            }
            Self::DependencyCycle { rule } => {
                write!(f, "rule '{}' participates in a dependency cycle", rule)
            }
            Self::EmptyRegistry => {
                write!(f, "rule table contains no entries")
            }
            Self::SmokeFailure { rule, reason } => {
                write!(f, "smoke check failed for '{}': {}", rule, reason)
            }
            Self::UnknownStatus { value } => {
                write!(f, "unknown rule status: '{}'", value)
            }
            Self::Serialization { message } => {
                write!(f, "serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for BhkError {}

/// Result type alias for kernel operations.
pub type BhkResult<T> = Result<T, BhkError>;

impl From<serde_json::Error> for BhkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization { message: e.to_string() }
    }
}

//! Error types for tensorlore.

use thiserror::Error;

/// Result alias for build-management operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while resolving model build targets.
///
/// Persistence failures are not represented here: `save_model` and
/// `load_model` return the model's own error type unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The target name was empty.
    #[error("target name must not be empty")]
    EmptyName,

    /// Both an explicit module and caller-relative resolution were requested.
    #[error("target `{name}` requests both an explicit module and caller-relative resolution")]
    AmbiguousScope { name: String },

    /// No module path could be derived from the caller's source location.
    #[error("caller location unavailable: no module path can be derived from `{location}`")]
    CallerLocationUnavailable { location: String },
}

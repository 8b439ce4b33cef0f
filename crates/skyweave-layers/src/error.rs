//! Error types for layer management.

use std::fmt;

/// Errors returned by [`LayerManager`](crate::LayerManager).
///
/// The layer core itself never fails: operations issued before a renderer is
/// registered are logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerError {
    /// No layer is registered under this preference id.
    UnknownLayer {
        /// The preference id that was looked up.
        preference_id: String,
    },

    /// A layer with the same preference id was already added.
    DuplicateLayer {
        /// The conflicting preference id.
        preference_id: String,
    },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerError::UnknownLayer { preference_id } => {
                write!(f, "No layer with preference id '{}'", preference_id)
            }
            LayerError::DuplicateLayer { preference_id } => {
                write!(f, "Layer '{}' is already registered", preference_id)
            }
        }
    }
}

impl std::error::Error for LayerError {}

/// Result type for layer management operations.
pub type LayerResult<T> = Result<T, LayerError>;

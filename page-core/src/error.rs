//! Error types for page operations.

use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur in page operations.
///
/// Registry misses and malformed props are deliberately absent: rendering
/// treats both as "use the default" or "render nothing".
#[derive(Debug, Error)]
pub enum PageError {
    /// Component instance not found in the session.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Attempted to create a component whose type is not registered.
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    /// A type key was registered twice.
    #[error("Component type already registered: {0}")]
    DuplicateComponentType(String),

    /// A save was requested while another one is still pending.
    #[error("A save is already in progress")]
    SaveInProgress,

    /// The persistence collaborator rejected the save.
    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// The persistence collaborator could not supply the page.
    #[error("Load failed: {0}")]
    LoadFailed(String),

    /// Page serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

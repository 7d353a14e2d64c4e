//! Error types for plugin discovery.

use thiserror::Error;

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors that can occur during plugin discovery and instantiation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No module is registered for an import path.
    #[error("No module registered for import path '{0}'")]
    UnresolvedImport(String),

    /// A module initializer failed.
    #[error("Failed to initialize module '{module}': {reason}")]
    Init { module: String, reason: String },

    /// A plugin constructor failed.
    #[error("Failed to construct plugin '{class}': {reason}")]
    Construction { class: String, reason: String },

    /// A module callable failed or does not exist.
    #[error("Plugin call failed: {0}")]
    Execution(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

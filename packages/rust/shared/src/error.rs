//! Error types for figmacopy.
//!
//! Library crates use [`FigmaCopyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all figmacopy operations.
///
/// Every variant is fatal: the pipeline aborts on the first error and
/// emits no partial report.
#[derive(Debug, thiserror::Error)]
pub enum FigmaCopyError {
    /// The source URL does not look like a Figma file/design link.
    #[error("invalid Figma URL format: {url}")]
    InvalidUrlFormat { url: String },

    /// The URL parsed but carries no `node-id` query parameter.
    #[error("node ID is required in the Figma URL")]
    MissingNodeId,

    /// The access token environment variable is unset or empty.
    #[error("{var} environment variable is not set")]
    MissingCredential { var: String },

    /// The Figma API answered with a non-success status.
    #[error("failed to fetch Figma file: {status}")]
    RemoteFetchFailure { status: String },

    /// The response does not contain the requested node.
    #[error("node {node_id} not found in Figma response (available: {})", available.join(", "))]
    NodeNotFound {
        node_id: String,
        available: Vec<String>,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level error (connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The project build step failed.
    #[error("build error: {0}")]
    Build(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FigmaCopyError>;

impl FigmaCopyError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

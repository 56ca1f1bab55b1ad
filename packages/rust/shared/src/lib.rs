//! Shared types, error model, and configuration for figmacopy.
//!
//! This crate is the foundation depended on by all other figmacopy crates.
//! It provides:
//! - [`FigmaCopyError`] — the unified error type
//! - Design tree types ([`DesignNode`], [`NodeType`], [`NodesResponse`], [`FigmaRef`])
//! - Configuration ([`AppConfig`], [`FigmaConfig`], config loading, token resolution)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, ExtractConfig, FigmaConfig, TicketDefaults, config_dir,
    config_file_path, init_config, load_config, load_config_from, resolve_token,
};
pub use error::{FigmaCopyError, Result};
pub use types::{DesignNode, FigmaRef, NodeEntry, NodeType, NodesResponse};

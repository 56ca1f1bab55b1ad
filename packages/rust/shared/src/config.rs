//! Application configuration for figmacopy.
//!
//! User config lives at `~/.figmacopy/figmacopy.toml`.
//! CLI flags override config file values, which override defaults.
//! The Figma token itself is never stored here; only the name of the
//! environment variable that holds it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FigmaCopyError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "figmacopy.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".figmacopy";

// ---------------------------------------------------------------------------
// Config structs (matching figmacopy.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Figma API settings.
    #[serde(default)]
    pub figma: FigmaConfig,

    /// Tree extraction limits.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Build check used by `express`.
    #[serde(default)]
    pub build: BuildConfig,

    /// Ticket draft defaults.
    #[serde(default)]
    pub ticket: TicketDefaults,
}

/// `[figma]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigmaConfig {
    /// Base URL of the Figma REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Name of the env var holding the access token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.figma.com".into()
}
fn default_token_env() -> String {
    "FIGMA_ACCESS_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[extract]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Deepest node level the tree walk will descend into.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    512
}

/// `[build]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Shell command that rebuilds the project.
    #[serde(default = "default_build_command")]
    pub command: String,

    /// Directory whose mtime marks the latest source change.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory whose mtime marks the latest build output.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_build_command(),
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_build_command() -> String {
    "npm run build".into()
}
fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// `[ticket]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDefaults {
    /// Product area used in the ticket title when none is given.
    #[serde(default = "default_area")]
    pub default_area: String,

    /// Whether the draft asks for UX review.
    #[serde(default = "default_true")]
    pub requires_ux_review: bool,

    /// Whether the draft asks for translation.
    #[serde(default)]
    pub requires_translation: bool,

    /// Extra acceptance criteria appended to every draft, one per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_requirements: Option<String>,
}

impl Default for TicketDefaults {
    fn default() -> Self {
        Self {
            default_area: default_area(),
            requires_ux_review: true,
            requires_translation: false,
            custom_requirements: None,
        }
    }
}

fn default_area() -> String {
    "UPP".into()
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.figmacopy/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FigmaCopyError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.figmacopy/figmacopy.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FigmaCopyError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        FigmaCopyError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| FigmaCopyError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| FigmaCopyError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| FigmaCopyError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the Figma access token from the env var named in the config.
///
/// Called once at startup; the token is then passed explicitly to the
/// API client.
pub fn resolve_token(config: &AppConfig) -> Result<String> {
    let var = &config.figma.token_env;
    match std::env::var(var) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(FigmaCopyError::MissingCredential { var: var.clone() }),
    }
}

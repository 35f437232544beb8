//! Memcheck Configuration
//!
//! Loads `memory-config.json` and resolves the store paths. The paths are
//! resolved once, up front, and passed explicitly to the store loader --
//! nothing below `main` consults a well-known filesystem location on its
//! own, so tests can point the validator at fixture directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::types::MemoryConfig;

/// Default store location when neither the CLI nor the config says otherwise.
pub const DEFAULT_MEMORY_DIR: &str = "~/.claude/memory";

/// Config file name within the store directory.
pub const CONFIG_FILENAME: &str = "memory-config.json";

/// Fully resolved input locations for one validation run.
#[derive(Clone, Debug)]
pub struct Paths {
    /// Store base directory (contains `MEMORY.md` and `projects/`).
    pub memory_dir: PathBuf,
    /// Location of `memory-config.json`.
    pub config_path: PathBuf,
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's home
/// directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> PathBuf {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest)
    } else {
        PathBuf::from(p)
    }
}

/// Load and parse the config file.
///
/// Returns `Ok(None)` if the file does not exist; a file that exists but
/// does not parse is an error (the config-shape check reports the same
/// condition as a violation).
pub fn load_config(config_path: &Path) -> Result<Option<MemoryConfig>> {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "config file not found");
        return Ok(None);
    }

    let contents = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: MemoryConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    Ok(Some(config))
}

/// Resolve the store paths from optional CLI overrides and the config.
///
/// Precedence for the store directory: `--memory-path` flag, then the
/// config's `memory_path`, then [`DEFAULT_MEMORY_DIR`]. The config file
/// itself defaults to `<base>/memory-config.json` where `<base>` is the
/// flag value or the default directory (matching the historical fixed
/// location when no flags are given).
pub fn resolve_paths(
    memory_path_flag: Option<&str>,
    config_flag: Option<&str>,
) -> (Paths, Option<MemoryConfig>) {
    let base_guess = memory_path_flag.unwrap_or(DEFAULT_MEMORY_DIR);

    let config_path = match config_flag {
        Some(p) => resolve_path(p),
        None => resolve_path(base_guess).join(CONFIG_FILENAME),
    };

    // An unreadable config is surfaced later by the config-shape check;
    // path resolution just falls back to defaults.
    let config = load_config(&config_path).ok().flatten();

    let memory_dir = match memory_path_flag {
        Some(p) => resolve_path(p),
        None => match config.as_ref().and_then(|c| c.memory_path.as_deref()) {
            Some(p) => resolve_path(p),
            None => resolve_path(DEFAULT_MEMORY_DIR),
        },
    };

    debug!(
        memory_dir = %memory_dir.display(),
        config_path = %config_path.display(),
        "resolved store paths"
    );

    (
        Paths {
            memory_dir,
            config_path,
        },
        config,
    )
}

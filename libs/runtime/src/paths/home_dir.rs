//! Home directory resolution.
//!
//! The server keeps its database and log files under one home directory.
//! Unless configured explicitly it lives under the user's platform home:
//! the roaming config dir (`%APPDATA%`) on Windows, the home dir elsewhere.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Resolve the server home directory to an absolute path.
///
/// * `configured`: value from config; `~` and `~/...` are expanded, relative
///   paths are resolved against the current working directory.
/// * `default_subdir`: used under the platform home when nothing is configured.
/// * `create`: create the directory (and parents) when missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => platform_home()?.join(default_subdir),
    };

    let path = if path.is_absolute() {
        path
    } else {
        env::current_dir()
            .context("cannot read current directory")?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home_dir {}", path.display()))?;
    }

    Ok(path)
}

fn platform_home() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = dirs::config_dir();
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir();

    base.context("cannot determine the user's home directory; configure server.home_dir")
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().context("cannot expand '~': the user's home directory is unknown")
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}

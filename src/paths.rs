//! Where Newsroom keeps its files
//!
//! One directory, `.config/newsroom` under the home directory, holds both the
//! TOML settings (`config.toml`) and the encrypted bearer token
//! (`session.enc`). The same layout is used on every OS.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.enc";

/// Data directory for `home`, created if missing
pub fn newsroom_dir_in(home: &Path) -> Result<PathBuf> {
    let dir = home.join(".config").join("newsroom");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Data directory for the current user
pub fn newsroom_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    newsroom_dir_in(&home)
}

/// Settings file read by [`crate::Config::load`]
pub fn config_path() -> Result<PathBuf> {
    Ok(newsroom_dir()?.join(CONFIG_FILE))
}

/// Token file behind [`crate::Session::open_default`]
pub fn session_path() -> Result<PathBuf> {
    Ok(newsroom_dir()?.join(SESSION_FILE))
}

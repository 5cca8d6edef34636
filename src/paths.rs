//! XDG-style path utilities for the configuration directory.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations
//! so the config file lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for csvtl.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/csvtl` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/csvtl` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join("csvtl"));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join("csvtl"))
}

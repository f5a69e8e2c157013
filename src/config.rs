use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that can be loaded from config files and merged with the CLI.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub nav: bool,
    pub no_nav: bool,
    pub no_motion: bool,
}

impl ConfigFlags {
    pub const fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            nav: self.nav || other.nav,
            no_nav: self.no_nav || other.no_nav,
            no_motion: self.no_motion || other.no_motion,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("onepager").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("onepager")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("onepager").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("onepager")
                .join("config");
        }
    }

    PathBuf::from(".onepagerrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".onepagerrc")
}

/// Load flags from a config file; a missing file yields defaults.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Persist flags so they apply on every launch.
///
/// # Errors
///
/// Returns an error if the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# onepager defaults (saved with --save)".to_string());
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.nav {
        lines.push("--nav".to_string());
    }
    if flags.no_nav {
        lines.push("--no-nav".to_string());
    }
    if flags.no_motion {
        lines.push("--no-motion".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file.
///
/// # Errors
///
/// Returns an error if an existing file cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    for token in tokens {
        match token.as_str() {
            "--watch" => flags.watch = true,
            "--nav" => flags.nav = true,
            "--no-nav" => flags.no_nav = true,
            "--no-motion" => flags.no_motion = true,
            _ => {}
        }
    }
    flags
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

/// Generation choices the template engine records for the hooks.
#[derive(Debug, Clone, Deserialize)]
pub struct GenContext {
    /// Name of the configuration package the scaffold was generated for.
    pub config_dir: String,
    #[serde(default)]
    pub use_cms: bool,
    #[serde(default)]
    pub use_webpack: bool,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub package_manager: PackageManager,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    #[default]
    Render,
    Vps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageManager {
    #[default]
    Pip,
    Poetry,
    Pdm,
    Uv,
}

impl GenContext {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read context file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid context file {}", path.display()))
    }
}

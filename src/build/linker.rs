//! Linker configuration for cross-compilation from Linux hosts

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{project, Config};
use crate::utils::paths::ensure_dir;

/// Cargo configuration file written next to the workspace manifest
pub const LINKER_CONFIG_PATH: &str = ".cargo/config.toml";

#[derive(Debug, Serialize, Deserialize)]
struct CargoConfig {
    target: BTreeMap<String, TargetSection>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TargetSection {
    linker: String,
}

/// Write the linker mapping for the configured target
///
/// Only applies when cross-compiling on Linux; returns the written path.
/// The file is overwritten on every call.
pub fn setup_linker(project_root: &Path, config: &Config) -> Result<Option<PathBuf>> {
    if !config.platform().is_linux() {
        return Ok(None);
    }
    let Some(triple) = config.target() else {
        return Ok(None);
    };
    let Some(linker) = project::cross_linker(triple) else {
        return Ok(None);
    };

    let cargo_config = CargoConfig {
        target: BTreeMap::from([(
            triple.to_string(),
            TargetSection {
                linker: linker.to_string(),
            },
        )]),
    };
    let content =
        toml::to_string(&cargo_config).context("Failed to serialize linker configuration")?;

    let path = project_root.join(LINKER_CONFIG_PATH);
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(path))
}

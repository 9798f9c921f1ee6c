//! Coverage report filters
//!
//! The include/exclude globs and the line-exclusion pattern change
//! independently of the coverage pipeline, so they live in a TOML document:
//! `coverage.toml` at the project root, or the built-in default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name looked up at the project root
pub const COVERAGE_FILTERS_FILE: &str = "coverage.toml";

const DEFAULT_COVERAGE_FILTERS: &str = include_str!("coverage.default.toml");

/// Source filters handed to the report generator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageFilters {
    /// Globs of sources to report on
    #[serde(default)]
    pub keep_only: Vec<String>,

    /// Globs of sources to drop
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Regex of lines excluded from line counts
    #[serde(default)]
    pub excl_line: Option<String>,
}

impl CoverageFilters {
    /// Load project overrides, falling back to the built-in filters
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(COVERAGE_FILTERS_FILE);
        if path.is_file() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::parse(&content).with_context(|| format!("Invalid {}", path.display()))
        } else {
            Self::builtin()
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse coverage filters")
    }

    /// Filters compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_COVERAGE_FILTERS)
    }

    /// grcov arguments for these filters
    pub fn grcov_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(pattern) = &self.excl_line {
            args.push("--excl-line".to_string());
            args.push(pattern.clone());
        }
        for glob in &self.keep_only {
            args.push("--keep-only".to_string());
            args.push(glob.clone());
        }
        for glob in &self.ignore {
            args.push("--ignore".to_string());
            args.push(glob.clone());
        }
        args
    }
}

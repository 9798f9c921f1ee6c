//! Lexical scan for `unsafe` code
//!
//! Produces the list of source files that must run under Miri. A line is
//! exempt when it carries the `ignore miri` comment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use crate::config::project::{HARDWARE_LINK_PACKAGES, UNSAFE_FILE_LIST};
use crate::utils::paths::{is_ignored_dir, to_slash};

pub const RISK_MARKER: &str = "unsafe";
pub const SUPPRESSION_MARKER: &str = "ignore miri";

/// Recursive scanner over a project tree
#[derive(Debug, Clone)]
pub struct UnsafeScanner {
    excluded_packages: Vec<String>,
}

impl Default for UnsafeScanner {
    fn default() -> Self {
        Self::new(HARDWARE_LINK_PACKAGES)
    }
}

impl UnsafeScanner {
    /// Scanner skipping the given top-level package directories
    pub fn new<I, S>(excluded_packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_packages: excluded_packages.into_iter().map(Into::into).collect(),
        }
    }

    fn is_skipped_dir(&self, root: &Path, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            return false;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let name = entry.file_name().to_string_lossy();
        name == "tests"
            || is_ignored_dir(relative)
            || (entry.depth() == 1 && self.excluded_packages.iter().any(|p| *p == name))
    }

    /// Project-relative, `/`-separated paths of flagged files, sorted
    pub fn scan(&self, root: &Path) -> Result<Vec<String>> {
        let mut flagged = Vec::new();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !self.is_skipped_dir(root, entry));

        for entry in walker {
            let entry = entry.context("Failed to walk project tree")?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "rs") {
                continue;
            }
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if contains_unsuppressed_marker(&content) {
                let relative = path.strip_prefix(root).unwrap_or(path);
                flagged.push(to_slash(relative));
            }
        }

        flagged.sort();
        Ok(flagged)
    }

    /// Scan and write the file list to the project root
    pub fn write_report(&self, root: &Path) -> Result<(PathBuf, Vec<String>)> {
        let flagged = self.scan(root)?;
        let output = root.join(UNSAFE_FILE_LIST);
        let mut content = flagged.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(&output, content)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        Ok((output, flagged))
    }
}

/// Whether any line has the marker without the suppression comment
pub fn contains_unsuppressed_marker(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.contains(RISK_MARKER) && !line.contains(SUPPRESSION_MARKER))
}

//! Workspace-wide version bumps
//!
//! Rewrites manifests textually so formatting and comments survive: first the
//! top-level `version = "..."` field, then every `autd3*` dependency entry that
//! carries a `version = "..."` on the same line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::{Captures, NoExpand, Regex};

use crate::config::project::MANIFEST_GLOB;
use crate::error::BuildError;
use crate::utils::paths::is_ignored_dir;

/// Prefix shared by every package of the workspace
pub const PACKAGE_PREFIX: &str = "autd3";

/// Rewrites version fields to one fixed version
#[derive(Debug)]
pub struct ManifestVersionRewriter {
    version: String,
    top_level: Regex,
    dependency: Regex,
}

impl ManifestVersionRewriter {
    /// Validate `version` as semver and prepare the substitutions
    pub fn new(version: &str) -> Result<Self> {
        semver::Version::parse(version)
            .map_err(|e| BuildError::invalid_version(version, e.to_string()))?;

        let top_level = Regex::new(r#"(?m)^version = "[^"\n]*""#)?;
        let dependency = Regex::new(&format!(
            r#"(?m)^({}.*)version = "[^"\n]*""#,
            regex::escape(PACKAGE_PREFIX)
        ))?;

        Ok(Self {
            version: version.to_string(),
            top_level,
            dependency,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Apply both substitutions to manifest text
    pub fn rewrite(&self, content: &str) -> String {
        let field = format!("version = \"{}\"", self.version);
        let content = self.top_level.replace_all(content, NoExpand(&field));
        self.dependency
            .replace_all(&content, |caps: &Captures| format!("{}{}", &caps[1], field))
            .into_owned()
    }

    /// Rewrite one manifest in place, returning whether it changed
    pub fn rewrite_file(&self, path: &Path) -> Result<bool> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rewritten = self.rewrite(&content);
        if rewritten == content {
            return Ok(false);
        }
        std::fs::write(path, rewritten)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Rewrite every manifest under the project root
    ///
    /// Returns the manifests whose content changed.
    pub fn rewrite_project(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut changed = Vec::new();
        for manifest in find_manifests(root)? {
            if self.rewrite_file(&manifest)? {
                changed.push(manifest);
            }
        }
        Ok(changed)
    }
}

/// Manifests matched by the project manifest glob, outside build output
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        MANIFEST_GLOB
    );
    let mut manifests = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid manifest pattern")? {
        let path = entry.context("Failed to read manifest path")?;
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if !is_ignored_dir(relative) {
            manifests.push(path);
        }
    }
    manifests.sort();
    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"[package]
name = "autd3-gain-holo"
version = "1.2.3"
edition = "2021"

[dependencies]
autd3-core = { path = "../autd3-core", version = "1.2.3", features = ["gain"] }
autd3-driver = { path = "../autd3-driver", version = "1.2.3" }
nalgebra = { version = "0.33.0", default-features = false }
thiserror = "2.0.0"

[dev-dependencies]
autd3 = { path = "../autd3", version = "1.2.3" }
"#;

    #[test]
    fn test_rewrite_fields() {
        let rewriter = ManifestVersionRewriter::new("2.0.0").unwrap();
        let rewritten = rewriter.rewrite(MANIFEST);

        assert!(rewritten.contains("name = \"autd3-gain-holo\"\nversion = \"2.0.0\""));
        assert!(rewritten.contains(
            "autd3-core = { path = \"../autd3-core\", version = \"2.0.0\", features = [\"gain\"] }"
        ));
        assert!(rewritten.contains("autd3-driver = { path = \"../autd3-driver\", version = \"2.0.0\" }"));
        assert!(rewritten.contains("autd3 = { path = \"../autd3\", version = \"2.0.0\" }"));
        assert!(rewritten.contains("nalgebra = { version = \"0.33.0\", default-features = false }"));
        assert!(rewritten.contains("thiserror = \"2.0.0\""));
        assert!(!rewritten.contains("1.2.3"));
    }

    #[test]
    fn test_rewrite_idempotent() {
        let rewriter = ManifestVersionRewriter::new("2.0.0").unwrap();
        let once = rewriter.rewrite(MANIFEST);
        let twice = rewriter.rewrite(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_version_rejected() {
        let err = ManifestVersionRewriter::new("two").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidVersion { .. })
        ));
        assert!(ManifestVersionRewriter::new("2.0.0-rc.1").is_ok());
    }

    #[test]
    fn test_rewrite_project() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("Cargo.toml"),
            "[workspace]\nmembers = [\"autd3-gain-holo\"]\n",
        )
        .unwrap();
        let member = root.join("autd3-gain-holo");
        fs::create_dir_all(&member).unwrap();
        fs::write(member.join("Cargo.toml"), MANIFEST).unwrap();
        let built = root.join("target").join("package").join("autd3-x");
        fs::create_dir_all(&built).unwrap();
        fs::write(built.join("Cargo.toml"), "version = \"1.2.3\"\n").unwrap();

        let rewriter = ManifestVersionRewriter::new("2.0.0").unwrap();
        let changed = rewriter.rewrite_project(root).unwrap();
        assert_eq!(changed, vec![member.join("Cargo.toml")]);

        let content = fs::read_to_string(member.join("Cargo.toml")).unwrap();
        assert!(content.contains("version = \"2.0.0\""));
        assert_eq!(
            fs::read_to_string(built.join("Cargo.toml")).unwrap(),
            "version = \"1.2.3\"\n"
        );

        assert!(rewriter.rewrite_project(root).unwrap().is_empty());
    }
}

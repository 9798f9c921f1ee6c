//! Path utilities for the build CLI

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Find the project root by looking for a workspace Cargo.toml
///
/// Falls back to the current directory when no ancestor declares a workspace.
pub fn find_project_root() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_project_root_from(&current_dir).unwrap_or(current_dir))
}

/// Find the project root starting from a specific directory
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_workspace_manifest(&dir.join("Cargo.toml")))
        .map(Path::to_path_buf)
}

fn is_workspace_manifest(manifest: &Path) -> bool {
    std::fs::read_to_string(manifest)
        .ok()
        .and_then(|content| toml::from_str::<toml::Table>(&content).ok())
        .is_some_and(|table| table.contains_key("workspace"))
}

/// Whether a project-relative path lies in a build output or hidden directory
pub fn is_ignored_dir(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            name == "target" || (name.starts_with('.') && name.len() > 1)
        }
        _ => false,
    })
}

/// Render a project-relative path with forward slashes
pub fn to_slash(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_from_member() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("Cargo.toml"),
            "[workspace]\nmembers = [\"autd3\"]\n",
        )
        .unwrap();
        let member = root.join("autd3");
        fs::create_dir_all(member.join("src")).unwrap();
        fs::write(member.join("Cargo.toml"), "[package]\nname = \"autd3\"\n").unwrap();

        let found = find_project_root_from(&member.join("src")).unwrap();
        assert_eq!(found, root);
    }

    #[test]
    fn test_find_project_root_without_workspace() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();
        assert!(find_project_root_from(temp_dir.path())
            .map(|p| p != temp_dir.path())
            .unwrap_or(true));
    }

    #[test]
    fn test_workspace_header_with_comment() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("Cargo.toml"),
            "[workspace] # all crates\nmembers = [\"autd3\"]\n",
        )
        .unwrap();
        let member = root.join("autd3");
        fs::create_dir_all(&member).unwrap();
        fs::write(
            member.join("Cargo.toml"),
            "[package]\nname = \"autd3\"\n# [workspace]\n",
        )
        .unwrap();

        assert_eq!(find_project_root_from(&member).unwrap(), root);
    }

    #[test]
    fn test_workspace_dotted_key() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Cargo.toml"),
            "workspace.members = [\"autd3\"]\n",
        )
        .unwrap();
        assert!(is_workspace_manifest(&temp_dir.path().join("Cargo.toml")));
        assert!(!is_workspace_manifest(&temp_dir.path().join("missing.toml")));
    }

    #[test]
    fn test_is_ignored_dir() {
        assert!(is_ignored_dir(Path::new("target/debug/build.rs")));
        assert!(is_ignored_dir(Path::new("autd3/.git/config")));
        assert!(!is_ignored_dir(Path::new("autd3/src/lib.rs")));
        assert!(!is_ignored_dir(Path::new("./autd3/Cargo.toml")));
    }

    #[test]
    fn test_to_slash() {
        let path: PathBuf = ["autd3-driver", "src", "lib.rs"].iter().collect();
        assert_eq!(to_slash(&path), "autd3-driver/src/lib.rs");
        assert_eq!(to_slash(Path::new("./autd3/src/lib.rs")), "autd3/src/lib.rs");
    }
}

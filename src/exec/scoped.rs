//! Scoped overrides of process-wide state
//!
//! Both guards restore the previous value in `Drop`, so the override ends on
//! every exit path including `?` propagation and unwinding.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Temporarily sets environment variables
#[must_use = "the override is reverted when the guard is dropped"]
pub struct ScopedEnv {
    saved: Vec<(String, Option<OsString>)>,
    applied: Vec<(String, OsString)>,
}

impl ScopedEnv {
    /// Set each `(key, value)` pair until the guard is dropped
    pub fn set<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        let mut saved = Vec::new();
        let mut applied = Vec::new();
        for (key, value) in vars {
            let key = key.into();
            let value = value.into();
            saved.push((key.clone(), std::env::var_os(&key)));
            std::env::set_var(&key, &value);
            applied.push((key, value));
        }
        Self { saved, applied }
    }

    /// `KEY=value` for each override, in the order applied
    pub fn overrides(&self) -> impl Iterator<Item = String> + '_ {
        self.applied
            .iter()
            .map(|(key, value)| format!("{}={}", key, value.to_string_lossy()))
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        // Reverse order so a key set twice ends at its original value.
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Temporarily changes the working directory
#[must_use = "the working directory is restored when the guard is dropped"]
pub struct ScopedDir {
    previous: PathBuf,
}

impl ScopedDir {
    pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let previous = std::env::current_dir().context("Failed to get current directory")?;
        std::env::set_current_dir(path)
            .with_context(|| format!("Failed to enter directory: {}", path.display()))?;
        Ok(Self { previous })
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const KEY: &str = "AUTD3_BUILD_SCOPED_TEST";

    #[test]
    #[serial]
    fn test_env_restored_when_unset_before() {
        std::env::remove_var(KEY);
        {
            let _env = ScopedEnv::set([(KEY, "1")]);
            assert_eq!(std::env::var(KEY).unwrap(), "1");
        }
        assert!(std::env::var_os(KEY).is_none());
    }

    #[test]
    #[serial]
    fn test_env_restored_to_previous_value() {
        std::env::set_var(KEY, "before");
        {
            let _env = ScopedEnv::set([(KEY, "first"), (KEY, "second")]);
            assert_eq!(std::env::var(KEY).unwrap(), "second");
        }
        assert_eq!(std::env::var(KEY).unwrap(), "before");
        std::env::remove_var(KEY);
    }

    #[test]
    #[serial]
    fn test_overrides_listed_in_order() {
        std::env::remove_var(KEY);
        let env = ScopedEnv::set([(KEY, "a b"), ("AUTD3_BUILD_SCOPED_OTHER", "2")]);
        assert_eq!(
            env.overrides().collect::<Vec<_>>(),
            vec![
                format!("{}=a b", KEY),
                "AUTD3_BUILD_SCOPED_OTHER=2".to_string()
            ]
        );
        drop(env);
        assert!(std::env::var_os("AUTD3_BUILD_SCOPED_OTHER").is_none());
    }

    #[test]
    #[serial]
    fn test_env_restored_on_error_path() {
        fn failing() -> Result<()> {
            let _env = ScopedEnv::set([(KEY, "inside")]);
            anyhow::bail!("step failed")
        }
        std::env::remove_var(KEY);
        assert!(failing().is_err());
        assert!(std::env::var_os(KEY).is_none());
    }

    #[test]
    #[serial]
    fn test_dir_restored() {
        let temp_dir = TempDir::new().unwrap();
        let before = std::env::current_dir().unwrap();
        {
            let _dir = ScopedDir::enter(temp_dir.path()).unwrap();
            assert_eq!(
                std::env::current_dir().unwrap().canonicalize().unwrap(),
                temp_dir.path().canonicalize().unwrap()
            );
        }
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_enter_missing_dir_fails_without_moving() {
        let before = std::env::current_dir().unwrap();
        assert!(ScopedDir::enter("/definitely/not/a/dir").is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}

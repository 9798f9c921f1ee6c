//! Command implementations
//!
//! Each command module provides a clap-derived struct and an `execute`
//! method taking the shared [`Session`].

pub mod build;
pub mod clear;
pub mod cov;
pub mod help;
pub mod lint;
pub mod run;
pub mod test;
pub mod util;

use std::path::PathBuf;

use std::ffi::OsString;

use crate::exec::{CommandRunner, ScopedEnv};
use crate::utils::terminal::print_verbose;

/// State shared by all handlers of one CLI invocation
pub struct Session<'a> {
    /// Project root; also the working directory while handlers run
    pub root: PathBuf,

    /// Executes the invocations a handler builds
    pub runner: &'a mut dyn CommandRunner,

    pub verbose: bool,
}

impl<'a> Session<'a> {
    pub fn new(root: PathBuf, runner: &'a mut dyn CommandRunner, verbose: bool) -> Self {
        Self {
            root,
            runner,
            verbose,
        }
    }

    /// Override environment variables for the steps that follow
    ///
    /// Each override is echoed as `KEY=value` in verbose mode.
    pub fn scoped_env<I, K, V>(&self, vars: I) -> ScopedEnv
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OsString>,
    {
        let env = ScopedEnv::set(vars);
        for assignment in env.overrides() {
            print_verbose(self.verbose, &format!("env: {}", assignment));
        }
        env
    }
}

//! Process execution and scoped process-state overrides

mod scoped;
mod subprocess;

pub use scoped::{ScopedDir, ScopedEnv};
pub use subprocess::SystemRunner;

use anyhow::Result;

use crate::build::CommandTokens;

/// Runs one invocation to completion
///
/// Implementations fail with `BuildError::ExternalCommandFailure` when the
/// process exits unsuccessfully; handlers propagate it with `?` so the
/// remaining steps of a verb are skipped.
pub trait CommandRunner {
    fn run(&mut self, command: &CommandTokens) -> Result<()>;
}

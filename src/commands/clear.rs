//! Clear command implementation

use anyhow::Result;
use clap::Args;

use super::Session;
use crate::build::CommandTokens;

/// Remove build artifacts
#[derive(Args, Debug)]
pub struct ClearCommand {}

impl ClearCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        session.runner.run(&clear_command())
    }
}

pub fn clear_command() -> CommandTokens {
    CommandTokens::new("cargo").arg("clean")
}

//! Lint command implementation

use anyhow::Result;
use clap::Args;

use super::Session;
use crate::build::{cargo_command, CommandTokens};
use crate::config::project::EXAMPLES_PACKAGE;
use crate::config::{Config, ConfigOptions, FeatureSet};

/// Run clippy over the workspace, denying all warnings
#[derive(Args, Debug)]
pub struct LintCommand {
    /// Release build
    #[arg(long)]
    pub release: bool,

    /// Additional features (space- or comma-separated)
    #[arg(long)]
    pub features: Option<String>,

    /// Skip linting examples
    #[arg(long)]
    pub no_examples: bool,
}

impl LintCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let config = Config::for_host(&ConfigOptions {
            release: self.release,
            features: self.features,
            no_examples: self.no_examples,
            ..Default::default()
        })?;
        session.runner.run(&lint_command(&config))
    }
}

pub fn lint_command(config: &Config) -> CommandTokens {
    let command = cargo_command(&["clippy", "--tests"], config, &FeatureSet::new());
    let command = if config.no_examples() {
        command.exclude([EXAMPLES_PACKAGE])
    } else {
        command
    };
    command.args(["--", "-D", "warnings"])
}

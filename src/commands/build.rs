//! Build command implementation

use anyhow::Result;
use clap::Args;

use super::Session;
use crate::build::linker::setup_linker;
use crate::build::{cargo_command, CommandTokens};
use crate::config::project::EXAMPLES_PACKAGE;
use crate::config::{Config, ConfigOptions, FeatureSet};
use crate::utils::terminal::print_verbose;

/// Build the workspace
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Release build
    #[arg(long)]
    pub release: bool,

    /// Cross-compile for a specific architecture (arm32, aarch64)
    #[arg(long)]
    pub arch: Option<String>,

    /// Additional features (space- or comma-separated)
    #[arg(long)]
    pub features: Option<String>,

    /// Skip building examples
    #[arg(long)]
    pub no_examples: bool,
}

impl BuildCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let config = Config::for_host(&ConfigOptions {
            release: self.release,
            arch: self.arch,
            features: self.features,
            no_examples: self.no_examples,
            ..Default::default()
        })?;
        build(session, &config)
    }
}

/// Write the linker configuration if needed, then build
pub fn build(session: &mut Session, config: &Config) -> Result<()> {
    if let Some(path) = setup_linker(&session.root, config)? {
        print_verbose(session.verbose, &format!("linker configuration written to {}", path.display()));
    }
    session.runner.run(&build_command(config))
}

pub fn build_command(config: &Config) -> CommandTokens {
    let command = cargo_command(&["build"], config, &FeatureSet::new());
    if config.no_examples() {
        command.exclude([EXAMPLES_PACKAGE])
    } else {
        command
    }
}

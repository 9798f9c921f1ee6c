//! Run command implementation
//!
//! Runs one of the example binaries from the examples package.

use anyhow::Result;
use clap::Args;

use super::Session;
use crate::build::CommandTokens;
use crate::config::project::{example_feature, example_names, EXAMPLES_DIR};
use crate::config::FeatureSet;
use crate::error::BuildError;
use crate::exec::ScopedDir;

/// Run an example binary
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Example name
    pub target: String,

    /// Release build
    #[arg(long)]
    pub release: bool,

    /// Additional features (space- or comma-separated)
    #[arg(long)]
    pub features: Option<String>,
}

impl RunCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let extra = self
            .features
            .as_deref()
            .map(FeatureSet::parse)
            .unwrap_or_default();
        let command = example_command(&self.target, self.release, &extra)?;

        let _dir = ScopedDir::enter(session.root.join(EXAMPLES_DIR))?;
        session.runner.run(&command)
    }
}

/// Invocation for an allow-listed example
///
/// Default features are disabled; only the example's own feature and the
/// caller's extras are enabled.
pub fn example_command(
    target: &str,
    release: bool,
    extra_features: &FeatureSet,
) -> Result<CommandTokens, BuildError> {
    let Some(feature) = example_feature(target) else {
        return Err(BuildError::unknown_example(target, &example_names()));
    };

    let mut features: FeatureSet = feature.into_iter().collect();
    features.extend(extra_features.iter().map(str::to_string));

    Ok(CommandTokens::new("cargo")
        .arg("run")
        .arg("--no-default-features")
        .args(release.then_some("--release"))
        .arg("--bin")
        .arg(target)
        .arg_pair_if("--features", (!features.is_empty()).then(|| features.to_string())))
}

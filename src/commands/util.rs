//! Maintenance utilities: version bump and unsafe-code scan

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Session;
use crate::unsafe_scan::UnsafeScanner;
use crate::utils::terminal::print_info;
use crate::version::ManifestVersionRewriter;

/// Maintenance utilities
#[derive(Args, Debug)]
pub struct UtilCommand {
    #[command(subcommand)]
    pub command: UtilSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UtilSubcommand {
    /// Set the version of every workspace package
    Upver(UpverCommand),

    /// List source files containing unsafe code
    #[command(name = "glob_unsafe")]
    GlobUnsafe(GlobUnsafeCommand),
}

/// Set the version of every workspace package
#[derive(Args, Debug)]
pub struct UpverCommand {
    /// New version (e.g. 2.0.0)
    pub version: String,
}

/// List source files containing unsafe code
#[derive(Args, Debug)]
pub struct GlobUnsafeCommand {}

impl UtilCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        match self.command {
            UtilSubcommand::Upver(cmd) => cmd.execute(session),
            UtilSubcommand::GlobUnsafe(cmd) => cmd.execute(session),
        }
    }
}

impl UpverCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let rewriter = ManifestVersionRewriter::new(&self.version)?;
        let changed = rewriter.rewrite_project(&session.root)?;
        for manifest in &changed {
            let relative = manifest.strip_prefix(&session.root).unwrap_or(manifest);
            print_info(&format!("{}: version = \"{}\"", relative.display(), rewriter.version()));
        }
        print_info(&format!("Updated {} manifest(s)", changed.len()));
        Ok(())
    }
}

impl GlobUnsafeCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let (output, flagged) = UnsafeScanner::default().write_report(&session.root)?;
        print_info(&format!(
            "{} file(s) with unsafe code written to {}",
            flagged.len(),
            output.display()
        ));
        Ok(())
    }
}

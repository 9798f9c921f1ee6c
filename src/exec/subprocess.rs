//! Subprocess execution

use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::CommandRunner;
use crate::build::CommandTokens;
use crate::error::BuildError;
use crate::utils::terminal::{print_info, print_verbose};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            duration,
        }
    }
}

/// Run a command with inherited stdio, blocking until it exits
pub fn run_command(program: &str, args: &[String]) -> Result<CommandResult> {
    let start = Instant::now();

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", program))?;

    Ok(CommandResult::from_status(status, start.elapsed()))
}

/// Spawns real processes in the current working directory
#[derive(Debug, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandTokens) -> Result<()> {
        print_info(&command.to_string());
        if let Ok(cwd) = std::env::current_dir() {
            print_verbose(self.verbose, &format!("in {}", cwd.display()));
        }

        let result = run_command(command.program(), command.arguments())?;
        print_verbose(
            self.verbose,
            &format!("finished in {:.1}s", result.duration.as_secs_f64()),
        );

        if !result.success {
            return Err(BuildError::external_command_failure(command.to_string(), result.exit_code).into());
        }
        Ok(())
    }
}

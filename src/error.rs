//! Error types and helpers for user-facing error messages
//!
//! Every variant maps to one failure class of the build script. Local
//! validation errors are raised before any subprocess is spawned; only
//! `MissingOptionalTool` is recoverable and is reported as a warning.

use thiserror::Error;

use crate::utils::terminal::{print_error, print_info, print_warning};

/// Failures surfaced to the user
#[derive(Error, Debug)]
pub enum BuildError {
    /// Host operating system outside {Windows, macOS, Linux}
    #[error("platform \"{platform}\" is not supported.")]
    UnsupportedPlatform { platform: String },

    /// Requested architecture cannot be targeted from this host
    #[error("arch \"{arch}\" is not supported on {platform}.")]
    UnsupportedArchitecture {
        arch: String,
        platform: String,
        supported: Vec<&'static str>,
    },

    /// `run` target that is not in the example allow-list
    #[error("example \"{target}\" is not found.")]
    UnknownExampleTarget {
        target: String,
        available: Vec<&'static str>,
    },

    /// Spawned invocation exited unsuccessfully
    #[error("command `{command}` failed with {}", describe_exit(.exit_code))]
    ExternalCommandFailure {
        command: String,
        exit_code: Option<i32>,
    },

    /// Optional host tool is not installed
    #[error("{tool} is not installed. Skip {required_for}.")]
    MissingOptionalTool { tool: String, required_for: String },

    /// `util upver` argument that is not a semantic version
    #[error("\"{version}\" is not a valid version: {reason}")]
    InvalidVersion { version: String, reason: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl BuildError {
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    pub fn unsupported_architecture(
        arch: impl Into<String>,
        platform: impl Into<String>,
        supported: Vec<&'static str>,
    ) -> Self {
        Self::UnsupportedArchitecture {
            arch: arch.into(),
            platform: platform.into(),
            supported,
        }
    }

    pub fn unknown_example(target: impl Into<String>, available: &[&'static str]) -> Self {
        Self::UnknownExampleTarget {
            target: target.into(),
            available: available.to_vec(),
        }
    }

    pub fn external_command_failure(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::ExternalCommandFailure {
            command: command.into(),
            exit_code,
        }
    }

    pub fn missing_optional_tool(tool: impl Into<String>, required_for: impl Into<String>) -> Self {
        Self::MissingOptionalTool {
            tool: tool.into(),
            required_for: required_for.into(),
        }
    }

    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code used when this error terminates the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::ExternalCommandFailure {
                exit_code: Some(code),
                ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Print the error with its severity prefix and any hint
    pub fn report(&self) {
        match self {
            BuildError::MissingOptionalTool { .. } => print_warning(&self.to_string()),
            _ => print_error(&self.to_string()),
        }

        match self {
            BuildError::UnsupportedArchitecture { supported, .. } => {
                if supported.is_empty() {
                    print_info("cross-compilation is not available on this platform");
                } else {
                    print_info(&format!("Supported architectures: {:?}", supported));
                }
            }
            BuildError::UnknownExampleTarget { available, .. } => {
                print_info(&format!("Available examples: {:?}", available));
            }
            BuildError::InvalidVersion { .. } => {
                print_info("Use a semantic version such as 1.2.3 or 2.0.0-rc.1");
            }
            _ => {}
        }
    }
}

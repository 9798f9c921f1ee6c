//! Construction of cargo invocations
//!
//! ```text
//! Config + subcommand tokens + extra features → CommandTokens → CommandRunner
//! ```

pub mod linker;

use std::fmt;

use crate::config::{Config, FeatureSet};

/// Front-end program that receives the cargo subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// The regular cargo driver
    Cargo,
    /// The `cross` wrapper, used for cross-compilation from Linux hosts
    Cross,
}

impl Driver {
    pub fn for_config(config: &Config) -> Self {
        if config.uses_cross() {
            Driver::Cross
        } else {
            Driver::Cargo
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            Driver::Cargo => "cargo",
            Driver::Cross => "cross",
        }
    }
}

/// Program name followed by its arguments
///
/// Sequences are extended by value; nothing rewrites a token in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTokens {
    tokens: Vec<String>,
}

impl CommandTokens {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.tokens.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append `flag value` when a value is present
    pub fn arg_pair_if(self, flag: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// Append `--exclude <package>` for each package
    pub fn exclude<I, S>(self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        packages
            .into_iter()
            .fold(self, |tokens, package| tokens.arg("--exclude").arg(package))
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn arguments(&self) -> &[String] {
        &self.tokens[1..]
    }

    #[cfg(test)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[cfg(test)]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Whether `flag` is immediately followed by `value`
    #[cfg(test)]
    pub fn contains_pair(&self, flag: &str, value: &str) -> bool {
        self.tokens
            .windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }
}

impl fmt::Display for CommandTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .tokens
            .iter()
            .map(|t| {
                if t.is_empty() || t.contains(char::is_whitespace) {
                    format!("\"{}\"", t)
                } else {
                    t.clone()
                }
            })
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Build the standard workspace invocation for `subcommand`
///
/// Token order: driver, subcommand tokens, `--target <triple>`,
/// `--workspace`, `--release`, `--features <merged>`. The features pair is
/// left out when the merged set is empty.
pub fn cargo_command(subcommand: &[&str], config: &Config, extra_features: &FeatureSet) -> CommandTokens {
    let features = config.features().merged(extra_features);

    CommandTokens::new(Driver::for_config(config).program())
        .args(subcommand.iter().copied())
        .arg_pair_if("--target", config.target())
        .arg("--workspace")
        .args(config.release().then_some("--release"))
        .arg_pair_if("--features", (!features.is_empty()).then(|| features.to_string()))
}

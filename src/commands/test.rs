//! Test command implementation
//!
//! Regular runs use `cargo test`; `--miri` runs the suite under the Miri
//! interpreter through nextest, skipping packages Miri cannot execute.

use anyhow::Result;
use clap::Args;

use super::Session;
use crate::build::{cargo_command, CommandTokens};
use crate::config::project::{
    EXAMPLES_PACKAGE, MIRI_EXCLUDED_PACKAGES, PCAP_LINK_PACKAGE, TEST_FEATURE,
};
use crate::config::{Config, ConfigOptions, FeatureBaseline, FeatureSet};
use crate::utils::terminal::print_warning;
use crate::utils::tools::is_pcap_available;

/// Flags handed to Miri through the environment
pub const MIRI_ENV: [(&str, &str); 1] = [("MIRIFLAGS", "-Zmiri-disable-isolation")];

/// Run the workspace test suite
#[derive(Args, Debug)]
pub struct TestCommand {
    /// Release build
    #[arg(long)]
    pub release: bool,

    /// Additional features (space- or comma-separated)
    #[arg(long)]
    pub features: Option<String>,

    /// Run tests under Miri
    #[arg(long)]
    pub miri: bool,

    /// Toolchain channel used with --miri
    #[arg(long)]
    pub channel: Option<String>,
}

impl TestCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        // Miri runs without the baseline feature.
        let baseline = if self.miri {
            FeatureBaseline::Suppress
        } else {
            FeatureBaseline::Inject
        };
        let config = Config::for_host(&ConfigOptions {
            release: self.release,
            features: self.features,
            channel: self.channel,
            baseline,
            ..Default::default()
        })?;

        if self.miri {
            run_miri(session, &config)
        } else {
            let pcap_available = is_pcap_available(config.platform());
            run_native(session, &config, pcap_available)
        }
    }
}

/// Regular test run; the EtherCAT link is skipped when Npcap is missing
pub fn run_native(session: &mut Session, config: &Config, pcap_available: bool) -> Result<()> {
    if !pcap_available {
        print_warning(&format!(
            "Npcap is not installed. Skip testing {}.",
            PCAP_LINK_PACKAGE
        ));
    }
    session.runner.run(&test_command(config, pcap_available))
}

fn test_features() -> FeatureSet {
    [TEST_FEATURE].into_iter().collect()
}

/// Native test run
pub fn test_command(config: &Config, pcap_available: bool) -> CommandTokens {
    let command = cargo_command(&["test"], config, &test_features()).exclude([EXAMPLES_PACKAGE]);
    if pcap_available {
        command
    } else {
        command.exclude([PCAP_LINK_PACKAGE])
    }
}

/// Test run under the Miri interpreter on the configured channel
pub fn miri_command(config: &Config) -> CommandTokens {
    let channel = format!("+{}", config.channel());
    cargo_command(&[channel.as_str(), "miri", "nextest", "run"], config, &test_features())
        .exclude(MIRI_EXCLUDED_PACKAGES)
}

pub fn run_miri(session: &mut Session, config: &Config) -> Result<()> {
    let _env = session.scoped_env(MIRI_ENV);
    session.runner.run(&miri_command(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::project::BASELINE_FEATURE;
    use crate::config::Platform;
    use crate::exec::testing::RecordingRunner;
    use serial_test::serial;

    fn config(baseline: FeatureBaseline, channel: Option<&str>) -> Config {
        Config::resolve(
            Platform::Linux,
            &ConfigOptions {
                features: Some("soem".to_string()),
                channel: channel.map(str::to_string),
                baseline,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_pcap_unavailable_excludes_link() {
        let cmd = test_command(&config(FeatureBaseline::Inject, None), false);
        assert!(cmd.contains_pair("--exclude", PCAP_LINK_PACKAGE));
        assert!(cmd.contains_pair("--exclude", EXAMPLES_PACKAGE));
    }

    #[test]
    fn test_pcap_available_keeps_link() {
        let cmd = test_command(&config(FeatureBaseline::Inject, None), true);
        assert!(!cmd.contains(PCAP_LINK_PACKAGE));
        assert!(cmd.contains_pair("--exclude", EXAMPLES_PACKAGE));
        assert!(cmd.contains_pair("--features", "remote soem test-utilities"));
        assert_eq!(&cmd.tokens()[..2], ["cargo".to_string(), "test".to_string()]);
    }

    #[test]
    fn test_native_run_without_pcap() {
        let cfg = Config::resolve(
            Platform::Windows,
            &ConfigOptions {
                features: Some("soem".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let mut runner = RecordingRunner::new();
        let mut session = Session::new(std::env::temp_dir(), &mut runner, false);

        run_native(&mut session, &cfg, false).unwrap();
        run_native(&mut session, &cfg, true).unwrap();

        let commands = runner.commands();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].contains_pair("--exclude", PCAP_LINK_PACKAGE));
        assert!(commands[0].contains_pair("--exclude", EXAMPLES_PACKAGE));
        assert!(commands[0].contains_pair("--features", "remote soem test-utilities"));
        assert!(!commands[1].contains(PCAP_LINK_PACKAGE));
        assert!(commands[1].contains_pair("--exclude", EXAMPLES_PACKAGE));
    }

    #[test]
    fn test_miri_command() {
        let cmd = miri_command(&config(FeatureBaseline::Suppress, None));
        assert_eq!(
            &cmd.tokens()[..5],
            ["cargo", "+nightly", "miri", "nextest", "run"].map(String::from)
        );
        assert!(cmd.contains_pair("--features", "soem test-utilities"));
        assert!(!cmd.tokens().iter().any(|t| t.contains(BASELINE_FEATURE)));
        for package in MIRI_EXCLUDED_PACKAGES {
            assert!(cmd.contains_pair("--exclude", package), "{}", package);
        }
        assert!(!cmd.contains(EXAMPLES_PACKAGE));
    }

    #[test]
    fn test_miri_custom_channel() {
        let cmd = miri_command(&config(FeatureBaseline::Suppress, Some("nightly-2024-06-01")));
        assert_eq!(cmd.tokens()[1], "+nightly-2024-06-01");
    }

    #[test]
    #[serial]
    fn test_miri_env_is_scoped() {
        std::env::remove_var("MIRIFLAGS");
        let mut runner = RecordingRunner::new().watch_env(&["MIRIFLAGS"]);
        let mut session = Session::new(std::env::temp_dir(), &mut runner, true);

        run_miri(&mut session, &config(FeatureBaseline::Suppress, None)).unwrap();

        let seen = &runner.invocations[0].env["MIRIFLAGS"];
        assert_eq!(seen.as_deref(), Some(std::ffi::OsStr::new("-Zmiri-disable-isolation")));
        assert!(std::env::var_os("MIRIFLAGS").is_none());
    }
}

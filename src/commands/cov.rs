//! Coverage command implementation
//!
//! Instrumented build, instrumented test run, then a grcov report. The raw
//! profiles are removed once the report has been generated.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::Session;
use crate::build::{cargo_command, CommandTokens};
use crate::config::project::TEST_FEATURE;
use crate::config::{Config, ConfigOptions, CoverageFilters, FeatureSet};
use crate::utils::terminal::{print_info, print_warning};

/// Instrumentation environment for the build and test steps
pub const COVERAGE_ENV: [(&str, &str); 2] = [
    ("RUSTFLAGS", "-C instrument-coverage"),
    ("LLVM_PROFILE_FILE", "%m-%p.profraw"),
];

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CoverageFormat {
    /// LCOV tracefile (lcov.info)
    #[default]
    Lcov,
    /// HTML report under coverage/html
    Html,
    /// Markdown summary on stdout
    Text,
}

impl CoverageFormat {
    /// grcov output type and output path
    fn grcov_output(self) -> (&'static str, Option<&'static str>) {
        match self {
            CoverageFormat::Lcov => ("lcov", Some("./lcov.info")),
            CoverageFormat::Html => ("html", Some("./coverage")),
            CoverageFormat::Text => ("markdown", None),
        }
    }
}

impl std::fmt::Display for CoverageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageFormat::Lcov => write!(f, "lcov"),
            CoverageFormat::Html => write!(f, "html"),
            CoverageFormat::Text => write!(f, "text"),
        }
    }
}

/// Collect test coverage
#[derive(Args, Debug)]
pub struct CovCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = CoverageFormat::Lcov)]
    pub format: CoverageFormat,

    /// Release build
    #[arg(long)]
    pub release: bool,

    /// Open the HTML report when done
    #[arg(long)]
    pub open: bool,
}

impl CovCommand {
    pub fn execute(self, session: &mut Session) -> Result<()> {
        let config = Config::for_host(&ConfigOptions {
            release: self.release,
            ..Default::default()
        })?;
        let filters = CoverageFilters::load(&session.root)?;

        coverage(session, &config, &filters, self.format)?;

        if self.open {
            open_report(&session.root, self.format);
        }
        Ok(())
    }
}

/// The three invocations of the pipeline: build, test, report
pub fn coverage_commands(
    config: &Config,
    filters: &CoverageFilters,
    format: CoverageFormat,
) -> [CommandTokens; 3] {
    let extra: FeatureSet = [TEST_FEATURE].into_iter().collect();
    let build = cargo_command(&["build"], config, &extra);
    let test = cargo_command(&["test"], config, &extra);

    let (output_type, output_path) = format.grcov_output();
    let report = CommandTokens::new("grcov")
        .args([".", "-s", "."])
        .arg("--binary-path")
        .arg(format!("./target/{}", config.profile_dir()))
        .args(["--llvm", "--branch", "--ignore-not-existing"])
        .arg("-t")
        .arg(output_type)
        .arg_pair_if("-o", output_path)
        .args(filters.grcov_args());

    [build, test, report]
}

/// Run the pipeline, stopping at the first failing step
pub fn coverage(
    session: &mut Session,
    config: &Config,
    filters: &CoverageFilters,
    format: CoverageFormat,
) -> Result<()> {
    {
        let _env = session.scoped_env(COVERAGE_ENV);
        for command in coverage_commands(config, filters, format) {
            session.runner.run(&command)?;
        }
    }

    let removed = remove_profiles(&session.root)?;
    if removed > 0 {
        print_info(&format!("Removed {} raw profile file(s)", removed));
    }
    Ok(())
}

/// Delete `*.profraw` files anywhere under the project root
pub fn remove_profiles(root: &Path) -> Result<usize> {
    let pattern = format!("{}/**/*.profraw", glob::Pattern::escape(&root.to_string_lossy()));
    let mut removed = 0;
    for entry in glob::glob(&pattern).context("Invalid profile pattern")? {
        let path = entry.context("Failed to read profile path")?;
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        removed += 1;
    }
    Ok(removed)
}

fn html_index(root: &Path) -> PathBuf {
    root.join("coverage").join("html").join("index.html")
}

fn open_report(root: &Path, format: CoverageFormat) {
    if format != CoverageFormat::Html {
        print_warning("--open only applies to the html format");
        return;
    }
    let index = html_index(root);
    if let Err(e) = open::that(&index) {
        print_warning(&format!("Failed to open {}: {}", index.display(), e));
    }
}

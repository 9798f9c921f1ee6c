//! Resolution of CLI options into an effective `Config`

use crate::error::BuildError;

use super::features::{FeatureBaseline, FeatureSet};
use super::platform::Platform;
use super::project::BASELINE_FEATURE;

/// Toolchain channel used when none is requested
pub const DEFAULT_CHANNEL: &str = "nightly";

/// Raw options collected from a verb's flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub release: bool,
    pub arch: Option<String>,
    pub features: Option<String>,
    pub channel: Option<String>,
    pub no_examples: bool,
    pub baseline: FeatureBaseline,
}

/// Effective configuration, immutable once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    platform: Platform,
    release: bool,
    target: Option<&'static str>,
    features: FeatureSet,
    channel: String,
    no_examples: bool,
}

impl Config {
    /// Resolve options against the detected host platform
    pub fn for_host(options: &ConfigOptions) -> Result<Self, BuildError> {
        Self::resolve(Platform::identify()?, options)
    }

    /// Resolve options against an explicit platform
    pub fn resolve(platform: Platform, options: &ConfigOptions) -> Result<Self, BuildError> {
        let target = match options.arch.as_deref() {
            Some(arch) => platform.target_triple(arch)?,
            None => None,
        };

        let mut features = FeatureSet::new();
        if options.baseline == FeatureBaseline::Inject {
            features.insert(BASELINE_FEATURE);
        }
        if let Some(list) = &options.features {
            features.extend(FeatureSet::parse(list).iter().map(str::to_string));
        }

        let channel = options
            .channel
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHANNEL)
            .to_string();

        Ok(Self {
            platform,
            release: options.release,
            target,
            features,
            channel,
            no_examples: options.no_examples,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn release(&self) -> bool {
        self.release
    }

    /// Cross-compilation target triple, if any
    pub fn target(&self) -> Option<&'static str> {
        self.target
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn no_examples(&self) -> bool {
        self.no_examples
    }

    /// Whether builds go through the `cross` wrapper
    pub fn uses_cross(&self) -> bool {
        self.target.is_some() && self.platform.is_linux()
    }

    /// Cargo profile directory name
    pub fn profile_dir(&self) -> &'static str {
        if self.release {
            "release"
        } else {
            "debug"
        }
    }
}

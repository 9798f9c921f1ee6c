//! Effective configuration for one CLI invocation
//!
//! `Config` is resolved once from the parsed options and the host platform
//! and is never mutated afterwards.

mod coverage;
mod features;
mod platform;
pub mod project;
mod resolver;

pub use coverage::CoverageFilters;
pub use features::{FeatureBaseline, FeatureSet};
pub use platform::Platform;
pub use resolver::{Config, ConfigOptions};

//! Shared helpers: terminal output, project paths and host tool probes

pub mod paths;
pub mod terminal;
pub mod tools;

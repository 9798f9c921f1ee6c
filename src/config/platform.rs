//! Host platform detection

use std::fmt;

use crate::error::BuildError;

/// Host operating systems the build script supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Identify the host platform
    pub fn identify() -> Result<Self, BuildError> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as in `std::env::consts::OS`) to a platform
    pub fn from_os(os: &str) -> Result<Self, BuildError> {
        match os {
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => Err(BuildError::unsupported_platform(other)),
        }
    }

    /// Architectures that can be cross-compiled to from this host
    pub fn cross_architectures(self) -> Vec<&'static str> {
        match self {
            Platform::Linux => vec!["arm32", "aarch64"],
            Platform::Windows => vec!["aarch64"],
            Platform::MacOs => vec![],
        }
    }

    /// Map a requested architecture to a target triple
    ///
    /// An empty request means "host architecture". macOS never cross-compiles.
    pub fn target_triple(self, arch: &str) -> Result<Option<&'static str>, BuildError> {
        let triple = match (self, arch) {
            (_, "") | (Platform::MacOs, _) => None,
            (Platform::Linux, "arm32") => Some("armv7-unknown-linux-gnueabihf"),
            (Platform::Linux, "aarch64") => Some("aarch64-unknown-linux-gnu"),
            (Platform::Windows, "aarch64") => Some("aarch64-pc-windows-msvc"),
            (platform, arch) => {
                return Err(BuildError::unsupported_architecture(
                    arch,
                    platform.to_string(),
                    platform.cross_architectures(),
                ))
            }
        };
        Ok(triple)
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    pub fn is_linux(self) -> bool {
        self == Platform::Linux
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}

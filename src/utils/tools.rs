//! Host tool detection with graceful degradation

use std::path::{Path, PathBuf};

use which::which;

use crate::config::Platform;
use crate::error::BuildError;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Path to the tool executable
    pub path: PathBuf,
}

/// Check if a tool exists on PATH
pub fn check_tool(tool_name: &str) -> Option<ToolInfo> {
    which(tool_name).ok().map(|path| ToolInfo {
        name: tool_name.to_string(),
        path,
    })
}

/// Look up an optional tool, reporting a warning when it is missing
pub fn optional_tool(tool_name: &str, required_for: &str) -> Option<ToolInfo> {
    let info = check_tool(tool_name);
    if info.is_none() {
        BuildError::missing_optional_tool(tool_name, required_for).report();
    }
    info
}

const PCAP_LIBRARIES: [&str; 2] = ["wpcap.dll", "Packet.dll"];

/// Whether the packet-capture library needed by the EtherCAT link is installed
///
/// Only Windows needs Npcap installed separately; other hosts always report
/// available.
pub fn is_pcap_available(platform: Platform) -> bool {
    if !platform.is_windows() {
        return true;
    }
    let system_root = std::env::var_os("SystemRoot")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("C:\\Windows"));
    pcap_libraries_present(&system_root.join("System32"))
}

/// Both capture DLLs must be present in System32 and in System32/Npcap
pub fn pcap_libraries_present(system32: &Path) -> bool {
    let npcap = system32.join("Npcap");
    PCAP_LIBRARIES
        .iter()
        .all(|lib| system32.join(lib).is_file() && npcap.join(lib).is_file())
}

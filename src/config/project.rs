//! Fixed tables describing the autd3 workspace layout

/// Feature every regular invocation enables
pub const BASELINE_FEATURE: &str = "remote";

/// Feature exposing test helpers across the workspace
pub const TEST_FEATURE: &str = "test-utilities";

/// Package holding the example binaries
pub const EXAMPLES_PACKAGE: &str = "autd3-examples";

/// Directory of the examples package, relative to the project root
pub const EXAMPLES_DIR: &str = "examples";

/// Link packages that need the packet-capture library at link time
pub const PCAP_LINK_PACKAGE: &str = "autd3-link-soem";

/// Link packages talking to vendor hardware through FFI
pub const HARDWARE_LINK_PACKAGES: [&str; 3] = [
    "autd3-link-soem",
    "autd3-link-twincat",
    "autd3-link-ethercrab",
];

/// Packages that cannot run under the memory interpreter
pub const MIRI_EXCLUDED_PACKAGES: [&str; 6] = [
    "autd3-driver",
    "autd3-derive",
    "autd3-link-soem",
    "autd3-link-twincat",
    "autd3-link-ethercrab",
    "autd3-modulation-audio-file",
];

/// Runnable examples and the feature each one needs
///
/// `None` means the example builds without any optional feature.
pub const EXAMPLES: [(&str, Option<&str>); 9] = [
    ("soem", Some("soem")),
    ("firmware_test", Some("soem")),
    ("remote_soem", Some("remote_soem")),
    ("twincat", Some("twincat")),
    ("remote_twincat", Some("remote_twincat")),
    ("simulator", Some("simulator")),
    ("lightweight", Some("lightweight")),
    ("lightweight_server", Some("lightweight-server")),
    ("nop", None),
];

/// Names accepted by `run`
pub fn example_names() -> Vec<&'static str> {
    EXAMPLES.iter().map(|(name, _)| *name).collect()
}

/// Feature required by an example, `None` when the example is unknown
pub fn example_feature(name: &str) -> Option<Option<&'static str>> {
    EXAMPLES
        .iter()
        .find(|(example, _)| *example == name)
        .map(|(_, feature)| *feature)
}

/// Linker binary for a cross-compilation target on a Linux host
pub fn cross_linker(triple: &str) -> Option<&'static str> {
    match triple {
        "armv7-unknown-linux-gnueabihf" => Some("arm-linux-gnueabihf-gcc"),
        "aarch64-unknown-linux-gnu" => Some("aarch64-linux-gnu-gcc"),
        _ => None,
    }
}

/// Manifests rewritten by `util upver`
pub const MANIFEST_GLOB: &str = "**/Cargo.toml";

/// Output of `util glob_unsafe`
pub const UNSAFE_FILE_LIST: &str = "filelist-for-miri-test.txt";

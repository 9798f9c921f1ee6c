//! autd3-build - build orchestration for the autd3 workspace
//!
//! Resolves platform, cross-compilation target and feature set once, then
//! drives cargo and friends for each verb.
//!
//! ```text
//! CLI options → Config → CommandTokens → cargo / cross / grcov
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod unsafe_scan;
mod utils;
mod version;

use clap::Parser;

use cli::Cli;
use error::BuildError;
use utils::terminal::print_error;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        let code = match err.downcast_ref::<BuildError>() {
            Some(build_error) => {
                build_error.report();
                build_error.exit_code()
            }
            None => {
                print_error(&format!("{:#}", err));
                1
            }
        };
        std::process::exit(code);
    }
}

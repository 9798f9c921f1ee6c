//! CLI argument parsing using clap derive macros

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::build::CommandTokens;
use crate::commands::{
    build::BuildCommand, clear::ClearCommand, cov::CovCommand, help::HelpCommand,
    help::HelpRegistry, lint::LintCommand, run::RunCommand, test::TestCommand,
    util::UtilCommand, Session,
};
use crate::exec::{CommandRunner, ScopedDir, SystemRunner};
use crate::utils::paths::find_project_root;
use crate::utils::terminal::{disable_colors, print_verbose, print_warning};
use crate::utils::tools::{optional_tool, ToolInfo};

/// autd3 library build script
#[derive(Parser, Debug)]
#[command(name = "autd3-build")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the workspace
    Build(BuildCommand),

    /// Run clippy, denying all warnings
    Lint(LintCommand),

    /// Run the test suite
    Test(TestCommand),

    /// Run an example
    Run(RunCommand),

    /// Remove build artifacts
    Clear(ClearCommand),

    /// Collect test coverage
    Cov(CovCommand),

    /// Maintenance utilities
    Util(UtilCommand),

    /// Show help for a command
    Help(HelpCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            disable_colors();
        }

        let registry = HelpRegistry::from_command(&Cli::command());
        if let Commands::Help(cmd) = self.command {
            return cmd.execute(&registry);
        }

        let root = find_project_root()?;
        let _dir = ScopedDir::enter(&root)?;
        print_verbose(self.verbose, &format!("project root: {}", root.display()));

        let mut runner = SystemRunner::new(self.verbose);
        fetch_submodules(&root, &mut runner, self.verbose);

        let mut session = Session::new(root, &mut runner, self.verbose);
        match self.command {
            Commands::Build(cmd) => cmd.execute(&mut session),
            Commands::Lint(cmd) => cmd.execute(&mut session),
            Commands::Test(cmd) => cmd.execute(&mut session),
            Commands::Run(cmd) => cmd.execute(&mut session),
            Commands::Clear(cmd) => cmd.execute(&mut session),
            Commands::Cov(cmd) => cmd.execute(&mut session),
            Commands::Util(cmd) => cmd.execute(&mut session),
            Commands::Help(cmd) => cmd.execute(&registry),
        }
    }
}

/// Fetch git submodules; never aborts startup
fn fetch_submodules(root: &Path, runner: &mut dyn CommandRunner, verbose: bool) {
    let Some(git) = optional_tool("git", "fetching submodules") else {
        return;
    };
    print_verbose(verbose, &format!("{}: {}", git.name, git.path.display()));
    let command = submodule_command(&git);
    if let Err(e) = runner.run(&command) {
        print_warning(&format!(
            "Failed to fetch submodules in {}: {:#}",
            root.display(),
            e
        ));
    }
}

fn submodule_command(git: &ToolInfo) -> CommandTokens {
    CommandTokens::new(git.path.to_string_lossy())
        .args(["submodule", "update", "--init", "--recursive"])
}

//! Help command and the registry of help renderers

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::Args;

use crate::utils::terminal::print_info;

type Renderer = Box<dyn Fn() -> String>;

/// Help renderers indexed by command path (`build`, `util upver`, ...)
#[derive(Default)]
pub struct HelpRegistry {
    renderers: BTreeMap<String, Renderer>,
}

impl HelpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every subcommand of `root`, recursively
    pub fn from_command(root: &clap::Command) -> Self {
        let mut registry = Self::new();
        registry.register_subcommands(root.get_name(), "", root);
        registry
    }

    fn register_subcommands(&mut self, bin: &str, prefix: &str, parent: &clap::Command) {
        for sub in parent.get_subcommands() {
            let path = if prefix.is_empty() {
                sub.get_name().to_string()
            } else {
                format!("{} {}", prefix, sub.get_name())
            };
            let command = sub.clone().bin_name(format!("{} {}", bin, path));
            self.register(path.clone(), move || {
                command.clone().render_long_help().to_string()
            });
            self.register_subcommands(bin, &path, sub);
        }
    }

    pub fn register(&mut self, name: impl Into<String>, renderer: impl Fn() -> String + 'static) {
        self.renderers.insert(name.into(), Box::new(renderer));
    }

    pub fn render(&self, name: &str) -> Option<String> {
        self.renderers.get(name).map(|render| render())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }
}

/// Show help for a command
#[derive(Args, Debug)]
pub struct HelpCommand {
    /// Command name whose help is shown (e.g. `build`, `util upver`)
    #[arg(required = true, num_args = 1..)]
    pub command: Vec<String>,
}

impl HelpCommand {
    pub fn execute(self, registry: &HelpRegistry) -> Result<()> {
        let name = self.command.join(" ");
        match registry.render(&name) {
            Some(text) => {
                println!("{}", text);
                Ok(())
            }
            None => {
                print_info(&format!(
                    "Available commands: {:?}",
                    registry.names().collect::<Vec<_>>()
                ));
                bail!("command \"{}\" is not found.", name)
            }
        }
    }
}

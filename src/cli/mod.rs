// src/cli/mod.rs

use crate::cli::registry::Registry;
use clap::{CommandFactory, FromArgMatches, Parser};
use colored::Colorize;
use std::path::Path;

/// The resolve, bind and invoke pipeline.
pub mod dispatcher;
/// `env_logger` setup.
pub mod logging;
/// The `cli.toml` properties file.
pub mod properties;
/// Which commands exist.
pub mod registry;
/// Instantiation and entry-contract validation.
pub mod resolver;

/// cmdkit: describe a command as data, get a validated, typed invocation.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command to launch, followed by its own arguments.
    /// Everything after the command name is handed to it untouched, `--help` included.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parses the process arguments. The help output lists the registered commands.
    pub fn parse_with<I>(registry: &Registry, args: I, color: bool) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = String>,
    {
        let command = Self::command().after_help(commands_overview(registry, color));
        let matches = command.try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

/// Lists every registered command with its aliases and description.
pub fn commands_overview(registry: &Registry, color: bool) -> String {
    let labels: Vec<String> = registry
        .commands()
        .iter()
        .map(|cmd| {
            if cmd.aliases.is_empty() {
                cmd.name.clone()
            } else {
                format!("{} ({})", cmd.name, cmd.aliases.join(", "))
            }
        })
        .collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);

    let title = if color {
        "Commands:".yellow().bold().to_string()
    } else {
        "Commands:".to_string()
    };
    let mut out = title;
    for (label, cmd) in labels.iter().zip(registry.commands()) {
        let padded = format!("{:<width$}", label, width = width);
        let padded = if color {
            padded.cyan().to_string()
        } else {
            padded
        };
        out.push_str(&format!("\n  {}   {}", padded, cmd.description));
    }
    out
}

/// Multi-call dispatch: when the executable is invoked through a link named
/// after a registered command, that name becomes the command identifier.
///
/// Returns the arguments to dispatch, or `None` for a regular invocation.
pub fn launcher_args(registry: &Registry, argv: &[String]) -> Option<Vec<String>> {
    let (program, rest) = argv.split_first()?;
    let stem = Path::new(program).file_stem()?.to_str()?;
    if stem == env!("CARGO_PKG_NAME") {
        return None;
    }
    let definition = registry.find_command(stem)?;
    log::debug!("Launched as '{}'; dispatching to '{}'", stem, definition.name);

    let mut args = Vec::with_capacity(argv.len());
    args.push(stem.to_string());
    args.extend(rest.iter().cloned());
    Some(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    fn argv(params: &[&str]) -> Vec<String> {
        params.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_arguments_pass_through_untouched() {
        let cli = Cli::parse_with(
            &samples::registry(),
            argv(&["cmdkit", "test", "-testParam", "x", "--help"]),
            false,
        )
        .unwrap();
        assert_eq!(cli.args, argv(&["test", "-testParam", "x", "--help"]));
    }

    #[test]
    fn test_no_command_yields_no_args() {
        let cli = Cli::parse_with(&samples::registry(), argv(&["cmdkit"]), false).unwrap();
        assert!(cli.args.is_empty());
    }

    #[test]
    fn test_overview_lists_commands_and_aliases() {
        let overview = commands_overview(&samples::registry(), false);
        assert!(overview.starts_with("Commands:\n"));
        assert!(overview.contains("size (du)"));
        assert!(overview.contains("this is a test command"));
    }

    #[test]
    fn test_launcher_uses_program_name() {
        let registry = samples::registry();
        assert_eq!(
            launcher_args(&registry, &argv(&["/usr/local/bin/du", "-h", "."])),
            Some(argv(&["du", "-h", "."]))
        );
        assert_eq!(launcher_args(&registry, &argv(&["/usr/bin/cmdkit", "size"])), None);
        assert_eq!(launcher_args(&registry, &argv(&["other"])), None);
        assert_eq!(launcher_args(&registry, &[]), None);
    }
}

// src/cli/registry.rs

use crate::{
    cli::resolver::{self, ResolvedCommand},
    command::Command,
    errors::CliError,
};
use std::fmt;

/// Produces a freshly resolved command: descriptor, zero-valued instance and binding table.
pub type CommandFactory = fn() -> Result<Box<dyn ResolvedCommand>, CliError>;

/// Defines a registered command, its aliases, and the factory that resolves it.
#[derive(Clone)]
pub struct CommandDefinition {
    /// The identifier the command is launched by.
    pub name: String,
    /// Extra identifiers resolving to the same command.
    pub aliases: Vec<String>,
    /// One-line summary shown in the command overview.
    pub description: String,
    factory: CommandFactory,
}

impl CommandDefinition {
    /// Runs the factory: instantiates the command and validates its contract.
    pub fn resolve(&self) -> Result<Box<dyn ResolvedCommand>, CliError> {
        (self.factory)()
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// The single source of truth for which commands exist.
/// Commands are registered explicitly at startup; nothing is discovered at runtime.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<CommandDefinition>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `C` under the name declared in its spec.
    pub fn register<C: Command>(self) -> Self {
        self.register_with_aliases::<C>(&[])
    }

    /// Registers `C` under its declared name plus the given aliases.
    ///
    /// A name or alias already taken by an earlier registration keeps pointing at
    /// the earlier command: a clashing name drops the whole registration, a
    /// clashing alias only drops that alias.
    pub fn register_with_aliases<C: Command>(mut self, aliases: &[&str]) -> Self {
        let spec = C::spec();
        let descriptor = spec.descriptor();
        if self.find_command(&descriptor.name).is_some() {
            log::warn!(
                "Command '{}' is already registered; ignoring the new registration",
                descriptor.name
            );
            return self;
        }

        let mut kept: Vec<String> = Vec::with_capacity(aliases.len());
        for alias in aliases {
            if *alias == descriptor.name
                || kept.iter().any(|k| k == alias)
                || self.find_command(alias).is_some()
            {
                log::warn!(
                    "Alias '{}' of command '{}' is already taken; ignoring it",
                    alias,
                    descriptor.name
                );
                continue;
            }
            kept.push(alias.to_string());
        }

        self.commands.push(CommandDefinition {
            name: descriptor.name.clone(),
            aliases: kept,
            description: descriptor.description.clone(),
            factory: resolver::resolve::<C>,
        });
        self
    }

    /// Finds a command definition by its name or alias.
    pub fn find_command(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands
            .iter()
            .find(|cmd| cmd.name == name || cmd.aliases.iter().any(|a| a == name))
    }

    /// Looks the identifier up and resolves it into a ready-to-bind command.
    pub fn resolve(&self, identifier: &str) -> Result<Box<dyn ResolvedCommand>, CliError> {
        let definition = self
            .find_command(identifier)
            .ok_or_else(|| CliError::UnknownCommand(identifier.to_string()))?;
        definition.resolve()
    }

    /// Every registration, in registration order.
    pub fn commands(&self) -> &[CommandDefinition] {
        &self.commands
    }
}

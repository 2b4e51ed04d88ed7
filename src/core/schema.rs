// src/core/schema.rs

use crate::{
    errors::CliError,
    models::{CommandDescriptor, ValueType},
};
use std::collections::HashMap;

/// The parser-facing shape of one declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Position of the parameter in the command descriptor (and its binding table).
    pub index: usize,
    /// Short name without the leading dash.
    pub short: Option<String>,
    /// Long name without the leading dashes.
    pub long: Option<String>,
    /// Whether a value token must follow.
    pub requires_value: bool,
    /// Whether the option must be present.
    pub mandatory: bool,
    /// The type the value is coerced into.
    pub value_type: ValueType,
}

impl OptionSpec {
    /// The name used in messages: `-short` if available, `--long` otherwise.
    pub fn display_name(&self) -> String {
        match (&self.short, &self.long) {
            (Some(short), _) => format!("-{}", short),
            (None, Some(long)) => format!("--{}", long),
            (None, None) => format!("#{}", self.index),
        }
    }
}

/// The option schema derived from a command descriptor.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    options: Vec<OptionSpec>,
    by_short: HashMap<String, usize>,
    by_long: HashMap<String, usize>,
    variadic: Option<String>,
}

impl Schema {
    /// Derives the schema from a command's parameter descriptors.
    ///
    /// Blank names are not registered. A parameter left with neither a short nor
    /// a long name, or a name claimed twice, is a schema error.
    pub fn build(descriptor: &CommandDescriptor) -> Result<Self, CliError> {
        let mut schema = Self {
            variadic: descriptor.variadic.as_ref().map(|v| v.name.clone()),
            ..Self::default()
        };

        for (index, parameter) in descriptor.parameters.iter().enumerate() {
            let short = parameter.short_name().map(str::to_string);
            let long = parameter.long_name().map(str::to_string);

            if short.is_none() && long.is_none() {
                return Err(CliError::Schema {
                    command: descriptor.name.clone(),
                    reason: format!(
                        "parameter #{} ('{}') declares neither a short nor a long name",
                        index, parameter.description
                    ),
                });
            }

            if let Some(name) = &short {
                register(&mut schema.by_short, name, index, "-", &descriptor.name)?;
            }
            if let Some(name) = &long {
                register(&mut schema.by_long, name, index, "--", &descriptor.name)?;
            }

            schema.options.push(OptionSpec {
                index,
                short,
                long,
                requires_value: parameter.accepts_value(),
                mandatory: parameter.mandatory,
                value_type: parameter.value_type,
            });
        }

        log::debug!(
            "Built schema for '{}': {} options, variadic: {:?}",
            descriptor.name,
            schema.options.len(),
            schema.variadic
        );
        Ok(schema)
    }

    /// Every option, indexed like the descriptor's parameters.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The option at a parameter index.
    pub fn option(&self, index: usize) -> Option<&OptionSpec> {
        self.options.get(index)
    }

    /// Looks an option up by short name.
    pub fn find_short(&self, name: &str) -> Option<&OptionSpec> {
        self.by_short.get(name).and_then(|&i| self.options.get(i))
    }

    /// Looks an option up by long name.
    pub fn find_long(&self, name: &str) -> Option<&OptionSpec> {
        self.by_long.get(name).and_then(|&i| self.options.get(i))
    }

    /// Options that must be present on every invocation.
    pub fn mandatory(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| o.mandatory)
    }

    /// Whether leftover positional tokens are accepted.
    pub fn allows_trailing(&self) -> bool {
        self.variadic.is_some()
    }

    /// The name of the variadic slot, if any.
    pub fn variadic_name(&self) -> Option<&str> {
        self.variadic.as_deref()
    }
}

fn register(
    names: &mut HashMap<String, usize>,
    name: &str,
    index: usize,
    prefix: &str,
    command: &str,
) -> Result<(), CliError> {
    if names.insert(name.to_string(), index).is_some() {
        return Err(CliError::Schema {
            command: command.to_string(),
            reason: format!("option '{}{}' is declared more than once", prefix, name),
        });
    }
    Ok(())
}

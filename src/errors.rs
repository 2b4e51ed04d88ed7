// src/errors.rs

use crate::constants::{MISSING_COMMAND_CODE, MISSING_OPTION_CODE, SENTINEL_CODE};
use thiserror::Error;

/// A failure turning one raw token into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// A numeric option got a token that is not a number.
    #[error("Could not parse '{token}' to the expected type {target}")]
    InvalidNumber { token: String, target: String },
    /// An enumeration option got a value outside its members.
    #[error("Could not parse {value} to type {enumeration}")]
    UnknownMember { value: String, enumeration: String },
    /// A value-taking option was given no value.
    #[error("Could not parse an empty value to type {target}")]
    MissingValue { target: String },
    /// A flag was given a value.
    #[error("Boolean types do not allow a value (got '{value}' for {option})")]
    FlagWithValue { option: String, value: String },
    /// A setter received a value of another type than it binds.
    #[error("Option {option} cannot be bound from a {found} value")]
    TypeMismatch { option: String, found: String },
}

/// Several coercion failures collected during one binding pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
pub struct CoercionErrors(pub Vec<CoercionError>);

/// The error taxonomy of the resolve/parse/dispatch pipeline.
#[derive(Error, Debug)]
pub enum CliError {
    /// No command identifier was given.
    #[error("Please specify which command you wish to launch")]
    MissingCommand,
    /// No command is registered under the identifier.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    /// The command instance could not be created.
    #[error("Could not instantiate command '{command}': {source}")]
    Instantiation {
        command: String,
        #[source]
        source: anyhow::Error,
    },
    /// The command's entry routines do not match its background flag, or there is not exactly one.
    #[error("Command '{command}' violates the entry contract: {reason}")]
    ContractViolation { command: String, reason: String },
    /// The parameter declarations cannot form an option schema.
    #[error("Invalid parameter declaration in command '{command}': {reason}")]
    Schema { command: String, reason: String },
    /// Mandatory options are absent; carries every missing name.
    #[error("Missing required option: {}", .0.join(", "))]
    MissingMandatoryOption(Vec<String>),
    /// One or more option values could not be coerced.
    #[error(transparent)]
    Coercion(#[from] CoercionErrors),
    /// Positional tokens left over for a command without a variadic slot.
    #[error("Could not parse {}", .0.join(","))]
    UnrecognizedArguments(Vec<String>),
    /// An option name that matches no parameter.
    #[error("Unrecognized option: {0}")]
    UnknownOption(String),
    /// The entry routine returned an error.
    #[error("Command '{command}' failed: {source}")]
    Invocation {
        command: String,
        #[source]
        source: anyhow::Error,
    },
    /// Writing command output failed.
    #[error("Could not write command output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// The process exit code this error terminates with.
    pub fn return_code(&self) -> i32 {
        match self {
            Self::MissingCommand => MISSING_COMMAND_CODE,
            Self::MissingMandatoryOption(_) => MISSING_OPTION_CODE,
            _ => SENTINEL_CODE,
        }
    }

    /// Recoverable errors render help instead of aborting.
    pub fn shows_help(&self) -> bool {
        matches!(self, Self::MissingMandatoryOption(_))
    }
}

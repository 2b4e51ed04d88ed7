// src/models.rs

use std::fmt;

// --- DESCRIPTOR MODELS ---
// Static metadata describing a command and its parameters. These are built once
// per resolution and never mutated afterwards.

/// The semantic type a parameter's raw token is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Taken verbatim.
    String,
    /// A signed 64-bit integer.
    Integer,
    /// A 64-bit floating point number.
    Float,
    /// Presence-only switch. Never accepts a value.
    Flag,
    /// One of a closed set of string members, matched case-insensitively.
    Enumeration {
        name: &'static str,
        members: &'static [&'static str],
    },
}

impl ValueType {
    /// Every type except `Flag` requires a value when the option is supplied.
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::Flag)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Flag => write!(f, "boolean"),
            Self::Enumeration { name, .. } => write!(f, "{}", name),
        }
    }
}

/// Declaratively describes a single option accepted by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Short name, used as `-name`.
    pub short: Option<String>,
    /// Long name, used as `--name` (or `-name` when no short name matches).
    pub long: Option<String>,
    /// Shown in the help table.
    pub description: String,
    /// Whether the option must be present.
    pub mandatory: bool,
    /// The type the raw token is coerced into.
    pub value_type: ValueType,
}

impl ParameterDescriptor {
    /// Whether the option takes a value token. Booleans never do.
    pub fn accepts_value(&self) -> bool {
        self.value_type.requires_value()
    }

    /// The short name, if it is present and not blank.
    pub fn short_name(&self) -> Option<&str> {
        self.short.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The long name, if it is present and not blank.
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// The name used to refer to this parameter in messages, e.g. `-n` or `--name`.
    pub fn display_name(&self) -> String {
        match (self.short_name(), self.long_name()) {
            (Some(short), _) => format!("-{}", short),
            (None, Some(long)) => format!("--{}", long),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}

/// Presence signals the command accepts an open-ended list of trailing positional tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariadicDescriptor {
    /// Shown in the usage line as `[<name>]...`.
    pub name: String,
}

/// Static metadata describing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// The identifier the command is registered under.
    pub name: String,
    /// Shown below the usage line.
    pub description: String,
    /// Fire-and-forget commands return no exit code of their own.
    pub background: bool,
    /// Declared options, in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Accepts leftover positional tokens when present.
    pub variadic: Option<VariadicDescriptor>,
}

// --- RUNTIME VALUES ---

/// A coerced, typed option value ready to be bound to a command instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    Text(String),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A 64-bit float.
    Float(f64),
    /// A flag's presence.
    Flag(bool),
    /// The canonical (declared) spelling of the matched enumeration member.
    Member(&'static str),
}

/// The result of dispatching one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// An exit code, either returned by the entry routine or chosen by the dispatcher.
    Code(i32),
    /// A background command completed its entry routine; it has no code of its own.
    Background,
}

impl ExecutionOutcome {
    /// Maps the outcome to a process exit code. Background commands propagate `0`.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Code(code) => code,
            Self::Background => 0,
        }
    }
}

// src/command.rs

//! Declarative command definitions.
//!
//! A command is described once, as data: a [`CommandSpec`] holding the command's
//! descriptor, an accessor table that assigns coerced values to the instance,
//! and the entry routine to invoke. No runtime type inspection is involved.
//!
//! ```
//! use cmdkit::command::{Command, CommandSpec, Parameter};
//! use cmdkit::context::ExecutionContext;
//!
//! #[derive(Default)]
//! struct Greet {
//!     name: Option<String>,
//!     loud: bool,
//! }
//!
//! impl Greet {
//!     fn run(&self, ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
//!         let name = self.name.as_deref().unwrap_or("world");
//!         if self.loud {
//!             writeln!(ctx.stdout(), "HELLO, {}!", name.to_uppercase())?;
//!         } else {
//!             writeln!(ctx.stdout(), "Hello, {}.", name)?;
//!         }
//!         Ok(0)
//!     }
//! }
//!
//! impl Command for Greet {
//!     fn spec() -> CommandSpec<Self> {
//!         CommandSpec::new("greet", "Prints a greeting")
//!             .parameter(
//!                 Parameter::new()
//!                     .short("n")
//!                     .long("name")
//!                     .description("who to greet")
//!                     .string(|cmd: &mut Self, v| cmd.name = Some(v)),
//!             )
//!             .parameter(
//!                 Parameter::new()
//!                     .long("loud")
//!                     .description("shout")
//!                     .flag(|cmd: &mut Self, v| cmd.loud = v),
//!             )
//!             .run(Self::run)
//!     }
//! }
//! ```

use crate::{
    context::ExecutionContext,
    errors::CoercionError,
    models::{CommandDescriptor, ParameterDescriptor, Value, ValueType, VariadicDescriptor},
};
use std::fmt;

/// Assigns a coerced value to its backing slot on a command instance.
pub type Setter<C> = Box<dyn Fn(&mut C, Value) -> Result<(), CoercionError>>;

/// Receives the ordered leftover positional tokens.
pub type VariadicSetter<C> = Box<dyn Fn(&mut C, Vec<String>)>;

/// The entry routine of a command that reports an exit code.
pub type CodeRoutine<C> = fn(&C, &mut ExecutionContext<'_>) -> anyhow::Result<i32>;

/// The entry routine of a fire-and-forget command.
pub type BackgroundRoutine<C> = fn(&C, &mut ExecutionContext<'_>) -> anyhow::Result<()>;

/// Implemented by every command type.
///
/// The command's descriptor and binding table come from [`Command::spec`]; a fresh
/// zero-valued instance comes from [`Command::instantiate`], which defaults to
/// `Default::default()`.
pub trait Command: Default + 'static {
    /// Declares the command: metadata, parameters, variadic slot and entry routine.
    fn spec() -> CommandSpec<Self>;

    /// Creates the instance that parsed values get bound to.
    fn instantiate() -> anyhow::Result<Self> {
        Ok(Self::default())
    }
}

/// An enumeration usable as an option type. Implement it with [`cli_enum!`](crate::cli_enum).
pub trait CliEnum: Sized + 'static {
    /// The type name shown in error messages.
    const NAME: &'static str;
    /// The declared members, in declaration order.
    const MEMBERS: &'static [&'static str];

    /// Maps a declared member spelling back to the enum value.
    fn from_member(member: &str) -> Option<Self>;
}

/// Declares an enum together with its [`CliEnum`] implementation.
///
/// ```
/// cmdkit::cli_enum! {
///     pub enum Mode {
///         Fast => "FAST",
///         Safe => "SAFE",
///     }
/// }
/// use cmdkit::command::CliEnum;
/// assert_eq!(Mode::from_member("SAFE"), Some(Mode::Safe));
/// assert_eq!(Mode::MEMBERS, &["FAST", "SAFE"]);
/// ```
#[macro_export]
macro_rules! cli_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $member:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::command::CliEnum for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [&'static str] = &[$($member),+];

            fn from_member(member: &str) -> Option<Self> {
                match member {
                    $($member => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

/// The entry contract a command declares.
pub enum Entry<C> {
    /// Returns an integer exit code.
    Code(CodeRoutine<C>),
    /// Returns no value; the invocation is fire-and-forget.
    Background(BackgroundRoutine<C>),
}

impl<C> Entry<C> {
    /// Whether the routine returns an exit code.
    pub fn returns_code(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}

impl<C> fmt::Debug for Entry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(_) => write!(f, "Entry::Code"),
            Self::Background(_) => write!(f, "Entry::Background"),
        }
    }
}

/// A parameter descriptor paired with the accessor that binds its value.
pub struct Binding<C> {
    /// What the parameter looks like on the command line.
    pub descriptor: ParameterDescriptor,
    /// Assigns the coerced value to the instance.
    pub setter: Setter<C>,
}

impl<C> fmt::Debug for Binding<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Builder for a single parameter. Finish it with one of the typed methods
/// (`string`, `integer`, `float`, `flag`, `enumeration`), which fixes the value
/// type and supplies the accessor.
#[derive(Debug, Default)]
pub struct Parameter {
    short: Option<String>,
    long: Option<String>,
    description: String,
    mandatory: bool,
}

impl Parameter {
    /// Starts a parameter with no names, no description and not mandatory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the option as `-name`.
    pub fn short(mut self, name: impl Into<String>) -> Self {
        self.short = Some(name.into());
        self
    }

    /// Registers the option as `--name`.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long = Some(name.into());
        self
    }

    /// One-line description shown in the help table.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The option must be present on every invocation.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    fn into_descriptor(self, value_type: ValueType) -> ParameterDescriptor {
        ParameterDescriptor {
            short: self.short,
            long: self.long,
            description: self.description,
            mandatory: self.mandatory,
            value_type,
        }
    }

    /// Finishes a parameter that takes a string value verbatim.
    pub fn string<C: 'static>(self, set: impl Fn(&mut C, String) + 'static) -> Binding<C> {
        let descriptor = self.into_descriptor(ValueType::String);
        let option = descriptor.display_name();
        Binding {
            descriptor,
            setter: Box::new(move |cmd: &mut C, value: Value| match value {
                Value::Text(text) => {
                    set(cmd, text);
                    Ok(())
                }
                other => Err(mismatch(&option, &other)),
            }),
        }
    }

    /// Finishes a parameter that takes a signed 64-bit integer.
    pub fn integer<C: 'static>(self, set: impl Fn(&mut C, i64) + 'static) -> Binding<C> {
        let descriptor = self.into_descriptor(ValueType::Integer);
        let option = descriptor.display_name();
        Binding {
            descriptor,
            setter: Box::new(move |cmd: &mut C, value: Value| match value {
                Value::Integer(number) => {
                    set(cmd, number);
                    Ok(())
                }
                other => Err(mismatch(&option, &other)),
            }),
        }
    }

    /// Finishes a parameter that takes a 64-bit float.
    pub fn float<C: 'static>(self, set: impl Fn(&mut C, f64) + 'static) -> Binding<C> {
        let descriptor = self.into_descriptor(ValueType::Float);
        let option = descriptor.display_name();
        Binding {
            descriptor,
            setter: Box::new(move |cmd: &mut C, value: Value| match value {
                Value::Float(number) => {
                    set(cmd, number);
                    Ok(())
                }
                other => Err(mismatch(&option, &other)),
            }),
        }
    }

    /// A presence-only switch. The accessor receives `false` before parsing and
    /// `true` when the option is present.
    pub fn flag<C: 'static>(self, set: impl Fn(&mut C, bool) + 'static) -> Binding<C> {
        let descriptor = self.into_descriptor(ValueType::Flag);
        let option = descriptor.display_name();
        Binding {
            descriptor,
            setter: Box::new(move |cmd: &mut C, value: Value| match value {
                Value::Flag(on) => {
                    set(cmd, on);
                    Ok(())
                }
                other => Err(mismatch(&option, &other)),
            }),
        }
    }

    /// Finishes a parameter that takes one member of the [`CliEnum`] `E`, matched ignoring case.
    pub fn enumeration<C: 'static, E: CliEnum>(self, set: impl Fn(&mut C, E) + 'static) -> Binding<C> {
        let descriptor = self.into_descriptor(ValueType::Enumeration {
            name: E::NAME,
            members: E::MEMBERS,
        });
        let option = descriptor.display_name();
        Binding {
            descriptor,
            setter: Box::new(move |cmd: &mut C, value: Value| match value {
                Value::Member(member) => {
                    let parsed =
                        E::from_member(member).ok_or_else(|| CoercionError::UnknownMember {
                            value: member.to_string(),
                            enumeration: E::NAME.to_string(),
                        })?;
                    set(cmd, parsed);
                    Ok(())
                }
                other => Err(mismatch(&option, &other)),
            }),
        }
    }
}

fn mismatch(option: &str, found: &Value) -> CoercionError {
    let found = match found {
        Value::Text(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Flag(_) => "boolean",
        Value::Member(_) => "enumeration",
    };
    CoercionError::TypeMismatch {
        option: option.to_string(),
        found: found.to_string(),
    }
}

/// The binding table of a command: one accessor per declared parameter (same
/// order as the descriptor's parameters) plus the optional variadic accessor.
pub struct Bindings<C> {
    /// One setter per declared parameter.
    pub setters: Vec<Setter<C>>,
    /// Receives the leftover positional tokens, if the command declares a variadic slot.
    pub variadic: Option<VariadicSetter<C>>,
}

impl<C> fmt::Debug for Bindings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("setters", &self.setters.len())
            .field("variadic", &self.variadic.is_some())
            .finish()
    }
}

/// Everything a command declares about itself.
pub struct CommandSpec<C> {
    descriptor: CommandDescriptor,
    bindings: Bindings<C>,
    entries: Vec<Entry<C>>,
}

impl<C> CommandSpec<C> {
    /// Starts the declaration of a foreground command.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            descriptor: CommandDescriptor {
                name: name.into(),
                description: description.into(),
                background: false,
                parameters: Vec::new(),
                variadic: None,
            },
            bindings: Bindings {
                setters: Vec::new(),
                variadic: None,
            },
            entries: Vec::new(),
        }
    }

    /// Marks the command as fire-and-forget. Its entry routine must return no value.
    pub fn background(mut self) -> Self {
        self.descriptor.background = true;
        self
    }

    /// Adds a parameter. Parameters are listed in help in declaration order.
    pub fn parameter(mut self, binding: Binding<C>) -> Self {
        self.descriptor.parameters.push(binding.descriptor);
        self.bindings.setters.push(binding.setter);
        self
    }

    /// Accepts an ordered list of trailing positional tokens, shown as `[<name>]...`.
    pub fn variadic(
        mut self,
        name: impl Into<String>,
        set: impl Fn(&mut C, Vec<String>) + 'static,
    ) -> Self {
        self.descriptor.variadic = Some(VariadicDescriptor { name: name.into() });
        self.bindings.variadic = Some(Box::new(set));
        self
    }

    /// Declares an entry routine returning an exit code.
    pub fn run(mut self, routine: CodeRoutine<C>) -> Self {
        self.entries.push(Entry::Code(routine));
        self
    }

    /// Declares an entry routine returning no value.
    pub fn run_in_background(mut self, routine: BackgroundRoutine<C>) -> Self {
        self.entries.push(Entry::Background(routine));
        self
    }

    /// The descriptor declared so far.
    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Splits the declaration into its descriptor, binding table and declared entries.
    pub fn into_parts(self) -> (CommandDescriptor, Bindings<C>, Vec<Entry<C>>) {
        (self.descriptor, self.bindings, self.entries)
    }
}

impl<C> fmt::Debug for CommandSpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("descriptor", &self.descriptor)
            .field("bindings", &self.bindings)
            .field("entries", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::cli_enum! {
        enum Color {
            Red => "RED",
            Green => "GREEN",
        }
    }

    #[derive(Default)]
    struct Holder {
        text: Option<String>,
        color: Option<Color>,
        on: bool,
    }

    #[test]
    fn test_cli_enum_members() {
        assert_eq!(Color::NAME, "Color");
        assert_eq!(Color::MEMBERS, &["RED", "GREEN"]);
        assert_eq!(Color::from_member("GREEN"), Some(Color::Green));
        assert_eq!(Color::from_member("green"), None);
    }

    #[test]
    fn test_builder_fills_descriptor_and_setters_in_order() {
        let spec: CommandSpec<Holder> = CommandSpec::new("demo", "a demo")
            .parameter(
                Parameter::new()
                    .short("t")
                    .long("text")
                    .description("some text")
                    .mandatory()
                    .string(|h: &mut Holder, v| h.text = Some(v)),
            )
            .parameter(Parameter::new().short("c").enumeration(|h: &mut Holder, v: Color| {
                h.color = Some(v);
            }))
            .variadic("files", |_h: &mut Holder, _v| {});

        let (descriptor, bindings, entries) = spec.into_parts();
        assert_eq!(descriptor.name, "demo");
        assert_eq!(descriptor.parameters.len(), 2);
        assert!(descriptor.parameters[0].mandatory);
        assert_eq!(
            descriptor.parameters[1].value_type,
            ValueType::Enumeration {
                name: "Color",
                members: &["RED", "GREEN"]
            }
        );
        assert_eq!(descriptor.variadic.as_ref().unwrap().name, "files");
        assert_eq!(bindings.setters.len(), 2);
        assert!(bindings.variadic.is_some());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_setters_apply_matching_values_and_reject_others() {
        let text = Parameter::new().short("t").string(|h: &mut Holder, v| h.text = Some(v));
        let flag = Parameter::new().short("f").flag(|h: &mut Holder, v| h.on = v);
        let color = Parameter::new()
            .short("c")
            .enumeration(|h: &mut Holder, v: Color| h.color = Some(v));

        let mut holder = Holder::default();
        (text.setter)(&mut holder, Value::Text("hi".to_string())).unwrap();
        (flag.setter)(&mut holder, Value::Flag(true)).unwrap();
        (color.setter)(&mut holder, Value::Member("RED")).unwrap();
        assert_eq!(holder.text.as_deref(), Some("hi"));
        assert!(holder.on);
        assert_eq!(holder.color, Some(Color::Red));

        let err = (text.setter)(&mut holder, Value::Integer(3)).unwrap_err();
        assert!(matches!(err, CoercionError::TypeMismatch { .. }));
    }
}

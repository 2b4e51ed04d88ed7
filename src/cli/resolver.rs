// src/cli/resolver.rs

use crate::{
    command::{Bindings, Command, Entry},
    context::ExecutionContext,
    core::{binder, schema::Schema},
    dev_utils::Stopwatch,
    errors::CliError,
    models::{CommandDescriptor, ExecutionOutcome},
};

/// A command that has been looked up, instantiated and validated, erased to a
/// common interface so the dispatcher can drive any registered type.
pub trait ResolvedCommand {
    fn descriptor(&self) -> &CommandDescriptor;

    fn schema(&self) -> &Schema;

    /// Parses the raw arguments and binds them onto the instance.
    fn bind(&mut self, cli_params: &[String]) -> Result<(), CliError>;

    /// Runs the entry routine against the bound instance.
    fn invoke(&self, ctx: &mut ExecutionContext<'_>) -> Result<ExecutionOutcome, CliError>;
}

/// The resolution of a concrete command type `C`.
struct Resolution<C: Command> {
    descriptor: CommandDescriptor,
    schema: Schema,
    bindings: Bindings<C>,
    instance: C,
    entry: Entry<C>,
}

/// Builds the descriptor of `C`, instantiates it and validates its entry contract.
///
/// This is the factory stored in the registry for every command type.
pub fn resolve<C: Command>() -> Result<Box<dyn ResolvedCommand>, CliError> {
    let (descriptor, bindings, entries) = {
        let _timer = Stopwatch::new("build command descriptor");
        C::spec().into_parts()
    };
    log::debug!("Resolving command '{}'", descriptor.name);

    let instance = {
        let _timer = Stopwatch::new("instantiate command");
        C::instantiate().map_err(|source| CliError::Instantiation {
            command: descriptor.name.clone(),
            source,
        })?
    };

    let entry = {
        let _timer = Stopwatch::new("validate entry routine");
        validate_entry(&descriptor, entries)?
    };

    let schema = Schema::build(&descriptor)?;

    Ok(Box::new(Resolution {
        descriptor,
        schema,
        bindings,
        instance,
        entry,
    }))
}

/// Checks that exactly one entry routine is declared and that its return shape
/// matches the background flag.
fn validate_entry<C>(
    descriptor: &CommandDescriptor,
    mut entries: Vec<Entry<C>>,
) -> Result<Entry<C>, CliError> {
    let violation = |reason: &str| CliError::ContractViolation {
        command: descriptor.name.clone(),
        reason: reason.to_string(),
    };

    if entries.len() > 1 {
        return Err(violation("only one entry routine may be declared per command"));
    }
    let entry = entries.pop().ok_or_else(|| {
        violation(
            "no entry routine declared; use `run` for a routine returning an exit code, \
             or `run_in_background` for a background command",
        )
    })?;

    match (descriptor.background, entry.returns_code()) {
        (true, true) => Err(violation(
            "the entry routine must return no value if the command is intended to run in the background",
        )),
        (false, false) => Err(violation(
            "the entry routine must return an exit code unless the command runs in the background",
        )),
        _ => Ok(entry),
    }
}

impl<C: Command> ResolvedCommand for Resolution<C> {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn bind(&mut self, cli_params: &[String]) -> Result<(), CliError> {
        binder::bind(&mut self.instance, &self.schema, &self.bindings, cli_params)
    }

    fn invoke(&self, ctx: &mut ExecutionContext<'_>) -> Result<ExecutionOutcome, CliError> {
        let wrap = |source| CliError::Invocation {
            command: self.descriptor.name.clone(),
            source,
        };
        match self.entry {
            Entry::Code(routine) => routine(&self.instance, ctx).map(ExecutionOutcome::Code).map_err(wrap),
            Entry::Background(routine) => routine(&self.instance, ctx)
                .map(|()| ExecutionOutcome::Background)
                .map_err(wrap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSpec;
    use anyhow::anyhow;

    #[derive(Default)]
    struct NoEntry;

    impl Command for NoEntry {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("no-entry", "declares nothing to run")
        }
    }

    #[derive(Default)]
    struct TwoEntries;

    impl TwoEntries {
        fn first(&self, _ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
            Ok(1)
        }
        fn second(&self, _ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
            Ok(2)
        }
    }

    impl Command for TwoEntries {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("two", "declares two routines")
                .run(Self::first)
                .run(Self::second)
        }
    }

    #[derive(Default)]
    struct ForegroundWithoutCode;

    impl ForegroundWithoutCode {
        fn run(&self, _ctx: &mut ExecutionContext<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    impl Command for ForegroundWithoutCode {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("no-code", "returns nothing but is not background")
                .run_in_background(Self::run)
        }
    }

    #[derive(Default)]
    struct Unbuildable;

    impl Command for Unbuildable {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("unbuildable", "cannot be constructed")
        }

        fn instantiate() -> anyhow::Result<Self> {
            Err(anyhow!("no resources available"))
        }
    }

    fn contract_error(result: Result<Box<dyn ResolvedCommand>, CliError>) -> String {
        match result {
            Err(CliError::ContractViolation { reason, .. }) => reason,
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected a contract violation"),
        }
    }

    #[test]
    fn test_missing_entry_routine() {
        assert!(contract_error(resolve::<NoEntry>()).contains("no entry routine"));
    }

    #[test]
    fn test_more_than_one_entry_routine() {
        assert!(contract_error(resolve::<TwoEntries>()).contains("only one entry routine"));
    }

    #[test]
    fn test_foreground_command_must_return_a_code() {
        assert!(contract_error(resolve::<ForegroundWithoutCode>()).contains("must return an exit code"));
    }

    #[test]
    fn test_instantiation_failure_is_reported_before_contract_checks() {
        match resolve::<Unbuildable>() {
            Err(err @ CliError::Instantiation { .. }) => {
                assert_eq!(err.return_code(), -1337);
                assert!(err.to_string().contains("no resources available"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected an instantiation failure"),
        }
    }
}

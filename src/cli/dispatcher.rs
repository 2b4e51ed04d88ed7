// src/cli/dispatcher.rs

use crate::{
    cli::{registry::Registry, resolver::ResolvedCommand},
    constants::HELP_FLAG,
    context::ExecutionContext,
    core::help,
    dev_utils::Stopwatch,
    errors::CliError,
    models::ExecutionOutcome,
};

/// Turns raw arguments into a validated invocation of a registered command.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
    version: Option<String>,
    color: bool,
}

impl Dispatcher {
    /// Creates a dispatcher over the given commands, with no version footer and no colour.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            version: None,
            color: false,
        }
    }

    /// The version shown in help footers. `None` omits the footer.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Whether help text is coloured.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The commands this dispatcher can launch.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The main entry point: the first argument identifies the command, the rest
    /// goes to its parser. A lone `--help` prints the command's help and does nothing else.
    pub fn dispatch(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<ExecutionOutcome, CliError> {
        let _timer = Stopwatch::new("total time");
        log::debug!("Dispatching args: {:?}", args);

        let (identifier, cli_params) = args.split_first().ok_or(CliError::MissingCommand)?;

        if matches!(cli_params, [only] if only == HELP_FLAG) {
            let text = self.help(identifier)?;
            ctx.stdout().write_all(text.as_bytes())?;
            ctx.flush()?;
            return Ok(ExecutionOutcome::Code(0));
        }

        self.execute(identifier, cli_params, ctx)
    }

    /// Resolves, binds and invokes one command.
    ///
    /// A missing mandatory option is not fatal: the help is printed and the
    /// outcome is exit code `-1`. Every other failure is returned as an error.
    pub fn execute(
        &self,
        identifier: &str,
        cli_params: &[String],
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<ExecutionOutcome, CliError> {
        let mut command = {
            let _timer = Stopwatch::new("looking for command");
            self.registry.resolve(identifier)?
        };

        let _timer = Stopwatch::new("execute command");
        match command.bind(cli_params) {
            Ok(()) => {}
            Err(e) if e.shows_help() => {
                log::debug!("{}; printing help for '{}'", e, identifier);
                writeln!(ctx.stderr(), "{}", e)?;
                let text = self.render_help(command.as_ref());
                ctx.stdout().write_all(text.as_bytes())?;
                ctx.flush()?;
                return Ok(ExecutionOutcome::Code(e.return_code()));
            }
            Err(e) => return Err(e),
        }

        let outcome = command.invoke(ctx)?;
        ctx.flush()?;
        log::debug!("Command '{}' finished with {:?}", identifier, outcome);
        Ok(outcome)
    }

    /// Renders the help text of a registered command.
    pub fn help(&self, identifier: &str) -> Result<String, CliError> {
        let command = self.registry.resolve(identifier)?;
        Ok(self.render_help(command.as_ref()))
    }

    fn render_help(&self, command: &dyn ResolvedCommand) -> String {
        help::render(
            command.descriptor(),
            command.schema(),
            self.version.as_deref(),
            self.color,
        )
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandSpec, Parameter};
    use crate::errors::CoercionErrors;
    use crate::samples::{BackgroundApp, SampleCommand};
    use anyhow::anyhow;

    /// Same shape as the background sample, but declares a routine returning a code.
    #[derive(Default)]
    struct WrongBackgroundApp;

    impl WrongBackgroundApp {
        fn execute(&self, _ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
            Ok(-1_235_235)
        }
    }

    impl Command for WrongBackgroundApp {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("wrong-background", "Runs in the background")
                .background()
                .run(Self::execute)
        }
    }

    #[derive(Default)]
    struct Listing {
        long: bool,
        paths: Vec<String>,
    }

    impl Listing {
        fn run(&self, ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
            writeln!(ctx.stdout(), "long={} paths={}", self.long, self.paths.join(","))?;
            Ok(0)
        }
    }

    impl Command for Listing {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("ls", "lists paths")
                .parameter(Parameter::new().short("l").flag(|c: &mut Self, v| c.long = v))
                .variadic("path", |c: &mut Self, v| c.paths = v)
                .run(Self::run)
        }
    }

    #[derive(Default)]
    struct Strict {
        long: bool,
    }

    impl Strict {
        fn run(&self, _ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
            Ok(i32::from(self.long))
        }
    }

    impl Command for Strict {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("strict", "accepts no positional tokens")
                .parameter(Parameter::new().short("l").flag(|c: &mut Self, v| c.long = v))
                .run(Self::run)
        }
    }

    #[derive(Default)]
    struct Failing;

    impl Failing {
        fn run(&self, _ctx: &mut ExecutionContext<'_>) -> anyhow::Result<i32> {
            Err(anyhow!("disk on fire"))
        }
    }

    impl Command for Failing {
        fn spec() -> CommandSpec<Self> {
            CommandSpec::new("failing", "always fails").run(Self::run)
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            Registry::new()
                .register::<SampleCommand>()
                .register::<BackgroundApp>()
                .register::<WrongBackgroundApp>()
                .register::<Listing>()
                .register::<Strict>()
                .register::<Failing>(),
        )
        .with_version(Some("9.9.9".to_string()))
    }

    fn to_cli_params(params: &[&str]) -> Vec<String> {
        params.iter().map(|s| s.to_string()).collect()
    }

    /// Dispatches and returns the result together with captured stdout and stderr.
    fn dispatch(args: &[&str]) -> (Result<ExecutionOutcome, CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = {
            let mut ctx = ExecutionContext::new("/work", &mut out, &mut err);
            dispatcher().dispatch(&to_cli_params(args), &mut ctx)
        };
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_sample_command_scenario() {
        let (result, out, _) = dispatch(&[
            "test",
            "-testParam",
            "lalala",
            "-enumParam",
            "FOO",
            "-numericParam",
            "234",
            "-flag",
        ]);
        assert_eq!(result.unwrap(), ExecutionOutcome::Code(0));
        assert_eq!(out, "/work\nlalala\nFoo\n234\ntrue\n");
    }

    #[test]
    fn test_enum_values_ignore_case() {
        let (result, out, _) = dispatch(&["test", "-testParam", "x", "-enumParam", "bar"]);
        assert_eq!(result.unwrap(), ExecutionOutcome::Code(0));
        assert_eq!(out, "/work\nx\nBar\nnone\nfalse\n");
    }

    #[test]
    fn test_non_numeric_value_is_fatal() {
        let (result, _, _) = dispatch(&["test", "-testParam", "x", "-numericParam", "thisIsNotANumber"]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Coercion(CoercionErrors(_))));
        assert_eq!(err.return_code(), -1337);
        assert!(err.to_string().contains("thisIsNotANumber"));
    }

    #[test]
    fn test_missing_mandatory_prints_help_and_returns_minus_one() {
        let (result, out, err) = dispatch(&["test", "-numericParam", "thisIsNotANumber"]);
        assert_eq!(result.unwrap(), ExecutionOutcome::Code(-1));
        assert!(out.starts_with("usage: test -testParam <arg>"));
        assert!(out.ends_with("v9.9.9\n"));
        assert!(err.contains("Missing required option: -testParam"));
    }

    #[test]
    fn test_lone_help_flag_only_renders_help() {
        let (result, out, _) = dispatch(&["test", "--help"]);
        assert_eq!(result.unwrap(), ExecutionOutcome::Code(0));
        assert!(out.contains("this is a test command"));
        assert!(!out.contains("lalala"));

        // With anything else next to it, --help is an ordinary (unknown) option.
        let (result, _, _) = dispatch(&["test", "--help", "-flag"]);
        assert!(matches!(result, Err(CliError::UnknownOption(_))));
    }

    #[test]
    fn test_background_command_yields_no_code() {
        let (result, out, _) = dispatch(&["background"]);
        assert_eq!(result.unwrap(), ExecutionOutcome::Background);
        assert_eq!(ExecutionOutcome::Background.exit_code(), 0);
        assert!(out.starts_with("/work"));
    }

    #[test]
    fn test_background_command_returning_a_code_violates_contract() {
        let (result, out, _) = dispatch(&["wrong-background"]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::ContractViolation { .. }));
        assert_eq!(err.return_code(), -1337);
        assert!(out.is_empty());
    }

    #[test]
    fn test_trailing_token_with_and_without_variadic_slot() {
        let (result, _, _) = dispatch(&["strict", "-l", "-", "extra"]);
        match result {
            Err(CliError::UnrecognizedArguments(tokens)) => assert_eq!(tokens, vec!["-", "extra"]),
            other => panic!("unexpected result: {:?}", other.map_err(|e| e.to_string())),
        }

        let (result, out, _) = dispatch(&["ls", "-l", "extra"]);
        assert_eq!(result.unwrap(), ExecutionOutcome::Code(0));
        assert_eq!(out, "long=true paths=extra\n");
    }

    #[test]
    fn test_entry_routine_errors_become_invocation_failures() {
        let (result, _, _) = dispatch(&["failing"]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Invocation { .. }));
        assert_eq!(err.return_code(), -1337);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_unknown_and_missing_command() {
        let (result, _, _) = dispatch(&["nope"]);
        assert!(matches!(result, Err(CliError::UnknownCommand(_))));

        let (result, _, _) = dispatch(&[]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::MissingCommand));
        assert_eq!(err.return_code(), -1);
    }

    #[test]
    fn test_help_without_version_has_no_footer() {
        let dispatcher = Dispatcher::new(Registry::new().register::<SampleCommand>());
        let text = dispatcher.help("test").unwrap();
        assert!(text.ends_with("flag\n"));
        assert!(!text.contains("v9.9.9"));
    }
}

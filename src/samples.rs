// src/samples.rs

//! Commands shipped with the `cmdkit` binary. They double as worked examples of
//! the declarative API.

use crate::{
    cli::registry::Registry,
    cli_enum,
    command::{Command, CommandSpec, Parameter},
    context::ExecutionContext,
    core::format,
};
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Width of the size column printed by [`SizeCommand`].
const DEFAULT_SIZE_WIDTH: i64 = 10;

cli_enum! {
    /// The enumeration accepted by [`SampleCommand`].
    pub enum SampleEnum {
        Foo => "FOO",
        Bar => "BAR",
    }
}

/// Registers every shipped command.
pub fn registry() -> Registry {
    Registry::new()
        .register::<SampleCommand>()
        .register::<BackgroundApp>()
        .register::<ParametersCommand>()
        .register_with_aliases::<SizeCommand>(&["du"])
}

// --- test ---

/// Echoes the working directory and every bound value, one per line.
#[derive(Debug, Default)]
pub struct SampleCommand {
    test_param: String,
    enum_param: Option<SampleEnum>,
    numeric_param: Option<i64>,
    flag: bool,
}

impl SampleCommand {
    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<i32> {
        let current_path = ctx.current_path().display().to_string();
        let out = ctx.stdout();
        writeln!(out, "{}", current_path)?;
        writeln!(out, "{}", self.test_param)?;
        match self.enum_param {
            Some(value) => writeln!(out, "{:?}", value)?,
            None => writeln!(out, "none")?,
        }
        match self.numeric_param {
            Some(value) => writeln!(out, "{}", value)?,
            None => writeln!(out, "none")?,
        }
        writeln!(out, "{}", self.flag)?;
        Ok(0)
    }
}

impl Command for SampleCommand {
    fn spec() -> CommandSpec<Self> {
        CommandSpec::new("test", "this is a test command")
            .parameter(
                Parameter::new()
                    .short("testParam")
                    .description("a test parameter")
                    .mandatory()
                    .string(|cmd: &mut Self, v| cmd.test_param = v),
            )
            .parameter(
                Parameter::new()
                    .short("enumParam")
                    .description("an enumerated parameter")
                    .enumeration(|cmd: &mut Self, v: SampleEnum| cmd.enum_param = Some(v)),
            )
            .parameter(
                Parameter::new()
                    .short("numericParam")
                    .description("a numeric parameter")
                    .integer(|cmd: &mut Self, v| cmd.numeric_param = Some(v)),
            )
            .parameter(
                Parameter::new()
                    .short("flag")
                    .description("a boolean flag")
                    .flag(|cmd: &mut Self, v| cmd.flag = v),
            )
            .run(Self::execute)
    }
}

// --- background ---

/// A command that does its work without producing an exit code.
#[derive(Debug, Default)]
pub struct BackgroundApp;

impl BackgroundApp {
    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<()> {
        let current_path = ctx.current_path().display().to_string();
        writeln!(ctx.stdout(), "{}", current_path)?;
        writeln!(ctx.stdout(), "Started in the background")?;
        log::info!("Background command started in {}", current_path);
        Ok(())
    }
}

impl Command for BackgroundApp {
    fn spec() -> CommandSpec<Self> {
        CommandSpec::new("background", "Runs in the background")
            .background()
            .run_in_background(Self::execute)
    }
}

// --- sample ---

/// Shows options reachable through both a short and a long name.
#[derive(Debug, Default)]
pub struct ParametersCommand {
    parameter1: Option<String>,
    parameter2: Option<String>,
}

impl ParametersCommand {
    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<i32> {
        writeln!(
            ctx.stdout(),
            "Parameters: {} {}",
            self.parameter1.as_deref().unwrap_or("-"),
            self.parameter2.as_deref().unwrap_or("-")
        )?;
        Ok(0)
    }
}

impl Command for ParametersCommand {
    fn spec() -> CommandSpec<Self> {
        CommandSpec::new("sample", "Prints its two parameters")
            .parameter(
                Parameter::new()
                    .short("param1")
                    .long("parameter1")
                    .description("the first parameter")
                    .string(|cmd: &mut Self, v| cmd.parameter1 = Some(v)),
            )
            .parameter(
                Parameter::new()
                    .short("param2")
                    .long("parameter2")
                    .description("the second parameter")
                    .string(|cmd: &mut Self, v| cmd.parameter2 = Some(v)),
            )
            .run(Self::execute)
    }
}

// --- size ---

/// Prints the disk usage of files and directories, directories summed recursively.
#[derive(Debug)]
pub struct SizeCommand {
    human_readable: bool,
    width: i64,
    files: Vec<String>,
}

impl Default for SizeCommand {
    fn default() -> Self {
        Self {
            human_readable: false,
            width: DEFAULT_SIZE_WIDTH,
            files: Vec::new(),
        }
    }
}

impl SizeCommand {
    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<i32> {
        let Ok(width) = usize::try_from(self.width) else {
            bail!("the column width must not be negative (got {})", self.width);
        };

        let targets: Vec<PathBuf> = if self.files.is_empty() {
            vec![ctx.current_path().to_path_buf()]
        } else {
            self.files
                .iter()
                .map(|file| ctx.current_path().join(file))
                .collect()
        };

        let mut code = 0;
        for (target, shown) in targets.iter().zip(self.shown_names()) {
            match disk_usage(target) {
                Ok(bytes) => {
                    let size = if self.human_readable {
                        format::human_readable(bytes)
                    } else {
                        bytes.to_string()
                    };
                    writeln!(ctx.stdout(), "{}  {}", format::fit(&size, width, true), shown)?;
                }
                Err(e) => {
                    log::debug!("Could not size {}: {}", target.display(), e);
                    writeln!(ctx.stderr(), "size: cannot access '{}': {}", shown, e)?;
                    code = 1;
                }
            }
        }
        Ok(code)
    }

    fn shown_names(&self) -> Vec<String> {
        if self.files.is_empty() {
            vec![".".to_string()]
        } else {
            self.files.clone()
        }
    }
}

impl Command for SizeCommand {
    fn spec() -> CommandSpec<Self> {
        CommandSpec::new("size", "Prints the size of files and directories")
            .parameter(
                Parameter::new()
                    .short("h")
                    .long("human-readable")
                    .description("print sizes like 1.2K, 234.0M, 2.0G")
                    .flag(|cmd: &mut Self, v| cmd.human_readable = v),
            )
            .parameter(
                Parameter::new()
                    .short("w")
                    .long("width")
                    .description("width of the size column")
                    .integer(|cmd: &mut Self, v| cmd.width = v),
            )
            .variadic("files", |cmd: &mut Self, v| cmd.files = v)
            .run(Self::execute)
    }
}

/// Total size in bytes of a file, or of every file below a directory.
fn disk_usage(path: &Path) -> Result<u64> {
    let metadata = path.symlink_metadata()?;
    if !metadata.is_dir() {
        return Ok(metadata.len());
    }

    let mut total = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

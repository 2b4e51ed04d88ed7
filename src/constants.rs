// src/constants.rs

/// Exit code for unexpected resolution, instantiation, contract or invocation failures.
pub const SENTINEL_CODE: i32 = -1337;

/// Exit code returned after printing help for a missing mandatory option.
pub const MISSING_OPTION_CODE: i32 = -1;

/// Exit code when no command identifier was given at all.
pub const MISSING_COMMAND_CODE: i32 = -1;

/// The single argument that short-circuits dispatch into help rendering.
pub const HELP_FLAG: &str = "--help";

/// Environment variable overriding the crate's log level.
pub const LOG_LEVEL_ENV: &str = "CMDKIT_LOG_LEVEL";

/// Environment variable pointing at an explicit properties file.
pub const PROPERTIES_ENV: &str = "CMDKIT_PROPERTIES";

/// The name of the properties file looked up next to the executable.
pub const PROPERTIES_FILENAME: &str = "cli.toml";

/// Log target used by the phase timers.
pub const TIMING_TARGET: &str = "cmdkit::timing";

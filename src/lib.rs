//! Declarative command dispatch: a command describes its options and entry
//! routine as data, and the dispatcher turns raw arguments into a validated,
//! typed invocation.

/// Registry, resolution, dispatch and the binary's front end.
pub mod cli;
pub mod command;
/// Exit codes, environment variable names and other fixed values.
pub mod constants;
/// What entry routines receive.
pub mod context;
/// Schema, tokenizer, coercion, binding and help rendering.
pub mod core;
/// Phase timing.
pub mod dev_utils;
/// Error taxonomy and exit codes.
pub mod errors;
/// Descriptors and runtime values.
pub mod models;
pub mod samples;

// src/core/mod.rs

/// Splits raw arguments into option occurrences and positional tokens.
pub mod arg_parser;
/// Binds parsed arguments onto a command instance.
pub mod binder;
/// Raw token to typed value conversion.
pub mod coercion;
/// Output formatting helpers.
pub mod format;
/// Usage text rendering.
pub mod help;
/// The option schema derived from a descriptor.
pub mod schema;

// src/core/binder.rs

use crate::{
    command::Bindings,
    core::{arg_parser::ParsedArgs, coercion, schema::Schema},
    errors::{CliError, CoercionErrors},
    models::{Value, ValueType},
};

/// Parses `cli_params` against `schema` and binds every recognised option onto
/// `instance` through its accessor.
///
/// Steps, in order:
/// 1. Tokenize; unknown options fail immediately.
/// 2. Pre-set every flag to `false`.
/// 3. Fail with [`CliError::MissingMandatoryOption`] if a mandatory option is absent.
///    This is reported on its own, never merged with coercion failures.
/// 4. Coerce and bind each occurrence, collecting coercion failures into one error.
/// 5. Hand leftover positional tokens to the variadic slot, or reject them.
pub fn bind<C>(
    instance: &mut C,
    schema: &Schema,
    bindings: &Bindings<C>,
    cli_params: &[String],
) -> Result<(), CliError> {
    let parsed = ParsedArgs::parse(schema, cli_params)?;

    // Flags are assumed off until proven otherwise.
    for option in schema.options() {
        if let ValueType::Flag = option.value_type {
            if let Some(setter) = bindings.setters.get(option.index) {
                setter(instance, Value::Flag(false))
                    .map_err(|e| CliError::from(CoercionErrors(vec![e])))?;
            }
        }
    }

    let missing: Vec<String> = schema
        .mandatory()
        .filter(|option| !parsed.contains(option.index))
        .map(|option| option.display_name())
        .collect();
    if !missing.is_empty() {
        return Err(CliError::MissingMandatoryOption(missing));
    }

    let mut errors = Vec::new();
    for arg in parsed.named() {
        let (Some(option), Some(setter)) =
            (schema.option(arg.index), bindings.setters.get(arg.index))
        else {
            continue;
        };
        let bound = coercion::coerce(option.value_type, &option.display_name(), arg.value)
            .and_then(|value| setter(instance, value));
        if let Err(e) = bound {
            log::debug!("Could not bind {}: {}", option.display_name(), e);
            errors.push(e);
        }
    }
    if !errors.is_empty() {
        return Err(CoercionErrors(errors).into());
    }

    let leftovers = parsed.positional();
    match &bindings.variadic {
        Some(set_variadic) => {
            if !leftovers.is_empty() {
                set_variadic(instance, leftovers.iter().map(|s| s.to_string()).collect());
            }
        }
        None => {
            if !leftovers.is_empty() {
                return Err(CliError::UnrecognizedArguments(
                    leftovers.iter().map(|s| s.to_string()).collect(),
                ));
            }
        }
    }

    Ok(())
}

// MARK: --- UNIT TESTS ---

// src/core/arg_parser.rs

use crate::{
    core::schema::{OptionSpec, Schema},
    errors::CliError,
};

/// One occurrence of a recognised option on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedArg<'a> {
    /// Index of the option in the schema.
    pub index: usize,
    /// `Some("val")` for `-key val` or `--key=val`, `None` for a bare `-key`.
    pub value: Option<&'a str>,
}

/// How a single raw token relates to the schema.
enum Token<'s, 'a> {
    Option {
        spec: &'s OptionSpec,
        inline: Option<&'a str>,
    },
    Unknown,
    Positional,
}

/// The command line split into recognised option occurrences and leftover
/// positional tokens, validated against a [`Schema`].
///
/// Parsing borrows from the original arguments and performs no allocations
/// beyond the two vectors.
#[derive(Debug, Clone)]
pub struct ParsedArgs<'a> {
    named: Vec<NamedArg<'a>>,
    positional: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits the raw parameters according to the schema.
    ///
    /// # Logic:
    /// - `--name` looks up long names, `-name` looks up short names and then long names.
    ///   Either form accepts an inline `=value`.
    /// - A value-taking option consumes the next token unless it is a recognised option
    ///   or `--`, so `-pattern -x` binds `-x`. A short name may also carry its value
    ///   attached, as in `-w6`.
    /// - A flag only consumes the next token (which coercion will then reject) when the
    ///   command has no variadic slot to hand it to.
    /// - `--` ends option parsing. Unknown options are rejected, except tokens that
    ///   parse as numbers, which are positional.
    pub fn parse(schema: &Schema, cli_params: &'a [String]) -> Result<Self, CliError> {
        let mut named = Vec::new();
        let mut positional = Vec::new();
        let mut params_iter = cli_params.iter().map(String::as_str).peekable();

        while let Some(param) = params_iter.next() {
            if param == "--" {
                positional.extend(params_iter.by_ref());
                break;
            }

            match classify(schema, param) {
                Token::Option { spec, inline } => {
                    let value = if inline.is_some() {
                        inline
                    } else if spec.requires_value {
                        params_iter.next_if(|next| {
                            *next != "--" && !matches!(classify(schema, next), Token::Option { .. })
                        })
                    } else if !schema.allows_trailing() {
                        params_iter.next_if(|next| !next.starts_with('-'))
                    } else {
                        None
                    };
                    named.push(NamedArg {
                        index: spec.index,
                        value,
                    });
                }
                Token::Unknown => return Err(CliError::UnknownOption(param.to_string())),
                Token::Positional => positional.push(param),
            }
        }

        log::debug!(
            "Parsed {} option occurrences and {} positional tokens",
            named.len(),
            positional.len()
        );
        Ok(Self { named, positional })
    }

    /// Recognised option occurrences, in command-line order.
    pub fn named(&self) -> &[NamedArg<'a>] {
        &self.named
    }

    /// Tokens that were not consumed by any option, in command-line order.
    pub fn positional(&self) -> &[&'a str] {
        &self.positional
    }

    /// Whether the option at `index` occurs at least once.
    pub fn contains(&self, index: usize) -> bool {
        self.named.iter().any(|arg| arg.index == index)
    }
}

fn classify<'s, 'a>(schema: &'s Schema, param: &'a str) -> Token<'s, 'a> {
    if let Some(body) = param.strip_prefix("--") {
        if body.is_empty() {
            return Token::Positional;
        }
        let (name, inline) = split_inline(body);
        return match schema.find_long(name) {
            Some(spec) => Token::Option { spec, inline },
            None => Token::Unknown,
        };
    }

    if let Some(body) = param.strip_prefix('-') {
        if body.is_empty() {
            return Token::Positional;
        }
        if let Some(spec) = lookup_single_dash(schema, body) {
            return Token::Option { spec, inline: None };
        }
        let (name, inline) = split_inline(body);
        if inline.is_some() {
            if let Some(spec) = lookup_single_dash(schema, name) {
                return Token::Option { spec, inline };
            }
        }
        if let Some((spec, value)) = split_attached(schema, body) {
            return Token::Option {
                spec,
                inline: Some(value),
            };
        }
        return if param.parse::<f64>().is_ok() {
            Token::Positional
        } else {
            Token::Unknown
        };
    }

    Token::Positional
}

fn lookup_single_dash<'s>(schema: &'s Schema, name: &str) -> Option<&'s OptionSpec> {
    schema.find_short(name).or_else(|| schema.find_long(name))
}

/// Splits `-w6` style tokens: the longest value-taking short name that prefixes
/// the body claims the rest as its value.
fn split_attached<'s, 'a>(schema: &'s Schema, body: &'a str) -> Option<(&'s OptionSpec, &'a str)> {
    schema
        .options()
        .iter()
        .filter(|option| option.requires_value)
        .filter_map(|option| {
            let short = option.short.as_deref()?;
            let value = body.strip_prefix(short)?;
            (!value.is_empty()).then_some((option, short.len(), value))
        })
        .max_by_key(|(_, len, _)| *len)
        .map(|(option, _, value)| (option, value))
}

fn split_inline(body: &str) -> (&str, Option<&str>) {
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

// MARK: --- UNIT TESTS ---

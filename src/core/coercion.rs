// src/core/coercion.rs

use crate::{
    errors::CoercionError,
    models::{Value, ValueType},
};

/// Converts a raw option token into a typed value.
///
/// `option` names the option being coerced and is only used in messages.
/// Flags must arrive without a value; every other type requires one.
pub fn coerce(value_type: ValueType, option: &str, raw: Option<&str>) -> Result<Value, CoercionError> {
    match (value_type, raw) {
        (ValueType::Flag, None) => Ok(Value::Flag(true)),
        (ValueType::Flag, Some(value)) => Err(CoercionError::FlagWithValue {
            option: option.to_string(),
            value: value.to_string(),
        }),
        (_, None) => Err(CoercionError::MissingValue {
            target: value_type.to_string(),
        }),
        (ValueType::String, Some(raw)) => Ok(Value::Text(raw.to_string())),
        (ValueType::Integer, Some(raw)) => raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| invalid_number(raw, value_type)),
        (ValueType::Float, Some(raw)) => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid_number(raw, value_type)),
        (ValueType::Enumeration { name, members }, Some(raw)) => match_member(raw, members)
            .map(Value::Member)
            .ok_or_else(|| CoercionError::UnknownMember {
                value: raw.to_string(),
                enumeration: name.to_string(),
            }),
    }
}

/// Case-insensitive lookup of an enumeration member; the input is uppercased first.
pub fn match_member(raw: &str, members: &'static [&'static str]) -> Option<&'static str> {
    let wanted = raw.to_uppercase();
    members
        .iter()
        .copied()
        .find(|member| member.to_uppercase() == wanted)
}

fn invalid_number(raw: &str, value_type: ValueType) -> CoercionError {
    CoercionError::InvalidNumber {
        token: raw.to_string(),
        target: value_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: ValueType = ValueType::Enumeration {
        name: "Shape",
        members: &["CIRCLE", "SQUARE"],
    };

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            coerce(ValueType::String, "-s", Some("lalala")).unwrap(),
            Value::Text("lalala".to_string())
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            coerce(ValueType::Integer, "-n", Some("234")).unwrap(),
            Value::Integer(234)
        );
        assert_eq!(
            coerce(ValueType::Integer, "-n", Some("-7")).unwrap(),
            Value::Integer(-7)
        );
        assert_eq!(
            coerce(ValueType::Float, "-f", Some("2.5")).unwrap(),
            Value::Float(2.5)
        );
    }

    #[test]
    fn test_non_numeric_input_names_token_and_type() {
        let err = coerce(ValueType::Integer, "-n", Some("thisIsNotANumber")).unwrap_err();
        assert_eq!(
            err,
            CoercionError::InvalidNumber {
                token: "thisIsNotANumber".to_string(),
                target: "integer".to_string()
            }
        );
        assert!(coerce(ValueType::Float, "-f", Some("1,5")).is_err());
    }

    #[test]
    fn test_enum_matching_ignores_case() {
        for input in ["square", "SQUARE", "sQuArE"] {
            assert_eq!(
                coerce(SHAPES, "-e", Some(input)).unwrap(),
                Value::Member("SQUARE")
            );
        }
    }

    #[test]
    fn test_enum_unknown_member() {
        let err = coerce(SHAPES, "-e", Some("triangle")).unwrap_err();
        assert_eq!(err.to_string(), "Could not parse triangle to type Shape");
    }

    #[test]
    fn test_missing_value_for_non_boolean() {
        let err = coerce(SHAPES, "-e", None).unwrap_err();
        assert_eq!(err.to_string(), "Could not parse an empty value to type Shape");
        assert!(matches!(
            coerce(ValueType::String, "-s", None),
            Err(CoercionError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_flag_presence_and_values() {
        assert_eq!(coerce(ValueType::Flag, "-flag", None).unwrap(), Value::Flag(true));
        // Even a literal "true" is rejected.
        let err = coerce(ValueType::Flag, "-flag", Some("true")).unwrap_err();
        assert!(err.to_string().starts_with("Boolean types do not allow a value"));
    }
}

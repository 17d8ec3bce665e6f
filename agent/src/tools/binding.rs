//! Argument binding
//!
//! Checks a raw argument value against a tool's [`InputSchema`] before the
//! handler sees it.

use serde_json::{Map, Value};

use crate::openapi::InputSchema;

/// Why a set of arguments does not fit a tool's input schema
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),

    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("argument '{name}' should be of type {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: &'static str,
    },

    #[error("argument '{name}' must be one of {allowed}")]
    NotInEnum { name: String, allowed: String },
}

/// Validate `args` against `schema`, returning the argument object
///
/// A `null` value for an optional argument is treated as absent and
/// dropped. Whole-valued floats given for `integer` properties are
/// rewritten as integers so typed parameters deserialize them.
pub fn bind_arguments(
    schema: &InputSchema,
    args: Value,
) -> Result<Map<String, Value>, BindingError> {
    let mut args = match args {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => return Err(BindingError::NotAnObject(json_type_name(&other))),
    };

    if let Some(unknown) = args.keys().find(|k| !schema.properties.contains_key(k.as_str())) {
        return Err(BindingError::UnknownArgument(unknown.clone()));
    }

    args.retain(|name, value| !value.is_null() || schema.required.contains(name));

    for name in &schema.required {
        if !args.contains_key(name) {
            return Err(BindingError::MissingArgument(name.clone()));
        }
    }

    for (name, value) in args.iter_mut() {
        let Some(property) = schema.properties.get(name) else {
            continue;
        };
        check_property(name, property, value)?;
        if property.get("type").and_then(Value::as_str) == Some("integer") {
            normalize_integer(value);
        }
    }

    Ok(args)
}

fn check_property(name: &str, property: &Value, value: &Value) -> Result<(), BindingError> {
    if let Some(expected) = property.get("type").and_then(Value::as_str) {
        if !matches_type(expected, value) {
            return Err(BindingError::TypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: json_type_name(value),
            });
        }
    }

    if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            let allowed = allowed
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(BindingError::NotInEnum {
                name: name.to_string(),
                allowed,
            });
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => {
            value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // unknown type keywords are not enforced
        _ => true,
    }
}

/// `2.0` becomes `2`; values already stored as integers are untouched
fn normalize_integer(value: &mut Value) {
    if value.is_i64() || value.is_u64() {
        return;
    }
    let Some(f) = value.as_f64() else {
        return;
    };
    if (0.0..=u64::MAX as f64).contains(&f) {
        *value = Value::from(f as u64);
    } else if f >= i64::MIN as f64 {
        *value = Value::from(f as i64);
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

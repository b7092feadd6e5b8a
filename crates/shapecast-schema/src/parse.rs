//! # Value Parsing
//!
//! Walks a `ModelDeclaration` together with a decoded JSON value and
//! produces a populated `ModelInstance`, mirroring the schema deriver's
//! traversal exactly: anything the deriver claims about a field's shape,
//! the parser enforces when reading that field back.
//!
//! ## Leniencies, Preserved Deliberately
//!
//! Two behaviors are looser than the derived schema advertises; both are
//! kept for compatibility with existing consumers:
//!
//! - Declared fields absent from the input are silently left unset. No
//!   missing-required-field error is raised.
//! - An explicit `null` is assigned unconditionally, whether or not the
//!   field was declared nullable.
//!
//! Undeclared input keys are ignored. Scalar coercion is total: it bends
//! the value to the declared primitive kind and never fails. Shape
//! violations — a non-object where a nested model is declared, a non-array
//! where a model array is declared, a non-object array element — fail with
//! `ParseError::TypeMismatch` naming the field and the actual JSON kind.

use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::debug;

use shapecast_core::{FieldDeclaration, FieldKind, ModelDeclaration, PrimitiveKind};

/// Error during value parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input text was not valid JSON.
    #[error("invalid JSON: {reason}")]
    InvalidJson {
        /// The decoder's diagnostic.
        reason: String,
    },

    /// A JSON value's runtime shape disagrees with the field's declared
    /// kind. The message names the offending field and the actual kind.
    #[error("{message}")]
    TypeMismatch {
        /// The field (or model, at top level) whose value mismatched.
        field: String,
        /// Human-readable description of the mismatch.
        message: String,
    },
}

impl ParseError {
    fn expected_object(field: &str, actual: &Value) -> Self {
        ParseError::TypeMismatch {
            field: field.to_string(),
            message: format!("{field} must be an object, got {}", json_kind(actual)),
        }
    }

    fn expected_array(field: &str, actual: &Value) -> Self {
        ParseError::TypeMismatch {
            field: field.to_string(),
            message: format!("{field} must be an array, got {}", json_kind(actual)),
        }
    }

    fn expected_array_item(field: &str, actual: &Value) -> Self {
        ParseError::TypeMismatch {
            field: field.to_string(),
            message: format!(
                "Array item in '{field}' must be an object, got {}",
                json_kind(actual)
            ),
        }
    }
}

/// The runtime kind name of a JSON value, as used in mismatch messages.
/// Whole numbers report as `integer`, other numbers as `number`.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A parsed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An explicit `null` from the input.
    Null,
    /// A string-kind scalar.
    Str(String),
    /// An integer-kind scalar.
    Int(i64),
    /// A float-kind scalar.
    Float(f64),
    /// A boolean-kind scalar.
    Bool(bool),
    /// A value passed through uncoerced (untyped arrays, and non-scalars
    /// landing on primitive fields).
    Raw(Value),
    /// A nested model instance.
    Model(ModelInstance),
    /// An ordered sequence of element model instances.
    ModelList(Vec<ModelInstance>),
}

impl FieldValue {
    /// Serialize this value back to JSON.
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Int(n) => Value::Number(Number::from(*n)),
            FieldValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Raw(value) => value.clone(),
            FieldValue::Model(instance) => instance.to_value(),
            FieldValue::ModelList(instances) => {
                Value::Array(instances.iter().map(ModelInstance::to_value).collect())
            }
        }
    }
}

/// A populated model instance: an ordered map from field name to value.
///
/// Instances start empty and are filled field by field — there is no
/// constructor logic to trigger. Fields absent from the parsed input stay
/// unset and do not appear in the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    model: String,
    fields: Vec<(String, FieldValue)>,
}

impl ModelInstance {
    fn empty(model: &str) -> Self {
        Self {
            model: model.to_string(),
            fields: Vec::new(),
        }
    }

    fn set(&mut self, name: &str, value: FieldValue) {
        self.fields.push((name.to_string(), value));
    }

    /// The model name this instance conforms to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The set fields, in declaration order.
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Look up a set field by name. `None` means the field was unset.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Whether the named field was set during parsing.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Serialize the instance back to a JSON object of its set fields.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_value());
        }
        Value::Object(map)
    }
}

/// Decode JSON text and parse it against a model declaration.
///
/// # Errors
///
/// `InvalidJson` if the text does not decode; otherwise as
/// [`parse_value`].
pub fn parse_str(
    declaration: &ModelDeclaration,
    input: &str,
) -> Result<ModelInstance, ParseError> {
    let raw: Value = serde_json::from_str(input).map_err(|e| ParseError::InvalidJson {
        reason: e.to_string(),
    })?;
    parse_value(declaration, &raw)
}

/// Parse a decoded JSON value against a model declaration.
///
/// # Errors
///
/// `TypeMismatch` when a value's shape disagrees with its field's declared
/// kind. A nested parse failure propagates unchanged — the outer field name
/// is not prepended to the inner message.
pub fn parse_value(
    declaration: &ModelDeclaration,
    raw: &Value,
) -> Result<ModelInstance, ParseError> {
    let Value::Object(map) = raw else {
        return Err(ParseError::expected_object(declaration.name(), raw));
    };

    debug!(model = declaration.name(), "parsing value against declaration");
    let mut instance = ModelInstance::empty(declaration.name());
    for field in declaration.fields() {
        // Absent keys stay unset; no missing-required error.
        let Some(raw_field) = map.get(&field.name) else {
            continue;
        };
        instance.set(&field.name, parse_field(field, raw_field)?);
    }
    Ok(instance)
}

fn parse_field(field: &FieldDeclaration, raw: &Value) -> Result<FieldValue, ParseError> {
    // Null is assigned unconditionally, nullable or not.
    if raw.is_null() {
        return Ok(FieldValue::Null);
    }

    match &field.kind {
        FieldKind::NestedModel(nested) => {
            if !raw.is_object() {
                return Err(ParseError::expected_object(&field.name, raw));
            }
            parse_value(nested, raw).map(FieldValue::Model)
        }
        FieldKind::ModelArray(element) => {
            let Value::Array(items) = raw else {
                return Err(ParseError::expected_array(&field.name, raw));
            };
            let mut parsed = Vec::with_capacity(items.len());
            for item in items {
                if !item.is_object() {
                    return Err(ParseError::expected_array_item(&field.name, item));
                }
                parsed.push(parse_value(element, item)?);
            }
            Ok(FieldValue::ModelList(parsed))
        }
        FieldKind::UntypedArray => Ok(FieldValue::Raw(raw.clone())),
        FieldKind::Primitive(kind) => Ok(coerce_scalar(*kind, raw)),
    }
}

/// Coerce a scalar to the declared primitive kind. Total: non-scalars pass
/// through unchanged, and unparseable text coerces to the kind's zero
/// value, matching the loose cast semantics the schema consumers expect.
fn coerce_scalar(kind: PrimitiveKind, raw: &Value) -> FieldValue {
    match kind {
        PrimitiveKind::Str => match raw {
            Value::String(s) => FieldValue::Str(s.clone()),
            Value::Number(n) => FieldValue::Str(n.to_string()),
            Value::Bool(b) => FieldValue::Str(b.to_string()),
            other => FieldValue::Raw(other.clone()),
        },
        PrimitiveKind::Int => match raw {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Int(n.as_f64().unwrap_or(0.0) as i64)
                }
            }
            Value::Bool(b) => FieldValue::Int(i64::from(*b)),
            Value::String(s) => FieldValue::Int(
                s.trim()
                    .parse::<i64>()
                    .or_else(|_| s.trim().parse::<f64>().map(|f| f as i64))
                    .unwrap_or(0),
            ),
            other => FieldValue::Raw(other.clone()),
        },
        PrimitiveKind::Float => match raw {
            Value::Number(n) => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => FieldValue::Float(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => FieldValue::Float(s.trim().parse::<f64>().unwrap_or(0.0)),
            other => FieldValue::Raw(other.clone()),
        },
        PrimitiveKind::Bool => match raw {
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => FieldValue::Bool(n.as_f64().unwrap_or(0.0) != 0.0),
            Value::String(s) => FieldValue::Bool(!s.is_empty() && s != "0"),
            other => FieldValue::Raw(other.clone()),
        },
    }
}

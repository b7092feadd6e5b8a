//! # Function-Calling Envelope
//!
//! The `{name, schema, strict}` wrapper expected by structured-output /
//! tool-calling API conventions. A pure transform of a derived
//! `SchemaDocument`: the document's `name` moves to the envelope and is
//! removed from the embedded schema, and `strict` is always `true`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::derive::SchemaDocument;

/// A schema document wrapped for a function-calling API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCallSpec {
    /// The function name: the model's name.
    pub name: String,
    /// The emitted schema document, with its `name` key removed.
    pub schema: Value,
    /// Always `true`: the schema is to be enforced strictly.
    pub strict: bool,
}

impl FunctionCallSpec {
    /// Wrap a derived document as a function-calling spec.
    pub fn from_document(document: &SchemaDocument) -> Self {
        let mut schema = document.to_value();
        if let Value::Object(map) = &mut schema {
            map.shift_remove("name");
        }
        Self {
            name: document.name().to_string(),
            schema,
            strict: true,
        }
    }

    /// Emit the envelope as a JSON value with key order
    /// `name, schema, strict`.
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "schema": self.schema,
            "strict": self.strict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive;
    use shapecast_core::{FieldDeclaration, FieldKind, ModelDeclaration, PrimitiveKind};

    fn product_declaration() -> ModelDeclaration {
        ModelDeclaration::new(
            "Product",
            vec![
                FieldDeclaration {
                    name: "name".to_string(),
                    kind: FieldKind::Primitive(PrimitiveKind::Str),
                    nullable: false,
                    description: None,
                },
                FieldDeclaration {
                    name: "price".to_string(),
                    kind: FieldKind::Primitive(PrimitiveKind::Float),
                    nullable: true,
                    description: None,
                },
            ],
        )
    }

    #[test]
    fn test_envelope_shape() {
        let document = derive(&product_declaration());
        let spec = FunctionCallSpec::from_document(&document);

        assert_eq!(spec.name, "Product");
        assert!(spec.strict);

        // The embedded schema is the document minus its name key.
        let mut expected = document.to_value();
        expected.as_object_mut().unwrap().shift_remove("name");
        assert_eq!(spec.schema, expected);
        assert!(spec.schema.get("name").is_none());
        assert_eq!(spec.schema["type"], "object");
    }

    #[test]
    fn test_envelope_key_order() {
        let spec = FunctionCallSpec::from_document(&derive(&product_declaration()));
        let value = spec.to_value();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["name", "schema", "strict"]);

        // Schema key order survives the name removal.
        let schema_keys: Vec<&String> = value["schema"].as_object().unwrap().keys().collect();
        assert_eq!(
            schema_keys,
            ["type", "properties", "additionalProperties", "required"]
        );
    }
}

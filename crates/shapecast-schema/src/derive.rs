//! # Schema Derivation
//!
//! Walks a `ModelDeclaration` and produces a `SchemaDocument` — the JSON
//! Schema tree describing the model's allowed value shape. Derivation is
//! leaf-first: primitive fields resolve immediately, nested-model and
//! model-array fields recurse into the deriver for the referenced
//! declaration.
//!
//! ## Shape Rules
//!
//! - Nested models are **inlined**, never `$ref`'d. A model referenced in
//!   two places produces two independent subtrees.
//! - A model-array field gets `items` = the element model's full document;
//!   an untyped array falls back to `items: {"type": "string"}`.
//! - A nullable primitive gets the union type `[<type>, "null"]`.
//! - Every field name lands in `required`, nullable or not — nullability is
//!   expressed only through the type union, never by omission.
//! - A captured description attaches to the field's outer node; inlined
//!   nested documents are not modified.
//!
//! Derivation is infallible: the introspector has already rejected anything
//! unclassifiable or cyclic, so the declaration tree is finite and fully
//! resolved.
//!
//! ## Emission
//!
//! `SchemaDocument::to_value` emits keys in a stable order — `name, type,
//! properties, additionalProperties, required` — recursively for nested
//! documents, with `properties` preserving declaration order.

use serde_json::{json, Map, Value};
use shapecast_core::{FieldKind, ModelDeclaration};

/// One node of a schema document: a primitive type, an inlined nested
/// document, or an array.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A scalar field: `{"type": <t>}`, or `{"type": [<t>, "null"]}` when
    /// nullable.
    Primitive {
        /// JSON Schema type name (`"integer"`, `"number"`, `"boolean"`,
        /// `"string"`).
        json_type: &'static str,
        /// Whether the type is a union with `"null"`.
        nullable: bool,
        /// Optional field description.
        description: Option<String>,
    },
    /// An inlined nested model document.
    Object {
        /// The nested model's full schema document.
        document: SchemaDocument,
        /// Optional field description, attached alongside the inlined
        /// document's own keys.
        description: Option<String>,
    },
    /// An array field.
    Array {
        /// The element schema.
        items: Box<SchemaNode>,
        /// Optional field description.
        description: Option<String>,
    },
}

impl SchemaNode {
    /// Emit this node as a JSON value with stable key order.
    pub fn to_value(&self) -> Value {
        match self {
            SchemaNode::Primitive {
                json_type,
                nullable,
                description,
            } => {
                let mut map = Map::new();
                let type_value = if *nullable {
                    json!([json_type, "null"])
                } else {
                    json!(json_type)
                };
                map.insert("type".to_string(), type_value);
                if let Some(text) = description {
                    map.insert("description".to_string(), json!(text));
                }
                Value::Object(map)
            }
            SchemaNode::Object {
                document,
                description,
            } => {
                let mut value = document.to_value();
                if let (Value::Object(map), Some(text)) = (&mut value, description) {
                    map.insert("description".to_string(), json!(text));
                }
                value
            }
            SchemaNode::Array { items, description } => {
                let mut map = Map::new();
                map.insert("type".to_string(), json!("array"));
                map.insert("items".to_string(), items.to_value());
                if let Some(text) = description {
                    map.insert("description".to_string(), json!(text));
                }
                Value::Object(map)
            }
        }
    }
}

/// A derived JSON Schema document for one model.
///
/// `properties` preserves field declaration order; `required` lists every
/// field name in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    name: String,
    properties: Vec<(String, SchemaNode)>,
    required: Vec<String>,
}

impl SchemaDocument {
    /// The model name this document describes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The property nodes, in declaration order.
    pub fn properties(&self) -> &[(String, SchemaNode)] {
        &self.properties
    }

    /// All field names, in declaration order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Look up a property node by field name.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, node)| node)
    }

    /// Emit the document as a JSON value.
    ///
    /// Key order is `name, type, properties, additionalProperties,
    /// required`; nested documents use the same order recursively.
    pub fn to_value(&self) -> Value {
        let mut properties = Map::new();
        for (name, node) in &self.properties {
            properties.insert(name.clone(), node.to_value());
        }

        let mut map = Map::new();
        map.insert("name".to_string(), json!(self.name));
        map.insert("type".to_string(), json!("object"));
        map.insert("properties".to_string(), Value::Object(properties));
        map.insert("additionalProperties".to_string(), json!(false));
        map.insert("required".to_string(), json!(self.required));
        Value::Object(map)
    }

    /// Emit the document as pretty-printed JSON text.
    pub fn to_json_pretty(&self) -> String {
        let value = self.to_value();
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

/// Derive the schema document for a model declaration.
///
/// Walks the fields in declaration order, recursing into nested and
/// element declarations. Infallible by construction (see module docs).
pub fn derive(declaration: &ModelDeclaration) -> SchemaDocument {
    let mut properties = Vec::with_capacity(declaration.fields().len());
    let mut required = Vec::with_capacity(declaration.fields().len());

    for field in declaration.fields() {
        let node = match &field.kind {
            FieldKind::Primitive(kind) => SchemaNode::Primitive {
                json_type: kind.json_type(),
                nullable: field.nullable,
                description: field.description.clone(),
            },
            FieldKind::NestedModel(nested) => SchemaNode::Object {
                document: derive(nested),
                description: field.description.clone(),
            },
            FieldKind::ModelArray(element) => SchemaNode::Array {
                items: Box::new(SchemaNode::Object {
                    document: derive(element),
                    description: None,
                }),
                description: field.description.clone(),
            },
            FieldKind::UntypedArray => SchemaNode::Array {
                items: Box::new(SchemaNode::Primitive {
                    json_type: "string",
                    nullable: false,
                    description: None,
                }),
                description: field.description.clone(),
            },
        };
        properties.push((field.name.clone(), node));
        required.push(field.name.clone());
    }

    SchemaDocument {
        name: declaration.name().to_string(),
        properties,
        required,
    }
}

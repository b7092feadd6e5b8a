//! # Declaration Data Model
//!
//! The typed description of a model that the introspector produces and that
//! the deriver and parser both consume. A `ModelDeclaration` is a named,
//! ordered sequence of `FieldDeclaration`s; nested-model and array-element
//! references are embedded as full sub-declarations, so the tree is finite
//! and self-contained once built.
//!
//! Declarations are immutable values with no shared state. They are produced
//! fresh on every introspection and owned exclusively by their holder.

use serde::{Deserialize, Serialize};

/// The scalar kinds a primitive field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Whole numbers. JSON Schema type `"integer"`.
    Int,
    /// Floating-point numbers. JSON Schema type `"number"`.
    Float,
    /// Booleans. JSON Schema type `"boolean"`.
    Bool,
    /// Text, and the fallback for untyped fields. JSON Schema type `"string"`.
    Str,
}

impl PrimitiveKind {
    /// The JSON Schema type name for this primitive kind.
    pub fn json_type(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "integer",
            PrimitiveKind::Float => "number",
            PrimitiveKind::Bool => "boolean",
            PrimitiveKind::Str => "string",
        }
    }
}

/// What shape a declared field has.
///
/// Exactly one variant applies to any field; nullability is orthogonal and
/// lives on [`FieldDeclaration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// A scalar field of the given primitive kind.
    Primitive(PrimitiveKind),
    /// A field holding one instance of another model, embedded in full.
    NestedModel(ModelDeclaration),
    /// An array field whose elements are instances of the embedded model.
    ModelArray(ModelDeclaration),
    /// An array field with no resolvable element model. Schemas fall back
    /// to string items; parsed values pass through unchanged.
    UntypedArray,
}

/// One field of a model declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// The field name, as it appears in schemas and JSON payloads.
    pub name: String,
    /// The field's shape.
    pub kind: FieldKind,
    /// Whether the declared type was marked nullable.
    pub nullable: bool,
    /// Free-text description captured from the field's documentation.
    pub description: Option<String>,
}

/// A named, ordered collection of field declarations.
///
/// Identity is the model name: it becomes the Schema Document's `name` and
/// the inlining key for nested references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDeclaration {
    name: String,
    fields: Vec<FieldDeclaration>,
}

impl ModelDeclaration {
    /// Construct a declaration from a name and an ordered field list.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The model's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields, in declaration order.
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    /// Look up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }
}

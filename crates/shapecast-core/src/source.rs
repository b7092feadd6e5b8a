//! # Model Sources
//!
//! The raw, pre-introspection description of a model: field names, declared
//! type tokens, and documentation text. This is the seam where a host
//! environment plugs its own type metadata into shapecast — whatever
//! produces `ModelSource` values (hand-written builders, codegen, config
//! files) replaces the reflection layer of a dynamic language.
//!
//! Type tokens are nominal: `"int"`, `"?float"`, `"string"`, `"array"`,
//! `"Tag[]"`, or the name of another registered model. Documentation text
//! may carry `@description <text>` and, for array fields, `@var <Model>[]`.

use serde::{Deserialize, Serialize};

/// One raw field of a model source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Field name.
    pub name: String,
    /// Declared nominal type, if any. `None` means untyped.
    pub type_token: Option<String>,
    /// Documentation text associated with the field, if any.
    pub doc: Option<String>,
}

/// A named, ordered collection of raw field sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSource {
    name: String,
    fields: Vec<FieldSource>,
}

impl ModelSource {
    /// Start a source description for the named model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a typed field.
    pub fn field(mut self, name: impl Into<String>, type_token: impl Into<String>) -> Self {
        self.fields.push(FieldSource {
            name: name.into(),
            type_token: Some(type_token.into()),
            doc: None,
        });
        self
    }

    /// Append a typed field with documentation text.
    pub fn field_with_doc(
        mut self,
        name: impl Into<String>,
        type_token: impl Into<String>,
        doc: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSource {
            name: name.into(),
            type_token: Some(type_token.into()),
            doc: Some(doc.into()),
        });
        self
    }

    /// Append a field with no declared type.
    pub fn untyped_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldSource {
            name: name.into(),
            type_token: None,
            doc: None,
        });
        self
    }

    /// The model's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw fields, in declaration order.
    pub fn fields(&self) -> &[FieldSource] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_field_order() {
        let source = ModelSource::new("Product")
            .field("name", "string")
            .field_with_doc("price", "?float", "@description unit price")
            .untyped_field("meta");

        assert_eq!(source.name(), "Product");
        let names: Vec<&str> = source.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "price", "meta"]);
        assert_eq!(source.fields()[2].type_token, None);
        assert_eq!(
            source.fields()[1].doc.as_deref(),
            Some("@description unit price")
        );
    }
}

//! # Declaration Introspector
//!
//! Resolves a registered `ModelSource` into a `ModelDeclaration`, classifying
//! every field as primitive, nested model, array of models, or untyped array.
//!
//! ## Classification
//!
//! A leading `?` on the type token marks the field nullable and is stripped
//! before classification. The remaining token resolves as:
//!
//! - `int`/`integer`, `float`/`double`/`number`, `bool`/`boolean`, `string`
//!   — the four primitive kinds;
//! - absent or empty — untyped, treated as `string`;
//! - `array` — an array field; the element model comes from a `@var Foo[]`
//!   documentation annotation, resolved against the registry. Without a
//!   resolvable annotation the field is an untyped array;
//! - `Foo[]` — shorthand for `array` + `@var Foo[]`;
//! - a registered model name — a nested model, resolved recursively;
//! - anything else — `UnsupportedFieldKind`.
//!
//! ## Cycle Guard
//!
//! Nested and element models are resolved depth-first while tracking the
//! stack of names currently being resolved. A model graph that references a
//! name already on the stack fails with `CyclicModel` naming the cycle path.
//! Every declaration the introspector returns is therefore a finite tree.

use tracing::debug;

use crate::declaration::{FieldDeclaration, FieldKind, ModelDeclaration, PrimitiveKind};
use crate::error::IntrospectError;
use crate::registry::ModelRegistry;
use crate::source::FieldSource;

/// Documentation tag carrying a field's free-text description.
const DESCRIPTION_TAG: &str = "@description";
/// Documentation tag naming an array field's element model.
const ELEMENT_MODEL_TAG: &str = "@var";

/// Resolves model sources into declarations against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Introspector<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> Introspector<'a> {
    /// Create an introspector bound to the given registry.
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the named model into a fresh declaration.
    ///
    /// # Errors
    ///
    /// Returns `UnknownModel` if the name is not registered,
    /// `UnsupportedFieldKind` if any field's type token cannot be
    /// classified, and `CyclicModel` if the model graph references a
    /// declaration already being resolved.
    pub fn introspect(&self, model_name: &str) -> Result<ModelDeclaration, IntrospectError> {
        debug!(model = model_name, "introspecting model source");
        let mut stack = Vec::new();
        self.resolve(model_name, &mut stack)
    }

    fn resolve(
        &self,
        model_name: &str,
        stack: &mut Vec<String>,
    ) -> Result<ModelDeclaration, IntrospectError> {
        if stack.iter().any(|entry| entry == model_name) {
            let mut path = stack.join(" -> ");
            path.push_str(" -> ");
            path.push_str(model_name);
            return Err(IntrospectError::CyclicModel { path });
        }

        let source = self
            .registry
            .get(model_name)
            .ok_or_else(|| IntrospectError::UnknownModel {
                name: model_name.to_string(),
            })?;

        stack.push(model_name.to_string());
        let mut fields = Vec::with_capacity(source.fields().len());
        for field in source.fields() {
            match self.classify(model_name, field, stack) {
                Ok(declaration) => fields.push(declaration),
                Err(err) => {
                    stack.pop();
                    return Err(err);
                }
            }
        }
        stack.pop();

        Ok(ModelDeclaration::new(source.name(), fields))
    }

    fn classify(
        &self,
        model_name: &str,
        field: &FieldSource,
        stack: &mut Vec<String>,
    ) -> Result<FieldDeclaration, IntrospectError> {
        let raw_token = field.type_token.as_deref().unwrap_or("").trim();
        let (token, nullable) = match raw_token.strip_prefix('?') {
            Some(stripped) => (stripped.trim(), true),
            None => (raw_token, false),
        };

        let doc = field.doc.as_deref();
        let description = doc.and_then(|text| doc_tag(text, DESCRIPTION_TAG));

        let kind = match token {
            "" => FieldKind::Primitive(PrimitiveKind::Str),
            "int" | "integer" => FieldKind::Primitive(PrimitiveKind::Int),
            "float" | "double" | "number" => FieldKind::Primitive(PrimitiveKind::Float),
            "bool" | "boolean" => FieldKind::Primitive(PrimitiveKind::Bool),
            "string" => FieldKind::Primitive(PrimitiveKind::Str),
            "array" => {
                let annotated = doc.and_then(|text| doc_tag(text, ELEMENT_MODEL_TAG));
                self.array_kind(annotated.as_deref(), stack)?
            }
            other => {
                if let Some(element) = other.strip_suffix("[]") {
                    self.array_kind(Some(element), stack)?
                } else if self.registry.contains(other) {
                    FieldKind::NestedModel(self.resolve(other, stack)?)
                } else {
                    return Err(IntrospectError::UnsupportedFieldKind {
                        model: model_name.to_string(),
                        field: field.name.clone(),
                        declared: raw_token.to_string(),
                    });
                }
            }
        };

        Ok(FieldDeclaration {
            name: field.name.clone(),
            kind,
            nullable,
            description,
        })
    }

    /// Classify an array field from its element annotation, if any.
    ///
    /// An annotation that names a registered model yields a model array;
    /// anything else falls back to an untyped array.
    fn array_kind(
        &self,
        annotation: Option<&str>,
        stack: &mut Vec<String>,
    ) -> Result<FieldKind, IntrospectError> {
        let Some(raw) = annotation else {
            return Ok(FieldKind::UntypedArray);
        };
        // Only the leading token counts; trailing prose is ignored.
        let element = raw
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_end_matches("[]");
        if element.is_empty() || !self.registry.contains(element) {
            return Ok(FieldKind::UntypedArray);
        }
        Ok(FieldKind::ModelArray(self.resolve(element, stack)?))
    }
}

/// Capture the text following `tag` on its line, trimmed.
///
/// Only the first occurrence is considered; an empty capture yields `None`.
fn doc_tag(doc: &str, tag: &str) -> Option<String> {
    for line in doc.lines() {
        if let Some(index) = line.find(tag) {
            let rest = line[index + tag.len()..].trim();
            if rest.is_empty() {
                return None;
            }
            return Some(rest.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ModelSource;

    fn registry_with(sources: Vec<ModelSource>) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for source in sources {
            registry.register(source);
        }
        registry
    }

    #[test]
    fn test_primitive_tokens_classify() {
        let registry = registry_with(vec![ModelSource::new("Sample")
            .field("count", "int")
            .field("total", "integer")
            .field("ratio", "float")
            .field("precise", "double")
            .field("amount", "number")
            .field("active", "bool")
            .field("enabled", "boolean")
            .field("label", "string")]);

        let decl = Introspector::new(&registry).introspect("Sample").unwrap();
        let kinds: Vec<_> = decl
            .fields()
            .iter()
            .map(|f| match f.kind {
                FieldKind::Primitive(kind) => kind,
                ref other => panic!("expected primitive, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            [
                PrimitiveKind::Int,
                PrimitiveKind::Int,
                PrimitiveKind::Float,
                PrimitiveKind::Float,
                PrimitiveKind::Float,
                PrimitiveKind::Bool,
                PrimitiveKind::Bool,
                PrimitiveKind::Str,
            ]
        );
    }

    #[test]
    fn test_nullable_prefix_is_stripped() {
        let registry = registry_with(vec![ModelSource::new("Sample")
            .field("price", "?float")
            .field("name", "string")]);

        let decl = Introspector::new(&registry).introspect("Sample").unwrap();
        assert!(decl.fields()[0].nullable);
        assert_eq!(
            decl.fields()[0].kind,
            FieldKind::Primitive(PrimitiveKind::Float)
        );
        assert!(!decl.fields()[1].nullable);
    }

    #[test]
    fn test_untyped_field_is_string() {
        let registry = registry_with(vec![ModelSource::new("Sample").untyped_field("anything")]);
        let decl = Introspector::new(&registry).introspect("Sample").unwrap();
        assert_eq!(
            decl.fields()[0].kind,
            FieldKind::Primitive(PrimitiveKind::Str)
        );
    }

    #[test]
    fn test_description_tag_captured_to_line_end() {
        let registry = registry_with(vec![ModelSource::new("Sample").field_with_doc(
            "price",
            "float",
            "Some preamble\n@description unit price in cents\n@var ignored",
        )]);
        let decl = Introspector::new(&registry).introspect("Sample").unwrap();
        assert_eq!(
            decl.fields()[0].description.as_deref(),
            Some("unit price in cents")
        );
    }

    #[test]
    fn test_nested_model_resolves_recursively() {
        let registry = registry_with(vec![
            ModelSource::new("Customer").field("address", "Address"),
            ModelSource::new("Address")
                .field("street", "string")
                .field("zip", "string"),
        ]);
        let decl = Introspector::new(&registry).introspect("Customer").unwrap();
        match &decl.fields()[0].kind {
            FieldKind::NestedModel(nested) => {
                assert_eq!(nested.name(), "Address");
                assert_eq!(nested.fields().len(), 2);
            }
            other => panic!("expected nested model, got {other:?}"),
        }
    }

    #[test]
    fn test_var_annotation_resolves_element_model() {
        let registry = registry_with(vec![
            ModelSource::new("Product").field_with_doc("tags", "array", "@var Tag[]"),
            ModelSource::new("Tag").field("label", "string"),
        ]);
        let decl = Introspector::new(&registry).introspect("Product").unwrap();
        match &decl.fields()[0].kind {
            FieldKind::ModelArray(element) => assert_eq!(element.name(), "Tag"),
            other => panic!("expected model array, got {other:?}"),
        }
    }

    #[test]
    fn test_array_without_annotation_is_untyped() {
        let registry = registry_with(vec![ModelSource::new("Product").field("tags", "array")]);
        let decl = Introspector::new(&registry).introspect("Product").unwrap();
        assert_eq!(decl.fields()[0].kind, FieldKind::UntypedArray);
    }

    #[test]
    fn test_array_with_unregistered_annotation_falls_back() {
        let registry = registry_with(vec![ModelSource::new("Product").field_with_doc(
            "tags",
            "array",
            "@var Missing[]",
        )]);
        let decl = Introspector::new(&registry).introspect("Product").unwrap();
        assert_eq!(decl.fields()[0].kind, FieldKind::UntypedArray);
    }

    #[test]
    fn test_bracket_token_shorthand() {
        let registry = registry_with(vec![
            ModelSource::new("Product").field("tags", "Tag[]"),
            ModelSource::new("Tag").field("label", "string"),
        ]);
        let decl = Introspector::new(&registry).introspect("Product").unwrap();
        match &decl.fields()[0].kind {
            FieldKind::ModelArray(element) => assert_eq!(element.name(), "Tag"),
            other => panic!("expected model array, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_model() {
        let registry = ModelRegistry::new();
        let err = Introspector::new(&registry)
            .introspect("Ghost")
            .unwrap_err();
        assert_eq!(
            err,
            IntrospectError::UnknownModel {
                name: "Ghost".to_string()
            }
        );
    }

    #[test]
    fn test_unclassifiable_token_fails() {
        let registry =
            registry_with(vec![
                ModelSource::new("Product").field("created_at", "DateTime")
            ]);
        let err = Introspector::new(&registry)
            .introspect("Product")
            .unwrap_err();
        match err {
            IntrospectError::UnsupportedFieldKind {
                model,
                field,
                declared,
            } => {
                assert_eq!(model, "Product");
                assert_eq!(field, "created_at");
                assert_eq!(declared, "DateTime");
            }
            other => panic!("expected UnsupportedFieldKind, got {other}"),
        }
    }

    #[test]
    fn test_cyclic_models_rejected() {
        let registry = registry_with(vec![
            ModelSource::new("A").field("next", "B"),
            ModelSource::new("B").field("back", "A"),
        ]);
        let err = Introspector::new(&registry).introspect("A").unwrap_err();
        match err {
            IntrospectError::CyclicModel { path } => {
                assert_eq!(path, "A -> B -> A");
            }
            other => panic!("expected CyclicModel, got {other}"),
        }
    }

    #[test]
    fn test_self_referential_model_rejected() {
        let registry = registry_with(vec![ModelSource::new("Node").field_with_doc(
            "children",
            "array",
            "@var Node[]",
        )]);
        let err = Introspector::new(&registry).introspect("Node").unwrap_err();
        assert!(matches!(err, IntrospectError::CyclicModel { .. }));
    }

    #[test]
    fn test_fresh_declaration_per_call() {
        let registry = registry_with(vec![ModelSource::new("Tag").field("label", "string")]);
        let introspector = Introspector::new(&registry);
        let first = introspector.introspect("Tag").unwrap();
        let second = introspector.introspect("Tag").unwrap();
        assert_eq!(first, second);
    }
}

//! # Introspection Errors
//!
//! Errors raised while resolving model sources into declarations. All use
//! `thiserror` for derive-based `Display` and `Error` implementations, and
//! all are terminal: introspection never returns a partial declaration.

use thiserror::Error;

/// Error during declaration introspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectError {
    /// The requested model name is not in the registry.
    #[error("unknown model '{name}'")]
    UnknownModel {
        /// The name that failed to resolve.
        name: String,
    },

    /// A field's declared type could not be classified: not a primitive
    /// token, not an array marker, and not a registered model name.
    #[error("unsupported field kind for '{field}' on model '{model}': {declared}")]
    UnsupportedFieldKind {
        /// The model being introspected.
        model: String,
        /// The field whose type was unclassifiable.
        field: String,
        /// The declared type token as written.
        declared: String,
    },

    /// The model graph references a declaration already being resolved.
    /// Left unguarded this would recurse forever, so it is rejected here,
    /// at the single point where the registry is consulted.
    #[error("cyclic model reference: {path}")]
    CyclicModel {
        /// The resolution path that closed the cycle, e.g. `A -> B -> A`.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = IntrospectError::UnsupportedFieldKind {
            model: "Product".to_string(),
            field: "created_at".to_string(),
            declared: "DateTime".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported field kind for 'created_at' on model 'Product': DateTime"
        );

        let err = IntrospectError::CyclicModel {
            path: "A -> B -> A".to_string(),
        };
        assert!(err.to_string().contains("A -> B -> A"));
    }
}

//! # shapecast-schema — Schema Derivation & Value Parsing
//!
//! The two public operations of shapecast, built on the declaration types
//! in `shapecast-core`:
//!
//! - **[`derive`]** walks a `ModelDeclaration` and produces a
//!   [`SchemaDocument`] — a JSON-Schema-shaped description of the model's
//!   value shape, suitable for validation or for structured-output APIs.
//! - **[`parse_str`] / [`parse_value`]** walk the same declaration together
//!   with a JSON payload and produce a populated [`ModelInstance`],
//!   enforcing exactly the shape the derived schema claims.
//!
//! The two traversals are mirror images and must stay that way: any shape
//! the deriver emits for a field, the parser enforces when reading that
//! field back.
//!
//! [`FunctionCallSpec`] wraps a derived document in the `{name, schema,
//! strict}` envelope used by function-calling APIs.
//!
//! ## Concurrency
//!
//! Everything here is synchronous and free of shared state: each operation
//! is a pure function of its inputs, safe to call from any number of
//! threads without synchronization.

pub mod derive;
pub mod function_call;
pub mod parse;

// Re-export primary types.
pub use derive::{derive, SchemaDocument, SchemaNode};
pub use function_call::FunctionCallSpec;
pub use parse::{json_kind, parse_str, parse_value, FieldValue, ModelInstance, ParseError};

//! # shapecast-core — Model Declarations and Introspection
//!
//! Foundational types for shapecast. This crate defines how a data model is
//! described (`ModelSource`), looked up (`ModelRegistry`), and resolved into
//! the typed declaration tree (`ModelDeclaration`) that the schema deriver
//! and value parser in `shapecast-schema` both traverse.
//!
//! ## Key Design Principles
//!
//! 1. **Closed field taxonomy.** A field is exactly one of: primitive,
//!    nested model, array of models, or untyped array. `FieldKind` is a
//!    closed enum with exhaustive `match` everywhere; there is no open-ended
//!    type inspection at use sites.
//!
//! 2. **Explicit name resolution.** Element-model annotations (`@var Foo[]`)
//!    resolve against a `ModelRegistry` lookup table, never against any
//!    ambient namespace. What is not registered does not exist.
//!
//! 3. **Declarations are finite trees.** The `Introspector` embeds nested
//!    and element declarations at resolution time and rejects cyclic model
//!    graphs with `IntrospectError::CyclicModel`. Downstream traversals
//!    terminate by construction.
//!
//! 4. **No cross-call cache.** Every `introspect` call re-reads the sources
//!    and produces a fresh declaration.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `shapecast-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`.

pub mod declaration;
pub mod error;
pub mod introspect;
pub mod registry;
pub mod source;

// Re-export primary types for ergonomic imports.
pub use declaration::{FieldDeclaration, FieldKind, ModelDeclaration, PrimitiveKind};
pub use error::IntrospectError;
pub use introspect::Introspector;
pub use registry::ModelRegistry;
pub use source::{FieldSource, ModelSource};

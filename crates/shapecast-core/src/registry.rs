//! # Model Registry
//!
//! The explicit `model name -> ModelSource` lookup table. All name
//! resolution — nested-model type tokens and `@var Foo[]` element-model
//! annotations — goes through a registry; there is no ambient namespace
//! to fall back on.

use std::collections::HashMap;

use crate::source::ModelSource;

/// Lookup table of model sources, indexed by model name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelSource>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model source under its own name.
    ///
    /// Re-registering a name replaces the previous source.
    pub fn register(&mut self, source: ModelSource) {
        self.models.insert(source.name().to_string(), source);
    }

    /// Look up a model source by name.
    pub fn get(&self, name: &str) -> Option<&ModelSource> {
        self.models.get(name)
    }

    /// Whether a model with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// The number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Names of all registered models, sorted alphabetically.
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use quarry_common::{Error, Result};

use crate::backend::Backend;
use crate::context::DataFusionBackend;

/// Resolves backend names to implementations.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { backends: HashMap::new() }
    }

    /// A registry with every built-in backend.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DataFusionBackend));
        registry
    }

    /// Adds a backend under its own name, returning the one it replaced.
    pub fn register(&mut self, backend: Arc<dyn Backend>) -> Option<Arc<dyn Backend>> {
        self.backends.insert(backend.name().to_string(), backend)
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Backend>> {
        self.backends.get(name).cloned().ok_or_else(|| Error::UnknownBackend {
            name: name.to_string(),
            available: self.names(),
        })
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }
}

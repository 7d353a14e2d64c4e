//! Static module registry: the default import contract.
//!
//! Plugin modules register an initializer under their dotted import path,
//! either manually at startup or from build-generated code. Importing a
//! path runs its initializer once and caches the result for the rest of
//! the process, matching normal import semantics.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::error::{PluginError, PluginResult};
use crate::module::{ModuleImporter, PluginModule};

type ModuleInit = Arc<dyn Fn() -> PluginResult<PluginModule> + Send + Sync>;

static GLOBAL: Lazy<ModuleRegistry> = Lazy::new(ModuleRegistry::new);

#[derive(Default)]
struct Inner {
    initializers: HashMap<String, ModuleInit>,
    loaded: HashMap<String, Arc<PluginModule>>,
}

/// Registry of module initializers keyed by import path.
#[derive(Default)]
pub struct ModuleRegistry {
    inner: RwLock<Inner>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, for hosts that register modules at
    /// static-init time.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Register an initializer for `import_path`, replacing any previous
    /// one. An already-imported module stays cached.
    pub fn register<F>(&self, import_path: impl Into<String>, init: F)
    where
        F: Fn() -> PluginResult<PluginModule> + Send + Sync + 'static,
    {
        let import_path = import_path.into();
        tracing::debug!(import_path = %import_path, "registering plugin module");
        self.inner.write().initializers.insert(import_path, Arc::new(init));
    }

    /// Check whether an initializer is registered for `import_path`.
    pub fn is_registered(&self, import_path: &str) -> bool {
        self.inner.read().initializers.contains_key(import_path)
    }

    /// Number of registered import paths.
    pub fn len(&self) -> usize {
        self.inner.read().initializers.len()
    }

    /// Check whether no import paths are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().initializers.is_empty()
    }
}

impl ModuleImporter for ModuleRegistry {
    fn import(&self, import_path: &str) -> PluginResult<Arc<PluginModule>> {
        if let Some(module) = self.inner.read().loaded.get(import_path) {
            return Ok(Arc::clone(module));
        }

        let init = self
            .inner
            .read()
            .initializers
            .get(import_path)
            .cloned()
            .ok_or_else(|| PluginError::UnresolvedImport(import_path.to_string()))?;

        // Run the initializer without holding the lock; it may import other
        // modules. Failed initializers are not cached and run again on the
        // next import.
        let module = init().map_err(|err| PluginError::Init {
            module: import_path.to_string(),
            reason: err.to_string(),
        })?;

        let module = Arc::new(module);
        let mut inner = self.inner.write();
        let module = inner
            .loaded
            .entry(import_path.to_string())
            .or_insert_with(|| Arc::clone(&module))
            .clone();
        Ok(module)
    }
}

//! Plugin modules and the host import contract.
//!
//! A [`PluginModule`] is the loaded form of one discovered candidate: a
//! dotted import path plus the symbols the module explicitly exports.
//! Explicit exports are the visibility boundary here; nothing a module does
//! not export is visible to the collector.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::class::{InstanceArgs, PluginClass};
use crate::error::{PluginError, PluginResult};

/// A named callable exported by a module.
pub type CallableFn = dyn Fn(&InstanceArgs) -> PluginResult<Value> + Send + Sync;

/// A symbol exported by a plugin module.
#[derive(Clone)]
pub enum Export {
    /// A plugin class.
    Class(Arc<dyn PluginClass>),
    /// A named callable.
    Callable(Arc<CallableFn>),
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => f.debug_tuple("Class").field(&class.kind()).finish(),
            Self::Callable(_) => f.debug_tuple("Callable").finish(),
        }
    }
}

/// A loaded plugin module: an import path plus its exports, in declaration
/// order.
#[derive(Debug)]
pub struct PluginModule {
    /// Dotted import path, e.g. `acme.plugins.mock.factory`.
    name: String,
    /// Exported symbols, in declaration order.
    exports: Vec<(String, Export)>,
}

impl PluginModule {
    /// Create an empty module with the given import path.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), exports: Vec::new() }
    }

    /// Get the module's import path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Export a plugin class under `name`, replacing any previous export
    /// with the same name.
    pub fn export_class(self, name: impl Into<String>, class: impl PluginClass + 'static) -> Self {
        self.export(name, Export::Class(Arc::new(class)))
    }

    /// Export a callable under `name`, replacing any previous export with
    /// the same name.
    pub fn export_callable<F>(self, name: impl Into<String>, callable: F) -> Self
    where
        F: Fn(&InstanceArgs) -> PluginResult<Value> + Send + Sync + 'static,
    {
        self.export(name, Export::Callable(Arc::new(callable)))
    }

    /// Export an already-built symbol under `name`.
    pub fn export(mut self, name: impl Into<String>, export: Export) -> Self {
        let name = name.into();
        if let Some(slot) = self.exports.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = export;
        } else {
            self.exports.push((name, export));
        }
        self
    }

    /// Iterate over all exports in declaration order.
    pub fn exports(&self) -> impl Iterator<Item = (&str, &Export)> {
        self.exports.iter().map(|(name, export)| (name.as_str(), export))
    }

    /// Look up an export by name.
    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.iter().find(|(n, _)| n == name).map(|(_, export)| export)
    }

    /// Check whether at least one of `names` resolves to an export.
    pub fn exports_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.get(name.as_ref()).is_some())
    }

    /// Iterate over the class exports in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = Arc<dyn PluginClass>> + '_ {
        self.exports.iter().filter_map(|(_, export)| match export {
            Export::Class(class) => Some(Arc::clone(class)),
            Export::Callable(_) => None,
        })
    }

    /// Invoke a callable export by name.
    pub fn call(&self, name: &str, args: &InstanceArgs) -> PluginResult<Value> {
        match self.get(name) {
            Some(Export::Callable(callable)) => callable(args),
            Some(Export::Class(_)) => Err(PluginError::Execution(format!(
                "export '{name}' in module '{}' is a class, not a callable",
                self.name
            ))),
            None => Err(PluginError::Execution(format!(
                "no export named '{name}' in module '{}'",
                self.name
            ))),
        }
    }
}

/// The host-owned import contract.
///
/// Given a dotted import path, resolve and initialize the corresponding
/// module exactly as a normal import would: the initializer runs once per
/// process and later imports return the cached module. Caching belongs to
/// the implementor, not to the discovery pipeline.
pub trait ModuleImporter: Send + Sync {
    /// Import the module for `import_path`.
    fn import(&self, import_path: &str) -> PluginResult<Arc<PluginModule>>;
}

//! The discovery entry point, tying search roots to an importer.

use std::path::PathBuf;

use crate::collect::PluginClasses;
use crate::loader::PluginModules;
use crate::module::ModuleImporter;
use crate::paths::PluginPaths;
use crate::registry::ModuleRegistry;

/// Discovers plugin modules beneath a dotted namespace.
///
/// A finder owns its ordered search path and borrows a host-owned
/// [`ModuleImporter`]. It keeps no state between calls: every discovery
/// call starts a fresh enumeration with a fresh de-duplication set.
pub struct PluginFinder<'a> {
    search_path: Vec<PathBuf>,
    importer: &'a dyn ModuleImporter,
}

impl<'a> PluginFinder<'a> {
    /// Create a finder over `search_path` using the given importer.
    pub fn new(search_path: Vec<PathBuf>, importer: &'a dyn ModuleImporter) -> Self {
        Self { search_path, importer }
    }

    /// Get the ordered search path.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }
}

impl PluginFinder<'static> {
    /// Create a finder backed by the process-wide [`ModuleRegistry`].
    pub fn with_global_registry(search_path: Vec<PathBuf>) -> Self {
        Self::new(search_path, ModuleRegistry::global())
    }
}

impl PluginFinder<'_> {
    /// Enumerate candidate paths beneath `namespace`.
    pub fn paths(&self, namespace: &str, recurse: bool) -> PluginPaths<'_> {
        PluginPaths::new(&self.search_path, namespace, recurse)
    }

    /// Load every importable module beneath `namespace`.
    pub fn modules(&self, namespace: &str, recurse: bool) -> PluginModules<'_> {
        PluginModules::new(self.paths(namespace, recurse), self.importer, Vec::new())
    }

    /// Load modules beneath `namespace` that export at least one of the
    /// `required` names. Modules lacking all of them are filter misses,
    /// not failures.
    pub fn modules_exporting(
        &self,
        namespace: &str,
        required: &[&str],
        recurse: bool,
    ) -> PluginModules<'_> {
        let required = required.iter().map(|name| (*name).to_string()).collect();
        PluginModules::new(self.paths(namespace, recurse), self.importer, required)
    }

    /// Collect every plugin class exported by modules beneath `namespace`.
    pub fn classes(&self, namespace: &str, recurse: bool) -> PluginClasses<'_> {
        PluginClasses::new(self.modules(namespace, recurse), None)
    }

    /// Collect classes beneath `namespace` that properly derive from at
    /// least one of the `parents` kinds. The parent kinds themselves are
    /// never yielded.
    pub fn subclasses_of(
        &self,
        namespace: &str,
        parents: &[&str],
        recurse: bool,
    ) -> PluginClasses<'_> {
        let parents = parents.iter().map(|parent| (*parent).to_string()).collect();
        PluginClasses::new(self.modules(namespace, recurse), Some(parents))
    }
}

//! Module loading: turning candidate paths into loaded modules.

use std::sync::Arc;

use crate::module::{ModuleImporter, PluginModule};
use crate::paths::PluginPaths;

/// Lazy iterator over successfully loaded modules for one namespace.
///
/// One broken module never aborts discovery of the others: import failures
/// are logged at warning level (detail at debug level) and skipped.
pub struct PluginModules<'a> {
    paths: PluginPaths<'a>,
    importer: &'a dyn ModuleImporter,
    /// Names at least one of which a module must export to be yielded.
    /// Empty means no filter.
    required: Vec<String>,
}

impl<'a> PluginModules<'a> {
    pub(crate) fn new(
        paths: PluginPaths<'a>,
        importer: &'a dyn ModuleImporter,
        required: Vec<String>,
    ) -> Self {
        Self { paths, importer, required }
    }
}

impl Iterator for PluginModules<'_> {
    type Item = Arc<PluginModule>;

    fn next(&mut self) -> Option<Arc<PluginModule>> {
        loop {
            let candidate = self.paths.next()?;
            let import_path = candidate.import_path();

            tracing::debug!(import_path = %import_path, "importing plugin module");
            match self.importer.import(&import_path) {
                Ok(module) => {
                    if !self.required.is_empty() && !module.exports_any(&self.required) {
                        continue;
                    }
                    return Some(module);
                }
                Err(err) => {
                    tracing::warn!(import_path = %import_path, "problems importing plugin module");
                    tracing::debug!(import_path = %import_path, error = %err, "import failure detail");
                }
            }
        }
    }
}

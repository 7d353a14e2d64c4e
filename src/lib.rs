//! # Nsplugin
//!
//! Namespace-based plugin discovery: find, load, and instantiate plugin
//! modules beneath a dotted namespace.
//!
//! A host application names a namespace such as `acme.plugins`; third
//! parties drop plugin modules into the matching directory under any of the
//! host's search roots, and the host discovers them at startup without a
//! static list. Discovery is a lazy four-stage pipeline:
//!
//! 1. **Path enumeration** - walk every search root for candidates beneath
//!    the namespace, recursing into sub-packages on request.
//! 2. **Module loading** - derive each candidate's dotted import path and
//!    load it through the host-owned [`ModuleImporter`] contract. Broken
//!    modules are logged and skipped, never fatal.
//! 3. **Class collection** - walk each module's explicit exports for plugin
//!    classes, optionally filtered by parent kind.
//! 4. **Instantiation** - construct one instance per class with shared
//!    arguments; constructor errors propagate to the caller.
//!
//! Each stage pulls from the one below on demand, so consuming only the
//! first result performs only the filesystem and import work needed to
//! produce it.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use nsplugin::{
//!     instantiate_plugin_classes, InstanceArgs, ModuleRegistry, PluginFinder, PluginModule,
//! };
//!
//! // Plugin modules register themselves at startup (typically from
//! // build-generated code).
//! ModuleRegistry::global().register("acme.plugins.mock", || {
//!     Ok(PluginModule::new("acme.plugins.mock"))
//! });
//!
//! let finder = PluginFinder::with_global_registry(vec![
//!     PathBuf::from("/usr/lib/acme/plugins"),
//!     PathBuf::from("/etc/acme/plugins"),
//! ]);
//!
//! let classes = finder.subclasses_of("acme.plugins", &["acme.framework.Factory"], true);
//! let args = InstanceArgs::new().arg(2).kwarg("done", false);
//! for instance in instantiate_plugin_classes(classes, args) {
//!     let instance = instance.expect("plugin constructor failed");
//!     // Downcast to the host's plugin base type and put it to work.
//! }
//! ```

mod class;
mod collect;
mod error;
mod finder;
mod instantiate;
mod loader;
mod module;
mod paths;
mod registry;

pub use class::{InstanceArgs, PluginClass, PluginInstance};
pub use collect::PluginClasses;
pub use error::{PluginError, PluginResult};
pub use finder::PluginFinder;
pub use instantiate::instantiate_plugin_classes;
pub use loader::PluginModules;
pub use module::{CallableFn, Export, ModuleImporter, PluginModule};
pub use paths::{is_package, CandidatePath, PluginPaths, MODULE_EXTENSION, PACKAGE_MARKER};
pub use registry::ModuleRegistry;

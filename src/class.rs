//! The plugin class contract and constructor arguments.
//!
//! A plugin class is the discoverable unit a host filters on and
//! instantiates. Where a dynamic language would scan arbitrary attributes
//! and test `issubclass`, this crate uses an explicit capability interface:
//! every plugin class names its own kind and the kinds it derives from.

use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PluginResult;

/// An instantiated plugin.
///
/// Ownership belongs entirely to the caller; the discovery pipeline keeps
/// no reference. Hosts downcast to their own plugin base type.
pub type PluginInstance = Box<dyn Any + Send>;

/// A discoverable plugin class.
///
/// Implemented by host-defined factory types exported from plugin modules.
/// Kind identifiers are host-chosen strings (dotted type paths by
/// convention) and stand in for the type identity a subclass check would
/// use in a reflective runtime.
pub trait PluginClass: Send + Sync {
    /// Unique identifier for this class.
    fn kind(&self) -> &str;

    /// Identifiers of every parent kind this class derives from.
    ///
    /// Defaults to none. A class never lists its own `kind` here.
    fn ancestors(&self) -> &[&str] {
        &[]
    }

    /// Construct one instance with the given arguments.
    ///
    /// Errors are the plugin's own and are propagated to the caller
    /// unmodified by the instantiator.
    fn create(&self, args: &InstanceArgs) -> PluginResult<PluginInstance>;

    /// Check whether this class is a proper descendant of `parent`.
    fn derives_from(&self, parent: &str) -> bool {
        self.ancestors().iter().any(|ancestor| *ancestor == parent)
    }
}

/// Shared constructor arguments: positional values plus keyword values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceArgs {
    /// Positional arguments, in order.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Keyword arguments.
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl InstanceArgs {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Get a positional argument by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Get a keyword argument by name.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }

    /// Check whether no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl PluginClass for Widget {
        fn kind(&self) -> &str {
            "acme.widgets.Widget"
        }

        fn ancestors(&self) -> &[&str] {
            &["acme.framework.Component", "acme.framework.Base"]
        }

        fn create(&self, _args: &InstanceArgs) -> PluginResult<PluginInstance> {
            Ok(Box::new(()))
        }
    }

    #[test]
    fn test_derives_from() {
        let widget = Widget;
        assert!(widget.derives_from("acme.framework.Component"));
        assert!(widget.derives_from("acme.framework.Base"));
        assert!(!widget.derives_from("acme.widgets.Widget"));
        assert!(!widget.derives_from("acme.framework.Other"));
    }

    #[test]
    fn test_instance_args_builder() {
        let args = InstanceArgs::new().arg(2).arg("test").kwarg("done", false);

        assert_eq!(args.get(0), Some(&Value::from(2)));
        assert_eq!(args.get(1), Some(&Value::from("test")));
        assert_eq!(args.get(2), None);
        assert_eq!(args.keyword("done"), Some(&Value::from(false)));
        assert_eq!(args.keyword("missing"), None);
        assert!(!args.is_empty());
    }

    #[test]
    fn test_instance_args_empty() {
        assert!(InstanceArgs::new().is_empty());
    }

    #[test]
    fn test_instance_args_roundtrip() {
        let args = InstanceArgs::new().arg(45).kwarg("flag", true);
        let json = serde_json::to_string(&args).unwrap();
        let back: InstanceArgs = serde_json::from_str(&json).unwrap();
        assert_eq!(args, back);
    }
}

//! Class collection: extracting plugin classes from loaded modules.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::class::PluginClass;
use crate::loader::PluginModules;

/// Keep a class when no parent filter is set, or when it properly derives
/// from at least one parent without being a parent kind itself. A parent
/// kind is never yielded as a plugin.
pub(crate) fn matches_parent_filter(
    class: &Arc<dyn PluginClass>,
    parents: Option<&[String]>,
) -> bool {
    match parents {
        None => true,
        Some(parents) => {
            parents.iter().any(|parent| class.derives_from(parent))
                && parents.iter().all(|parent| class.kind() != parent)
        }
    }
}

/// Lazy iterator over plugin classes for one namespace.
///
/// Draws modules on demand and walks each module's class exports in
/// declaration order.
pub struct PluginClasses<'a> {
    modules: PluginModules<'a>,
    parents: Option<Vec<String>>,
    pending: VecDeque<Arc<dyn PluginClass>>,
}

impl<'a> PluginClasses<'a> {
    pub(crate) fn new(modules: PluginModules<'a>, parents: Option<Vec<String>>) -> Self {
        Self { modules, parents, pending: VecDeque::new() }
    }
}

impl Iterator for PluginClasses<'_> {
    type Item = Arc<dyn PluginClass>;

    fn next(&mut self) -> Option<Arc<dyn PluginClass>> {
        loop {
            while let Some(class) = self.pending.pop_front() {
                if matches_parent_filter(&class, self.parents.as_deref()) {
                    return Some(class);
                }
            }
            let module = self.modules.next()?;
            self.pending.extend(module.classes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{InstanceArgs, PluginInstance};
    use crate::error::PluginResult;

    struct Fake {
        kind: &'static str,
        ancestors: &'static [&'static str],
    }

    impl PluginClass for Fake {
        fn kind(&self) -> &str {
            self.kind
        }

        fn ancestors(&self) -> &[&str] {
            self.ancestors
        }

        fn create(&self, _args: &InstanceArgs) -> PluginResult<PluginInstance> {
            Ok(Box::new(()))
        }
    }

    fn class(kind: &'static str, ancestors: &'static [&'static str]) -> Arc<dyn PluginClass> {
        Arc::new(Fake { kind, ancestors })
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let unrelated = class("acme.plugins.mock.Helper", &[]);
        assert!(matches_parent_filter(&unrelated, None));
    }

    #[test]
    fn test_filter_keeps_proper_subclasses() {
        let parents = vec!["acme.framework.Factory".to_string()];
        let subclass =
            class("acme.plugins.mock.factory.MockFactory", &["acme.framework.Factory"]);

        assert!(matches_parent_filter(&subclass, Some(&parents)));
    }

    #[test]
    fn test_filter_drops_unrelated_classes() {
        let parents = vec!["acme.framework.Factory".to_string()];
        let unrelated = class("acme.plugins.mock.Helper", &[]);

        assert!(!matches_parent_filter(&unrelated, Some(&parents)));
    }

    #[test]
    fn test_filter_drops_the_parent_itself() {
        let parents = vec!["acme.framework.Factory".to_string()];
        // A re-exported parent kind is not a plugin, even if it lists
        // itself an ancestor of some deeper base.
        let parent = class("acme.framework.Factory", &["acme.framework.Base"]);
        let parents_both =
            vec!["acme.framework.Factory".to_string(), "acme.framework.Base".to_string()];

        assert!(!matches_parent_filter(&parent, Some(&parents_both)));
        assert!(!matches_parent_filter(&parent, Some(&parents)));
    }

    #[test]
    fn test_filter_multiple_parents() {
        let parents =
            vec!["acme.framework.Factory".to_string(), "acme.framework.Sink".to_string()];
        let sink = class("acme.plugins.mock.MockSink", &["acme.framework.Sink"]);

        assert!(matches_parent_filter(&sink, Some(&parents)));
    }
}

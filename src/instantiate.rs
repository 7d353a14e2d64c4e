//! Instantiation: constructing plugins from collected classes.

use std::sync::Arc;

use crate::class::{InstanceArgs, PluginClass, PluginInstance};
use crate::error::PluginResult;

/// Instantiate every class in `plugin_classes` with the same arguments, in
/// input order.
///
/// Constructor failures are yielded as `Err` items exactly as the class
/// produced them; unlike import failures they are a caller error, never
/// swallowed or logged here.
pub fn instantiate_plugin_classes<I>(
    plugin_classes: I,
    args: InstanceArgs,
) -> impl Iterator<Item = PluginResult<PluginInstance>>
where
    I: IntoIterator<Item = Arc<dyn PluginClass>>,
{
    plugin_classes.into_iter().map(move |class| class.create(&args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;

    /// Instance type used to observe what a constructor received.
    struct Built {
        kind: String,
        args: InstanceArgs,
    }

    struct Good(&'static str);

    impl PluginClass for Good {
        fn kind(&self) -> &str {
            self.0
        }

        fn create(&self, args: &InstanceArgs) -> PluginResult<PluginInstance> {
            Ok(Box::new(Built { kind: self.0.to_string(), args: args.clone() }))
        }
    }

    struct Failing;

    impl PluginClass for Failing {
        fn kind(&self) -> &str {
            "acme.plugins.Failing"
        }

        fn create(&self, _args: &InstanceArgs) -> PluginResult<PluginInstance> {
            Err(PluginError::Construction {
                class: "acme.plugins.Failing".to_string(),
                reason: "bad argument".to_string(),
            })
        }
    }

    #[test]
    fn test_instantiates_in_input_order_with_shared_args() {
        let classes: Vec<Arc<dyn PluginClass>> =
            vec![Arc::new(Good("acme.plugins.C1")), Arc::new(Good("acme.plugins.C2"))];
        let args = InstanceArgs::new().arg(2).kwarg("flag", true);

        let instances: Vec<_> = instantiate_plugin_classes(classes, args.clone())
            .collect::<PluginResult<Vec<_>>>()
            .unwrap();

        assert_eq!(instances.len(), 2);
        for (instance, expected) in instances.into_iter().zip(["acme.plugins.C1", "acme.plugins.C2"])
        {
            let built = instance.downcast::<Built>().unwrap();
            assert_eq!(built.kind, expected);
            assert_eq!(built.args, args);
        }
    }

    #[test]
    fn test_constructor_failure_propagates() {
        let classes: Vec<Arc<dyn PluginClass>> =
            vec![Arc::new(Good("acme.plugins.C1")), Arc::new(Failing), Arc::new(Good("acme.plugins.C2"))];

        let results: Vec<_> =
            instantiate_plugin_classes(classes, InstanceArgs::new()).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(PluginError::Construction { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_empty_input() {
        let classes: Vec<Arc<dyn PluginClass>> = Vec::new();
        assert_eq!(instantiate_plugin_classes(classes, InstanceArgs::new()).count(), 0);
    }
}

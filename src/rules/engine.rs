//! Deferred rule replay engine.

use std::sync::Arc;

use super::types::{AttributeRule, RuleError};
use crate::attributes::{
    AttributesFactory, DefaultAttributesFactory, ImmutableAttributes,
};

/// An ordered set of attribute-mutation rules, replayed on demand.
///
/// Rules accumulate during a variant's configuration phase and are only
/// executed when [`apply`](Self::apply) is called — typically the moment the
/// variant's attributes are needed during dependency resolution. Most
/// variants are never resolved, so nothing is evaluated at registration
/// time.
///
/// Registration order is preserved exactly and is a correctness contract:
/// each rule observes a working set reflecting all earlier rules' effects.
/// Duplicates are permitted; every registered occurrence replays.
///
/// Registration takes `&mut self`, replay takes `&self`. Once registration
/// is done, any number of threads may call `apply` on the same instance
/// concurrently; each call builds its own working set and returns its own
/// snapshot.
///
/// # Examples
///
/// ```
/// use variant_rules::rules::VariantAttributeRules;
///
/// let mut rules = VariantAttributeRules::new();
/// rules.add_rule(|attrs: &mut variant_rules::attributes::MutableAttributeContainer| {
///     attrs.set("build_type", "release");
///     Ok(())
/// });
///
/// let snapshot = rules.apply(None)?;
/// assert_eq!(snapshot.get("build_type").and_then(|v| v.as_str()), Some("release"));
/// # Ok::<(), variant_rules::rules::RuleError>(())
/// ```
pub struct VariantAttributeRules {
    factory: Arc<dyn AttributesFactory>,
    rules: Vec<Box<dyn AttributeRule>>,
}

impl VariantAttributeRules {
    /// Creates an empty rule set backed by the standard container factory.
    pub fn new() -> Self {
        Self::with_factory(DefaultAttributesFactory::shared())
    }

    /// Creates an empty rule set backed by the given factory.
    ///
    /// The factory may be shared across many rule sets and threads.
    pub fn with_factory(factory: Arc<dyn AttributesFactory>) -> Self {
        Self {
            factory,
            rules: Vec::new(),
        }
    }

    /// Registers a rule at the end of the replay order.
    ///
    /// O(1) append. Nothing is evaluated here; the rule runs only inside
    /// [`apply`](Self::apply).
    pub fn add_rule<R: AttributeRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Builder form of [`add_rule`](Self::add_rule).
    pub fn with_rule<R: AttributeRule + 'static>(mut self, rule: R) -> Self {
        self.add_rule(rule);
        self
    }

    /// Returns the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the names of all registered rules in replay order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Replays every registered rule, in registration order, over a fresh
    /// working copy of `base` and returns the frozen result.
    ///
    /// With `None`, replay starts from the empty attribute set. The base is
    /// never mutated; each call returns an independently owned snapshot, so
    /// repeated calls with the same base are deterministic and side-effect
    /// free (assuming the rules themselves are deterministic).
    ///
    /// # Errors
    ///
    /// The first failing rule aborts the call: later rules never run, the
    /// working set is discarded unfrozen, and the rule's error is returned
    /// unmodified.
    pub fn apply(
        &self,
        base: Option<&ImmutableAttributes>,
    ) -> Result<ImmutableAttributes, RuleError> {
        let mut working = match base {
            None => self.factory.mutable(),
            Some(attributes) => self.factory.mutable_from(attributes),
        };
        for rule in &self.rules {
            rule.execute(&mut working)?;
        }
        Ok(self.factory.freeze(working))
    }
}

impl Default for VariantAttributeRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeValue, MutableAttributeContainer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn base_with(name: &str, value: impl Into<AttributeValue>) -> ImmutableAttributes {
        let mut working = MutableAttributeContainer::new();
        working.set(name, value);
        working.freeze()
    }

    // Appends a marker to a shared log when executed.
    struct Marker {
        log: Arc<Mutex<Vec<usize>>>,
        id: usize,
    }

    impl AttributeRule for Marker {
        fn name(&self) -> &str {
            "Marker"
        }
        fn execute(&self, _attrs: &mut MutableAttributeContainer) -> Result<(), RuleError> {
            self.log.lock().unwrap().push(self.id);
            Ok(())
        }
    }

    #[test]
    fn test_rules_replay_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut rules = VariantAttributeRules::new();
        for id in 1..=5 {
            rules.add_rule(Marker {
                log: Arc::clone(&log),
                id,
            });
        }

        rules.apply(None).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_duplicate_registration_replays_each_occurrence() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut rules = VariantAttributeRules::new();
        rules.add_rule(Marker {
            log: Arc::clone(&log),
            id: 7,
        });
        rules.add_rule(Marker {
            log: Arc::clone(&log),
            id: 7,
        });

        rules.apply(None).unwrap();
        assert_eq!(*log.lock().unwrap(), vec![7, 7]);
    }

    #[test]
    fn test_base_is_never_mutated() {
        let base = base_with("k1", "v1");

        let mut rules = VariantAttributeRules::new();
        rules.add_rule(|attrs: &mut MutableAttributeContainer| {
            attrs.set("k1", "v2");
            Ok(())
        });
        rules.add_rule(|attrs: &mut MutableAttributeContainer| {
            attrs.remove("k1");
            Ok(())
        });

        let snapshot = rules.apply(Some(&base)).unwrap();
        assert!(!snapshot.contains("k1"));
        assert_eq!(base.get("k1"), Some(&AttributeValue::Text("v1".into())));
    }

    #[test]
    fn test_snapshots_are_independent() {
        let base = base_with("a", 1i64);
        let mut rules = VariantAttributeRules::new();
        rules.add_rule(|attrs: &mut MutableAttributeContainer| {
            attrs.set("b", 2i64);
            Ok(())
        });

        let first = rules.apply(Some(&base)).unwrap();
        let second = rules.apply(Some(&base)).unwrap();

        // Structurally equal, independently owned.
        assert_eq!(first, second);
        drop(first);
        assert_eq!(second.get("b"), Some(&AttributeValue::Integer(2)));
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let rules = VariantAttributeRules::new();

        let base = base_with("a", 1i64);
        assert_eq!(rules.apply(Some(&base)).unwrap(), base);
        assert!(rules.apply(None).unwrap().is_empty());
    }

    #[test]
    fn test_additive_and_overriding_rules_compose() {
        let rules = VariantAttributeRules::new()
            .with_rule(|attrs: &mut MutableAttributeContainer| {
                attrs.set("x", 1i64);
                Ok(())
            })
            .with_rule(|attrs: &mut MutableAttributeContainer| {
                attrs.set("x", 2i64);
                Ok(())
            })
            .with_rule(|attrs: &mut MutableAttributeContainer| {
                attrs.set("y", 3i64);
                Ok(())
            });

        let snapshot = rules.apply(None).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("x"), Some(&AttributeValue::Integer(2)));
        assert_eq!(snapshot.get("y"), Some(&AttributeValue::Integer(3)));
    }

    #[test]
    fn test_later_rules_observe_earlier_effects() {
        let rules = VariantAttributeRules::new()
            .with_rule(|attrs: &mut MutableAttributeContainer| {
                attrs.set("platform", "jvm");
                Ok(())
            })
            .with_rule(|attrs: &mut MutableAttributeContainer| {
                let runtime = match attrs.get("platform").and_then(|v| v.as_str()) {
                    Some("jvm") => "hotspot",
                    _ => "none",
                };
                attrs.set("runtime", runtime);
                Ok(())
            });

        let snapshot = rules.apply(None).unwrap();
        assert_eq!(snapshot.get("runtime").and_then(|v| v.as_str()), Some("hotspot"));
    }

    #[test]
    fn test_failure_aborts_replay() {
        let later_runs = Arc::new(AtomicUsize::new(0));
        let later_runs_probe = Arc::clone(&later_runs);

        let rules = VariantAttributeRules::new()
            .with_rule(|attrs: &mut MutableAttributeContainer| {
                attrs.set("x", 1i64);
                Ok(())
            })
            .with_rule(|_attrs: &mut MutableAttributeContainer| {
                Err(RuleError::message("rule rejected attribute state"))
            })
            .with_rule(move |attrs: &mut MutableAttributeContainer| {
                later_runs_probe.fetch_add(1, Ordering::SeqCst);
                attrs.set("z", 1i64);
                Ok(())
            });

        let err = rules.apply(None).unwrap_err();
        assert_eq!(err.to_string(), "rule rejected attribute state");
        assert_eq!(later_runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_propagates_typed_source() {
        let rules = VariantAttributeRules::new().with_rule(
            |_attrs: &mut MutableAttributeContainer| {
                Err(RuleError::source(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "metadata descriptor missing",
                )))
            },
        );

        let err = rules.apply(None).unwrap_err();
        assert!(matches!(err, RuleError::Source(_)));
        assert_eq!(err.to_string(), "metadata descriptor missing");
    }

    #[test]
    fn test_rule_names_and_count() {
        let mut rules = VariantAttributeRules::new();
        assert!(rules.is_empty());

        rules.add_rule(Marker {
            log: Arc::new(Mutex::new(Vec::new())),
            id: 0,
        });
        rules.add_rule(|attrs: &mut MutableAttributeContainer| {
            attrs.set("y", 1i64);
            Ok(())
        });

        assert_eq!(rules.rule_count(), 2);
        assert_eq!(rules.rule_names(), vec!["Marker", "<anonymous>"]);
    }

    #[test]
    fn test_concurrent_apply_on_shared_rule_set() {
        let mut rules = VariantAttributeRules::new();
        rules.add_rule(|attrs: &mut MutableAttributeContainer| {
            attrs.set("build_type", "release");
            Ok(())
        });
        let rules = Arc::new(rules);
        let base = base_with("platform", "linux");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let rules = Arc::clone(&rules);
                let base = base.clone();
                std::thread::spawn(move || rules.apply(Some(&base)).unwrap())
            })
            .collect();

        for handle in handles {
            let snapshot = handle.join().unwrap();
            assert_eq!(snapshot.len(), 2);
            assert_eq!(
                snapshot.get("build_type").and_then(|v| v.as_str()),
                Some("release")
            );
        }
    }
}

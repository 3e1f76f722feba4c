//! Variant metadata: the owner of a rule set.

use crate::attributes::ImmutableAttributes;
use crate::rules::{AttributeRule, RuleError, VariantAttributeRules};

/// Metadata for one selectable variant of a component.
///
/// A variant carries a base attribute set declared up front and a rule set
/// accumulated during configuration. The effective attributes are computed
/// lazily: [`attributes`](Self::attributes) replays the rules over the base
/// on every call, so variants that resolution never touches pay only the
/// cost of registration.
///
/// # Examples
///
/// ```
/// use variant_rules::attributes::MutableAttributeContainer;
/// use variant_rules::variant::VariantMetadata;
///
/// let mut working = MutableAttributeContainer::new();
/// working.set("platform", "jvm");
///
/// let mut variant = VariantMetadata::new("runtime", working.freeze());
/// variant.add_rule(|attrs: &mut MutableAttributeContainer| {
///     attrs.set("build_type", "release");
///     Ok(())
/// });
///
/// let effective = variant.attributes()?;
/// assert_eq!(effective.len(), 2);
/// assert_eq!(variant.base_attributes().len(), 1);
/// # Ok::<(), variant_rules::rules::RuleError>(())
/// ```
pub struct VariantMetadata {
    name: String,
    base: ImmutableAttributes,
    rules: VariantAttributeRules,
}

impl VariantMetadata {
    /// Creates a variant with the given base attributes and no rules.
    pub fn new(name: impl Into<String>, base: ImmutableAttributes) -> Self {
        Self {
            name: name.into(),
            base,
            rules: VariantAttributeRules::new(),
        }
    }

    /// Creates a variant whose replay starts from the empty attribute set.
    pub fn with_empty_base(name: impl Into<String>) -> Self {
        Self::new(name, ImmutableAttributes::empty())
    }

    /// Returns the variant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the base attributes as declared, untouched by any rule.
    pub fn base_attributes(&self) -> &ImmutableAttributes {
        &self.base
    }

    /// Registers a rule at the end of the replay order.
    pub fn add_rule<R: AttributeRule + 'static>(&mut self, rule: R) {
        self.rules.add_rule(rule);
    }

    /// Returns the owned rule set for direct registration.
    pub fn rules_mut(&mut self) -> &mut VariantAttributeRules {
        &mut self.rules
    }

    /// Returns the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.rule_count()
    }

    /// Computes the effective attributes by replaying all rules over the
    /// base.
    ///
    /// Repeatable and deterministic for a fixed rule list and base; each
    /// call returns an independently owned snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the first failing rule's error; see
    /// [`VariantAttributeRules::apply`].
    pub fn attributes(&self) -> Result<ImmutableAttributes, RuleError> {
        self.rules.apply(Some(&self.base))
    }
}

/// Resolves the effective attributes of every variant in order.
///
/// Stops at the first failing rule and returns its error.
pub fn resolve_attributes(
    variants: &[VariantMetadata],
) -> Result<Vec<ImmutableAttributes>, RuleError> {
    variants.iter().map(|v| v.attributes()).collect()
}

/// Resolves the effective attributes of every variant in parallel.
///
/// Replay for each variant is independent, so the result is identical to
/// [`resolve_attributes`] up to which failing variant's error is reported
/// when several fail.
#[cfg(feature = "parallel")]
pub fn resolve_attributes_parallel(
    variants: &[VariantMetadata],
) -> Result<Vec<ImmutableAttributes>, RuleError> {
    use rayon::prelude::*;
    variants.par_iter().map(|v| v.attributes()).collect()
}

//! Core trait for attribute-mutation rules.

use crate::attributes::MutableAttributeContainer;

/// Failure raised by a rule during replay.
///
/// The engine never constructs, catches, or wraps these: a `RuleError` that
/// reaches the caller of [`VariantAttributeRules::apply`] is exactly the
/// value the failing rule produced.
///
/// [`VariantAttributeRules::apply`]: crate::rules::VariantAttributeRules::apply
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// An ad-hoc failure described by a message.
    #[error("{0}")]
    Message(String),

    /// A typed failure from a caller-supplied rule, surfaced as-is.
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl RuleError {
    /// Creates an ad-hoc failure from a message.
    pub fn message(msg: impl Into<String>) -> Self {
        RuleError::Message(msg.into())
    }

    /// Wraps a typed error without obscuring it.
    pub fn source(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        RuleError::Source(Box::new(err))
    }
}

/// A rule that mutates a variant's attribute working set in place.
///
/// This is the single capability the engine needs from caller-supplied
/// logic. Rules may read, set, overwrite, or remove any entry; each rule
/// observes the effects of every rule registered before it.
///
/// Rules must be `Send + Sync`: a finished rule list may be replayed from
/// many resolution threads at once.
///
/// Plain closures of type
/// `Fn(&mut MutableAttributeContainer) -> Result<(), RuleError>` implement
/// this trait via a blanket impl, so most callers never write an `impl`
/// block.
///
/// # Examples
///
/// ```
/// use variant_rules::attributes::MutableAttributeContainer;
/// use variant_rules::rules::{AttributeRule, RuleError};
///
/// struct DefaultBuildType;
///
/// impl AttributeRule for DefaultBuildType {
///     fn name(&self) -> &str { "DefaultBuildType" }
///     fn execute(&self, attrs: &mut MutableAttributeContainer) -> Result<(), RuleError> {
///         if !attrs.contains("build_type") {
///             attrs.set("build_type", "release");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait AttributeRule: Send + Sync {
    /// Returns a human-readable name for this rule.
    ///
    /// Used for diagnostics only; never inspected by the engine.
    fn name(&self) -> &str {
        "<anonymous>"
    }

    /// Mutates the working set in place.
    ///
    /// Returning an error aborts the whole replay: no later rule runs and
    /// no snapshot is produced.
    fn execute(&self, attributes: &mut MutableAttributeContainer) -> Result<(), RuleError>;
}

impl<F> AttributeRule for F
where
    F: Fn(&mut MutableAttributeContainer) -> Result<(), RuleError> + Send + Sync,
{
    fn execute(&self, attributes: &mut MutableAttributeContainer) -> Result<(), RuleError> {
        self(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_implements_rule() {
        let rule = |attrs: &mut MutableAttributeContainer| {
            attrs.set("platform", "jvm");
            Ok(())
        };

        let mut working = MutableAttributeContainer::new();
        rule.execute(&mut working).unwrap();

        assert!(working.contains("platform"));
        assert_eq!(rule.name(), "<anonymous>");
    }

    #[test]
    fn test_message_error_displays_verbatim() {
        let err = RuleError::message("no usable platform");
        assert_eq!(err.to_string(), "no usable platform");
    }

    #[test]
    fn test_source_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "backing store gone");
        let err = RuleError::source(io);
        assert_eq!(err.to_string(), "backing store gone");
    }
}

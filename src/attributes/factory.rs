//! The attribute-container factory seam.

use std::sync::Arc;

use super::container::{ImmutableAttributes, MutableAttributeContainer};

/// Produces working sets and freezes them into snapshots.
///
/// The rule engine never constructs containers directly; it goes through
/// this seam so hosts can substitute their own container strategy (for
/// example an interning factory that shares storage between equal
/// snapshots).
///
/// Implementations must be stateless or internally synchronized: one factory
/// instance is typically shared, via `Arc`, across many rule sets and many
/// threads, and may be invoked reentrantly.
///
/// # Copy semantics
///
/// `mutable_from` must produce a container with no storage shared with its
/// base — mutating the copy must never be observable through the base, and
/// freezing one working set must never let later mutation of a different
/// working set retroactively change the snapshot.
pub trait AttributesFactory: Send + Sync {
    /// Creates an empty working set.
    fn mutable(&self) -> MutableAttributeContainer;

    /// Creates a working set holding a content copy of `base`.
    fn mutable_from(&self, base: &ImmutableAttributes) -> MutableAttributeContainer;

    /// Freezes a working set into an immutable snapshot.
    fn freeze(&self, container: MutableAttributeContainer) -> ImmutableAttributes;
}

/// The standard factory: plain owned containers, no sharing, no interning.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAttributesFactory;

impl DefaultAttributesFactory {
    /// Returns a shared handle to the standard factory.
    pub fn shared() -> Arc<dyn AttributesFactory> {
        Arc::new(DefaultAttributesFactory)
    }
}

impl AttributesFactory for DefaultAttributesFactory {
    fn mutable(&self) -> MutableAttributeContainer {
        MutableAttributeContainer::new()
    }

    fn mutable_from(&self, base: &ImmutableAttributes) -> MutableAttributeContainer {
        MutableAttributeContainer::from_immutable(base)
    }

    fn freeze(&self, container: MutableAttributeContainer) -> ImmutableAttributes {
        container.freeze()
    }
}

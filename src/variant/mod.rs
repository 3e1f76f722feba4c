//! Variant metadata owning a deferred rule set.
//!
//! [`VariantMetadata`] is the minimal host for the rule engine: a named
//! variant with base attributes declared up front and rules registered
//! during configuration. Effective attributes are computed on demand —
//! never at registration time — by replaying the rules over the base.
//!
//! Batch helpers resolve many variants at once; with the `parallel` feature
//! enabled, [`resolve_attributes_parallel`] fans the independent replays out
//! across a rayon thread pool.

mod metadata;

#[cfg(feature = "parallel")]
pub use metadata::resolve_attributes_parallel;
pub use metadata::{resolve_attributes, VariantMetadata};

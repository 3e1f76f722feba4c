//! Typed attribute containers with a working-set / snapshot split.
//!
//! Attributes are the key/value pairs that distinguish one variant of a
//! component from another (platform, build type, API surface). This module
//! provides:
//!
//! - **Mutable working sets**: [`MutableAttributeContainer`], the only view
//!   rules are ever handed. Supports in-place set/overwrite/remove.
//! - **Frozen snapshots**: [`ImmutableAttributes`], produced by consuming a
//!   working set. Safe to share across threads and callers; never changes
//!   after creation.
//! - **The factory seam**: [`AttributesFactory`], through which the rule
//!   engine obtains and freezes working sets, with
//!   [`DefaultAttributesFactory`] as the standard implementation.
//!
//! # Design
//!
//! Snapshot independence is enforced by ownership rather than convention:
//! [`MutableAttributeContainer::freeze`] consumes the working set, so no
//! mutable handle to a snapshot's storage can survive freezing.

mod container;
mod factory;
mod types;

pub use container::{ImmutableAttributes, MutableAttributeContainer};
pub use factory::{AttributesFactory, DefaultAttributesFactory};
pub use types::AttributeValue;

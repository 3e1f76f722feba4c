//! Deferred, ordered attribute-rule replay.
//!
//! A [`VariantAttributeRules`] accumulates [`AttributeRule`] values during a
//! variant's configuration phase and replays them — in registration order,
//! against a fresh working copy of some base attribute set — only when the
//! variant's effective attributes are requested. The two phases are fully
//! decoupled:
//!
//! - **Registration** is a pure list append; nothing runs eagerly.
//! - **Replay** is stateless and repeatable; every call freezes and returns
//!   its own independent snapshot.
//!
//! # Design
//!
//! Rules are polymorphic over a single capability, "mutate this working
//! set", modeled as a one-method trait with a blanket impl for closures.
//! The engine never inspects a rule's concrete identity, never deduplicates,
//! and never reorders.

mod engine;
mod types;

pub use engine::VariantAttributeRules;
pub use types::{AttributeRule, RuleError};

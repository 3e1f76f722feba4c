//! Deferred attribute-rule application for dependency-resolution variants.
//!
//! Build authors register mutation rules against a variant's attribute set
//! ahead of time; the rules are replayed, in registration order, only when
//! that variant's attributes are actually needed during resolution. Each
//! replay produces a fresh, independently-owned, immutable snapshot.
//!
//! The crate is organized into three layers:
//!
//! - **Attributes**: typed key/value containers with a strict
//!   mutable-working-set / frozen-snapshot split. Freezing consumes the
//!   working set, so a snapshot can never alias live mutable state.
//! - **Rules**: the replay engine. [`rules::VariantAttributeRules`]
//!   accumulates [`rules::AttributeRule`] implementations (or plain
//!   closures) and materializes their combined effect on demand.
//! - **Variant**: the minimal owner. [`variant::VariantMetadata`] holds base
//!   attributes and a rule set, and computes effective attributes lazily on
//!   every query.
//!
//! # Architecture
//!
//! This crate is the attribute-sequencing core of a dependency-resolution
//! engine. It contains no matching, disambiguation, or graph-building
//! concepts — those live in consumers at higher layers, which call in only
//! through [`rules::VariantAttributeRules::apply`] and the
//! [`attributes::AttributesFactory`] seam.

pub mod attributes;
pub mod rules;
pub mod variant;

//! # veripura-verify
//!
//! Verification of generated workflow payloads.
//!
//! This crate provides [`engine::SchemaVerifier`], which implements the
//! [`veripura_core::traits::Verifier`] trait. A payload is checked in two
//! phases:
//!
//! 1. **Structural** — JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic** — rules (`RequiredField`, `NumberRange`, `NonBlankString`,
//!    `Custom`) evaluated against the payload.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use veripura_verify::engine::SchemaVerifier;
//!
//! let mut verifier = SchemaVerifier::new();
//! verifier.register_rule("requirements-listed", Box::new(|payload| {
//!     match payload.get("requirements").and_then(|v| v.as_array()) {
//!         Some(list) if !list.is_empty() => None,
//!         _ => Some("no documents mapped".to_string()),
//!     }
//! }));
//! ```

pub mod engine;

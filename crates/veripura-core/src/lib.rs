//! # veripura-core
//!
//! The workflow runtime for VeriPura.
//!
//! This crate provides:
//! - The trait seams (`TextGenerator`, `Verifier`, `Notary`, `Clock`)
//! - The `WorkflowRequester` that turns a product description into a verified result
//! - The `RunController` that plays a result back one stage at a time
//! - The pure presentation model the renderers draw from
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veripura_core::{RunController, WorkflowRequester, controller::run_blocking};
//! ```

pub mod clock;
pub mod controller;
pub mod present;
pub mod prompt;
pub mod requester;
pub mod traits;

pub use controller::{RunController, Transition};
pub use requester::WorkflowRequester;

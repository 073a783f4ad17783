//! # veripura-contracts
//!
//! Shared types, schemas, and contracts for the VeriPura workflow simulator.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod industry;
pub mod stage;
pub mod verify;
pub mod workflow;

//! Runtime error types for the VeriPura workflow simulator.
//!
//! All fallible operations return `VeriPuraResult<T>`. Variants carry enough
//! context to produce a useful log line at the run boundary.

use thiserror::Error;

/// The unified error type for VeriPura.
#[derive(Debug, Error)]
pub enum VeriPuraError {
    /// The product description was empty; no run was started.
    #[error("product description must not be empty")]
    EmptyInput,

    /// A run is already in flight; the trigger was refused.
    #[error("a workflow run is already in progress")]
    RunInProgress,

    /// The outbound generation call failed (transport, HTTP status, credential).
    #[error("generation request failed: {reason}")]
    RequestFailed { reason: String },

    /// The generated text could not be parsed or violated the result schema.
    #[error("malformed generation response: {reason}")]
    MalformedResponse { reason: String },

    /// The notarization ledger could not record a stage.
    #[error("notarization failed: {reason}")]
    NotaryFailed { reason: String },

    /// A settings value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The run controller was driven through an illegal transition.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },
}

/// Convenience alias used throughout the VeriPura crates.
pub type VeriPuraResult<T> = Result<T, VeriPuraError>;

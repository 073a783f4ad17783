//! Trait seams of the VeriPura workflow.
//!
//! - `TextGenerator` — the external generative-text service (untrusted output)
//! - `Verifier`      — checks generated JSON before it becomes a result
//! - `Notary`        — append-only record of every revealed stage
//! - `Clock`         — time source for the step cadence, injectable in tests

use std::{sync::Arc, time::Instant};

use serde_json::Value;

use veripura_contracts::{
    error::VeriPuraResult,
    stage::StageRecord,
    verify::{OutputSchema, VerificationReport},
    workflow::RunId,
};

/// One prompt plus the constraints on the shape of the reply.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// MIME type the service is asked to answer in, e.g. "application/json".
    pub response_mime_type: String,
    /// JSON Schema the reply must satisfy. Backends translate it into their
    /// own schema dialect.
    pub response_schema: Value,
}

/// A service that turns a prompt into text.
///
/// Implementations perform exactly one outbound call per invocation and never
/// retry internally.
pub trait TextGenerator: Send + Sync {
    /// Return the raw generated text.
    ///
    /// Transport and service failures map to `VeriPuraError::RequestFailed`.
    fn generate(&self, request: &GenerationRequest) -> VeriPuraResult<String>;
}

/// Checks a parsed payload against an `OutputSchema`.
pub trait Verifier: Send + Sync {
    /// Return a report with `passed = true` if all rules pass, or
    /// `passed = false` with populated `failures`.
    fn verify(&self, payload: &Value, schema: &OutputSchema) -> VeriPuraResult<VerificationReport>;
}

/// The notarization ledger.
///
/// Every revealed stage produces exactly one `StageRecord`. Records are never
/// modified once written.
pub trait Notary: Send + Sync {
    /// Append one stage record to the chain of its run.
    fn record(&self, record: &StageRecord) -> VeriPuraResult<()>;

    /// Close the chain of `run_id` and return its terminal hash (hex).
    fn seal(&self, run_id: &RunId) -> VeriPuraResult<String>;

    /// Drop the unsealed chain of an aborted run. Unknown runs are a no-op.
    fn discard(&self, run_id: &RunId) -> VeriPuraResult<()>;
}

impl<N: Notary + ?Sized> Notary for Arc<N> {
    fn record(&self, record: &StageRecord) -> VeriPuraResult<()> {
        (**self).record(record)
    }

    fn seal(&self, run_id: &RunId) -> VeriPuraResult<String> {
        (**self).seal(run_id)
    }

    fn discard(&self, run_id: &RunId) -> VeriPuraResult<()> {
        (**self).discard(run_id)
    }
}

/// Time source for blocking drivers.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block until `deadline` has passed. Returns immediately if it already has.
    fn sleep_until(&self, deadline: Instant);
}

//! The requester both front-ends use.
//!
//! A `SchemaVerifier` over the base workflow schema: structural checks plus
//! the confidence range. Replies the schema accepts are played back as-is,
//! including unusual HS code notations and anomalies flagged without detail.

use veripura_core::{requester::WorkflowRequester, traits::TextGenerator};
use veripura_verify::engine::SchemaVerifier;

/// Wrap `generator` in a requester that verifies with `SchemaVerifier`.
pub fn trade_requester(generator: Box<dyn TextGenerator>) -> WorkflowRequester {
    WorkflowRequester::new(generator, Box::new(SchemaVerifier::new()))
}

//! The workflow-simulation requester.
//!
//! One call to `request()` performs:
//!
//!   prompt → TextGenerator::generate → parse JSON → Verifier::verify → WorkflowResult
//!
//! Anything that goes wrong after the generator returns is a
//! `MalformedResponse`; a result is never defaulted into existence.

use serde_json::Value;
use tracing::{debug, info, warn};

use veripura_contracts::{
    error::{VeriPuraError, VeriPuraResult},
    industry::Industry,
    verify::{OutputSchema, VerificationRule, VerificationRuleType},
    workflow::WorkflowResult,
};

use crate::{
    prompt::build_prompt,
    traits::{GenerationRequest, TextGenerator, Verifier},
};

/// MIME type requested from the generation endpoint.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Build the output schema every generated payload is checked against.
///
/// Beyond the JSON Schema (required keys and field types) the only rule is
/// the confidence range. Field contents such as the HS code are shown as the
/// model wrote them.
pub fn workflow_result_schema() -> OutputSchema {
    OutputSchema {
        schema_id: "workflow-result-v1".to_string(),
        json_schema: WorkflowResult::json_schema(),
        rules: vec![VerificationRule {
            rule_id: "confidence-range".to_string(),
            description: "Confidence is a percentage".to_string(),
            rule_type: VerificationRuleType::NumberRange {
                field_path: "confidenceScore".to_string(),
                min: 0.0,
                max: 100.0,
            },
        }],
    }
}

/// Turns (industry, product description) into a verified `WorkflowResult`.
///
/// Stateless between calls: no caching, no retries, no rate limiting.
pub struct WorkflowRequester {
    generator: Box<dyn TextGenerator>,
    verifier: Box<dyn Verifier>,
    schema: OutputSchema,
}

impl WorkflowRequester {
    pub fn new(generator: Box<dyn TextGenerator>, verifier: Box<dyn Verifier>) -> Self {
        Self {
            generator,
            verifier,
            schema: workflow_result_schema(),
        }
    }

    /// Request one simulated workflow.
    ///
    /// The caller guarantees `product_description` is non-empty.
    ///
    /// # Errors
    ///
    /// - `RequestFailed` when the generator fails.
    /// - `MalformedResponse` when the text is not JSON, fails verification, or
    ///   does not deserialize.
    pub fn request(
        &self,
        industry: Industry,
        product_description: &str,
    ) -> VeriPuraResult<WorkflowResult> {
        let request = GenerationRequest {
            prompt: build_prompt(industry, product_description),
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: self.schema.json_schema.clone(),
        };

        info!(industry = %industry, "requesting workflow simulation");
        let text = self.generator.generate(&request)?;
        debug!(bytes = text.len(), "generation response received");

        self.parse(&text)
    }

    /// Parse and verify raw generated text.
    pub fn parse(&self, text: &str) -> VeriPuraResult<WorkflowResult> {
        let payload: Value = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
            warn!(error = %e, "generated text is not valid JSON");
            VeriPuraError::MalformedResponse {
                reason: format!("response is not valid JSON: {e}"),
            }
        })?;

        let report = self.verifier.verify(&payload, &self.schema)?;
        if !report.passed {
            let reason = report.summary();
            warn!(schema_id = %self.schema.schema_id, %reason, "generated payload rejected");
            return Err(VeriPuraError::MalformedResponse { reason });
        }

        serde_json::from_value(payload).map_err(|e| VeriPuraError::MalformedResponse {
            reason: format!("response does not match the workflow result shape: {e}"),
        })
    }
}

/// Remove a surrounding Markdown code fence, if any.
///
/// Models occasionally wrap JSON in ```json … ``` even when asked not to.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

//! The synthesized workflow payload and the identifiers of a run.

use serde::{Deserialize, Serialize};

/// Unique identifier for a single run.
///
/// Keys the notarization chain and lets the controller discard fetch outcomes
/// that belong to a run it is no longer tracking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The structured result synthesized by the generation endpoint for one run.
///
/// Wire names are camelCase to match the response schema sent upstream.
/// Created once per run and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResult {
    /// Product category assigned by the classification agent.
    pub classification: String,
    /// Harmonized System code, as written by the model.
    pub hs_code: String,
    /// Documents the shipment needs, one entry per document.
    pub requirements: Vec<String>,
    /// Key facts pulled from the shipping documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_data: Option<String>,
    /// Outcome of the regulatory rules check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_result: Option<String>,
    /// Whether the audit agent flagged the documents. Absent means no.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_found: Option<bool>,
    /// What was flagged. May be absent even when `anomaly_found` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_detail: Option<String>,
    /// Confidence on a 0–100 scale.
    pub confidence_score: f64,
    /// Explicit routing decision; overrides the confidence threshold.
    #[serde(
        default,
        rename = "needsHITM",
        skip_serializing_if = "Option::is_none"
    )]
    pub needs_hitm: Option<bool>,
}

impl WorkflowResult {
    /// Field names the generation endpoint must always return.
    pub const REQUIRED_FIELDS: [&'static str; 4] =
        ["classification", "hsCode", "requirements", "confidenceScore"];

    /// Field names the generation endpoint may omit.
    pub const OPTIONAL_FIELDS: [&'static str; 5] = [
        "extractionData",
        "validationResult",
        "anomalyFound",
        "anomalyDetail",
        "needsHITM",
    ];

    /// An absent flag counts as "no anomaly".
    pub fn has_anomaly(&self) -> bool {
        self.anomaly_found.unwrap_or(false)
    }

    /// Decide where the transaction goes after scoring.
    ///
    /// An explicit `needsHITM` always wins. Without it, a confidence below
    /// `hitm_threshold` routes to manual review, so a reply that omits the
    /// flag can show `ROUTE TO HITM` where a flag-only reading would show
    /// `AUTO-APPROVE`.
    pub fn routing(&self, hitm_threshold: f64) -> Routing {
        let needs_review = self
            .needs_hitm
            .unwrap_or(self.confidence_score < hitm_threshold);
        if needs_review {
            Routing::RouteToHitm
        } else {
            Routing::AutoApprove
        }
    }

    /// JSON Schema document describing a valid payload.
    ///
    /// Used by the verifier for structural validation of the generated text.
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "classification": { "type": "string" },
                "hsCode": { "type": "string" },
                "requirements": { "type": "array", "items": { "type": "string" } },
                "extractionData": { "type": "string" },
                "validationResult": { "type": "string" },
                "anomalyFound": { "type": "boolean" },
                "anomalyDetail": { "type": "string" },
                "confidenceScore": { "type": "number" },
                "needsHITM": { "type": "boolean" }
            },
            "required": Self::REQUIRED_FIELDS
        })
    }
}

/// Where a scored transaction is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Routing {
    AutoApprove,
    RouteToHitm,
}

impl Routing {
    /// Label shown on the Confidence Scorer card.
    pub fn action_label(self) -> &'static str {
        match self {
            Routing::AutoApprove => "AUTO-APPROVE",
            Routing::RouteToHitm => "ROUTE TO HITM",
        }
    }
}

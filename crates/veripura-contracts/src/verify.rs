//! Output verification schema and report types.
//!
//! Before generated text becomes a `WorkflowResult`, the verifier runs the
//! parsed JSON against an `OutputSchema`. Only a passing `VerificationReport`
//! lets the payload through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the verifier checks a generated payload against.
///
/// Combines a JSON Schema document with business rules JSON Schema does not
/// express well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Unique identifier for this schema (e.g. "workflow-result-v1").
    pub schema_id: String,
    /// A JSON Schema document used for structural validation. `Null` skips it.
    pub json_schema: Value,
    /// Additional rules evaluated after structural validation.
    pub rules: Vec<VerificationRule>,
}

/// A single verification rule applied to a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRule {
    /// Referenced in failure reports.
    pub rule_id: String,
    pub description: String,
    pub rule_type: VerificationRuleType,
}

/// The kinds of checks the verifier supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationRuleType {
    /// The field at `field_path` must be present and non-null.
    RequiredField {
        /// Dotted path, e.g. "shipment.origin".
        field_path: String,
    },

    /// The numeric field at `field_path` must lie within `[min, max]`.
    NumberRange {
        field_path: String,
        min: f64,
        max: f64,
    },

    /// The field at `field_path` must be a string with visible content.
    NonBlankString { field_path: String },

    /// Delegate to a named function registered with the verifier.
    Custom { function_name: String },
}

/// The result of running all rules in an `OutputSchema` against a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if all rules passed.
    pub passed: bool,
    /// Every failure collected during the run. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    /// Failure messages joined into one line, for error reasons.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single rule failure within a `VerificationReport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub rule_id: String,
    pub message: String,
}

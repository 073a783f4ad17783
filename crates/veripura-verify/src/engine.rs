//! Schema-based payload verifier.
//!
//! `SchemaVerifier` implements the `Verifier` trait from `veripura-core`.
//! Verification runs in two phases:
//!
//! 1. **Structural** — the payload is validated against
//!    `OutputSchema::json_schema` using the `jsonschema` crate.
//! 2. **Semantic** — each `VerificationRule` in `OutputSchema::rules` is
//!    evaluated in order. All failures are collected before returning.
//!
//! Custom rules delegate to named functions registered via `register_rule`,
//! so industry-specific checks stay with the catalog that needs them.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use veripura_contracts::{
    error::VeriPuraResult,
    verify::{OutputSchema, VerificationFailure, VerificationReport, VerificationRuleType},
};
use veripura_core::traits::Verifier;

/// A caller-supplied verification function.
///
/// Receives the full payload. Returns `Some(message)` when the check fails,
/// or `None` on success.
pub type CustomVerifierFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// JSON Schema structural validation plus a set of semantic rules.
pub struct SchemaVerifier {
    custom_rules: HashMap<String, CustomVerifierFn>,
}

impl SchemaVerifier {
    /// Create a verifier with no custom rules registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Register a custom verification function under `name`.
    ///
    /// The name must match the `function_name` of a `Custom` rule.
    /// Registering the same name twice replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomVerifierFn) {
        self.custom_rules.insert(name.into(), f);
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Resolve a dot-notation path (e.g. `"shipment.origin"`). Returns `None`
    /// when any segment is missing or the value is JSON `null`.
    fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
        let mut current = value;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(v) if !v.is_null() => current = v,
                _ => return None,
            }
        }
        Some(current)
    }

    fn structural_failures(payload: &Value, schema: &OutputSchema) -> Vec<VerificationFailure> {
        if schema.json_schema.is_null() {
            return vec![];
        }
        match jsonschema::validator_for(&schema.json_schema) {
            Ok(validator) => validator
                .iter_errors(payload)
                .map(|error| {
                    let message = format!(
                        "JSON Schema violation at '{}': {}",
                        error.instance_path, error
                    );
                    warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                    VerificationFailure {
                        rule_id: "json-schema".to_string(),
                        message,
                    }
                })
                .collect(),
            Err(e) => {
                let message = format!("invalid JSON Schema document: {e}");
                warn!(schema_id = %schema.schema_id, %message, "schema compilation failure");
                vec![VerificationFailure {
                    rule_id: "json-schema".to_string(),
                    message,
                }]
            }
        }
    }

    fn check_rule(&self, payload: &Value, rule_type: &VerificationRuleType) -> Option<String> {
        match rule_type {
            VerificationRuleType::RequiredField { field_path } => {
                match Self::resolve_path(payload, field_path) {
                    Some(_) => None,
                    None => Some(format!("required field '{field_path}' is missing or null")),
                }
            }

            VerificationRuleType::NumberRange { field_path, min, max } => {
                match Self::resolve_path(payload, field_path).map(Value::as_f64) {
                    None => Some(format!("field '{field_path}' is missing; cannot check range")),
                    Some(None) => Some(format!("field '{field_path}' is not a number")),
                    Some(Some(n)) if n < *min || n > *max => Some(format!(
                        "field '{field_path}' is {n}, outside [{min}, {max}]"
                    )),
                    Some(Some(_)) => None,
                }
            }

            VerificationRuleType::NonBlankString { field_path } => {
                match Self::resolve_path(payload, field_path).and_then(Value::as_str) {
                    Some(s) if !s.trim().is_empty() => None,
                    Some(_) => Some(format!("field '{field_path}' is blank")),
                    None => Some(format!("field '{field_path}' is not a string")),
                }
            }

            // An unregistered name is itself a failure.
            VerificationRuleType::Custom { function_name } => {
                match self.custom_rules.get(function_name.as_str()) {
                    Some(f) => f(payload),
                    None => Some(format!(
                        "no custom rule registered for function name '{function_name}'"
                    )),
                }
            }
        }
    }
}

impl Default for SchemaVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier for SchemaVerifier {
    /// Verify `payload` against `schema`, accumulating every failure.
    fn verify(&self, payload: &Value, schema: &OutputSchema) -> VeriPuraResult<VerificationReport> {
        let mut failures = Self::structural_failures(payload, schema);

        for rule in &schema.rules {
            debug!(
                rule_id = %rule.rule_id,
                description = %rule.description,
                "evaluating verification rule"
            );
            if let Some(message) = self.check_rule(payload, &rule.rule_type) {
                warn!(rule_id = %rule.rule_id, %message, "semantic rule failed");
                failures.push(VerificationFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "verification complete"
        );

        Ok(VerificationReport { passed, failures })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

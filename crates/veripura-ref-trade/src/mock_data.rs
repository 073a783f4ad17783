//! Canned workflow results for offline runs.
//!
//! All data in this module is hardcoded and fictional. `CannedGenerator`
//! stands in for the generation service: it reads the industry and product
//! back out of the prompt and answers with the matching canned JSON.

use serde_json::{json, Value};
use tracing::debug;

use veripura_contracts::{
    error::{VeriPuraError, VeriPuraResult},
    industry::Industry,
};
use veripura_core::traits::{GenerationRequest, TextGenerator};

// ── Canned results ───────────────────────────────────────────────────────────

/// The canned result for one industry.
///
/// Food and cosmetics auto-approve; pharma carries an anomaly and routes to
/// manual review. Fashion has no explicit flag and scores under the default
/// threshold.
pub fn canned_result(industry: Industry, product: &str) -> Value {
    match industry {
        Industry::Food => json!({
            "classification": "Food Product",
            "hsCode": "0804.50",
            "requirements": ["Phytosanitary Certificate", "Organic Certification"],
            "extractionData": format!(
                "Product: {product}; Origin: Philippines; Lot: MNG-2291; Net weight: 1,200 kg"
            ),
            "validationResult": "Pesticide residues within EU MRLs. Organic certificate valid.",
            "anomalyFound": false,
            "confidenceScore": 92,
            "needsHITM": false
        }),
        Industry::Fashion => json!({
            "classification": "Apparel, Synthetic Fibres",
            "hsCode": "6201.40",
            "requirements": [
                "Certificate of Origin",
                "REACH Declaration",
                "Tier 2 Supplier Audit",
                "Fibre Composition Test Report"
            ],
            "extractionData": format!("Product: {product}; Composition: 100% recycled polyester; Mill: Tier 2 unverified"),
            "validationResult": "No restricted azo dyes found. Tier 2 audit older than 12 months.",
            "anomalyFound": false,
            "confidenceScore": 81
        }),
        Industry::PetFood => json!({
            "classification": "Animal Feed Preparation",
            "hsCode": "2309.10",
            "requirements": [
                "Veterinary Health Certificate",
                "Salmonella Test Report",
                "BSE-Free Sourcing Declaration"
            ],
            "extractionData": format!(
                "Product: {product}; Salmonella: not detected in 25 g; Protein: 32%"
            ),
            "validationResult": "Microbiological results meet zero-tolerance requirement.",
            "anomalyFound": false,
            "confidenceScore": 88,
            "needsHITM": false
        }),
        Industry::Cosmetics => json!({
            "classification": "Skin Care Preparation",
            "hsCode": "3304.99",
            "requirements": [
                "Cosmetic Product Safety Report",
                "CPNP Notification",
                "INCI Ingredient List"
            ],
            "extractionData": format!("Product: {product}; INCI: Aqua, Ascorbic Acid, Glycerin, Ferulic Acid"),
            "validationResult": "No Annex II prohibited substances detected.",
            "anomalyFound": false,
            "confidenceScore": 90,
            "needsHITM": false
        }),
        Industry::Pharma => json!({
            "classification": "Pharmaceutical Product",
            "hsCode": "3004.10",
            "requirements": [
                "GMP Certificate",
                "Certificate of Analysis",
                "Cold Chain Temperature Log",
                "Qualified Person Release"
            ],
            "extractionData": format!("Product: {product}; Batch: AMX-0457; Storage: 2-8 C"),
            "validationResult": "GMP certificate valid. Temperature log incomplete.",
            "anomalyFound": true,
            "anomalyDetail": "Temperature log gap of 6 hours during transit leg 2",
            "confidenceScore": 80,
            "needsHITM": true
        }),
    }
}

// ── Offline generator ────────────────────────────────────────────────────────

/// A `TextGenerator` that answers from `canned_result` without any I/O.
#[derive(Debug, Default, Clone)]
pub struct CannedGenerator;

impl CannedGenerator {
    pub fn new() -> Self {
        Self
    }

    fn industry_in(prompt: &str) -> Option<Industry> {
        Industry::ALL
            .into_iter()
            .find(|i| prompt.contains(&format!("a {} transaction", i.label())))
    }

    fn product_in(prompt: &str) -> &str {
        prompt
            .lines()
            .find_map(|line| line.trim().strip_prefix("Product: "))
            .unwrap_or("unspecified product")
    }
}

impl TextGenerator for CannedGenerator {
    fn generate(&self, request: &GenerationRequest) -> VeriPuraResult<String> {
        let industry =
            Self::industry_in(&request.prompt).ok_or_else(|| VeriPuraError::RequestFailed {
                reason: "offline generator found no known industry in the prompt".to_string(),
            })?;
        let product = Self::product_in(&request.prompt);
        debug!(industry = %industry, product, "answering from canned data");
        Ok(canned_result(industry, product).to_string())
    }
}

/// A generator whose service is always down.
#[derive(Debug, Default, Clone)]
pub struct UnavailableGenerator;

impl TextGenerator for UnavailableGenerator {
    fn generate(&self, _request: &GenerationRequest) -> VeriPuraResult<String> {
        Err(VeriPuraError::RequestFailed {
            reason: "HTTP 503: UNAVAILABLE: The model is overloaded.".to_string(),
        })
    }
}

//! The generation prompt.

use veripura_contracts::industry::Industry;

/// Confidence below which the prompt asks the model to request manual review.
pub const PROMPT_HITM_THRESHOLD: u8 = 85;

/// Build the single instruction sent to the generation endpoint.
///
/// The text names the six agent roles and leaves the exact JSON shape to the
/// response schema that accompanies the request.
pub fn build_prompt(industry: Industry, product_description: &str) -> String {
    format!(
        "Act as the VeriPura Multi-Agent AI Engine.\n\
         You are validating a document for a {industry} transaction.\n\
         Product: {product}\n\
         \n\
         Based on the VeriPura platform architecture, simulate the output of these 6 agents:\n\
         1. Product Classification Agent (HS Code assignment)\n\
         2. Requirement Mapper Agent (What documents are needed?)\n\
         3. Document Extraction Agent (Simulate OCR data extraction from a generic certificate)\n\
         4. Validation Agent (Compliance checks vs standards like MRLs, GMP, REACH)\n\
         5. Anomaly Detection Agent (Looking for suspicious patterns)\n\
         6. Confidence Scoring Agent (Final score 0-100% and route to HITM if < {threshold}%)\n\
         \n\
         Return a JSON object following this schema.",
        industry = industry.label(),
        product = product_description,
        threshold = PROMPT_HITM_THRESHOLD,
    )
}

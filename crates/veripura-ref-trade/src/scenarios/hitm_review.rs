//! Scenario 2: HITM review
//!
//! A pharmaceutical batch whose temperature log has a gap. The anomaly stage
//! raises an alert, the score lands at 80% with `needsHITM` set, and the
//! transaction is routed to a human validator.

use veripura_contracts::{error::VeriPuraResult, industry::Industry};
use veripura_core::present::{summary, AgentCard};

use super::{play, print_ledger, Playback};
use crate::{catalog::sample_product, mock_data::CannedGenerator};

const HITM_THRESHOLD: f64 = 85.0;

pub fn play_scenario() -> VeriPuraResult<Playback> {
    play(
        Box::new(CannedGenerator::new()),
        Industry::Pharma,
        sample_product(Industry::Pharma),
    )
}

pub fn run_scenario() -> VeriPuraResult<()> {
    println!("=== Scenario 2: HITM review ===");
    println!();

    let playback = play_scenario()?;
    println!();

    if let Some(result) = playback.controller.result() {
        println!(
            "  {}: {}",
            AgentCard::AnomalyDetection.name(),
            AgentCard::AnomalyDetection.content(result, HITM_THRESHOLD)
        );
        println!(
            "  {}: {}",
            AgentCard::ConfidenceScorer.name(),
            AgentCard::ConfidenceScorer
                .content(result, HITM_THRESHOLD)
                .replace('\n', " | ")
        );
    }
    if let Some(view) = summary(playback.controller.result(), false, HITM_THRESHOLD) {
        println!("  {}", view.trust_framework);
    }
    println!();
    print_ledger(&playback);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

//! Scenario 1: Auto-approve
//!
//! A Food Import run for organic sun-dried mangoes. The canned result has
//! clean documents and a 92% score, so the transaction is approved without
//! manual review.
//!
//!   1. Requester sends the prompt; the offline generator answers
//!   2. Trade verifier accepts the payload
//!   3. Six stages are revealed, one per step delay
//!   4. Ledger seals the run; the notarization line carries its hash
//!   5. Summary panel shows the token reward and AUTO-APPROVE

use veripura_contracts::{error::VeriPuraResult, industry::Industry};
use veripura_core::present::{agent_cards, summary, AgentCard};

use super::{play, print_ledger, Playback};
use crate::{catalog::sample_product, mock_data::CannedGenerator};

/// Default routing threshold used when printing the outcome.
const HITM_THRESHOLD: f64 = 85.0;

/// Play the run without printing the closing report.
pub fn play_scenario() -> VeriPuraResult<Playback> {
    play(
        Box::new(CannedGenerator::new()),
        Industry::Food,
        sample_product(Industry::Food),
    )
}

pub fn run_scenario() -> VeriPuraResult<()> {
    println!("=== Scenario 1: Auto-approve ===");
    println!();

    let playback = play_scenario()?;
    println!();

    if let Some(result) = playback.controller.result() {
        let cards = agent_cards(playback.controller.step(), Some(result), HITM_THRESHOLD);
        for card in cards.iter().filter(|c| c.card == AgentCard::ConfidenceScorer) {
            let content = card.content.as_deref().unwrap_or_default();
            println!("  {}: {}", card.card.name(), content.replace('\n', " | "));
        }
    }
    if let Some(view) = summary(
        playback.controller.result(),
        playback.controller.is_in_progress(),
        HITM_THRESHOLD,
    ) {
        for line in view.lines() {
            println!("  {line}");
        }
    }
    println!();
    print_ledger(&playback);
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use veripura_contracts::workflow::Routing;
    use veripura_core::controller::DEFAULT_STEP_DELAY;

    use super::*;

    #[test]
    fn mango_run_completes_and_auto_approves() {
        let playback = play_scenario().unwrap();
        let controller = &playback.controller;

        assert_eq!(controller.step(), 6);
        assert!(!controller.is_in_progress());
        assert_eq!(controller.logs().len(), 8);
        assert_eq!(
            controller.logs()[2].text,
            "[Agent 1] Classified as: Food Product (HS: 0804.50)"
        );
        assert_eq!(controller.logs()[3].text, "[Agent 2] Mapped 2 required documents.");

        let result = controller.result().unwrap();
        assert_eq!(result.routing(HITM_THRESHOLD), Routing::AutoApprove);

        let view = summary(Some(result), false, HITM_THRESHOLD).unwrap();
        assert!(view.lines().iter().any(|l| l.contains("Token Reward: +15 VERI")));
        let scorer = AgentCard::ConfidenceScorer.content(result, HITM_THRESHOLD);
        assert!(scorer.contains("AUTO-APPROVE"));
    }

    #[test]
    fn every_stage_waited_one_delay() {
        let playback = play_scenario().unwrap();
        assert_eq!(playback.waited, DEFAULT_STEP_DELAY * 6);
    }

    #[test]
    fn notarization_hash_is_ledger_terminal_hash() {
        let playback = play_scenario().unwrap();
        let log = playback.ledger.export(&playback.run_id).unwrap();
        assert_eq!(log.entries.len(), 6);
        assert!(log.sealed);
        assert!(playback.ledger.verify_integrity(&playback.run_id));

        let last = &playback.controller.logs()[7].text;
        assert_eq!(
            last,
            &format!(
                "[Blockchain] Transaction notarized on IOTA Tangle. Hash: 0x{}",
                &log.terminal_hash[..16]
            )
        );
    }

    #[test]
    fn run_scenario_succeeds() {
        assert!(run_scenario().is_ok());
    }
}

//! Trade reference scenarios.
//!
//! Each scenario wires real VeriPura components (requester, verifier, run
//! controller, ledger) around a canned generator and plays one run to the
//! end on a manual clock, so the full six-step cadence completes instantly.

pub mod auto_approve;
pub mod hitm_review;
pub mod request_failure;

use std::time::Duration;

use veripura_audit::InMemoryLedger;
use veripura_contracts::{
    error::VeriPuraResult, industry::Industry, stage::LogLine, workflow::RunId,
};
use veripura_core::{
    clock::ManualClock,
    controller::{run_blocking, RunController, DEFAULT_STEP_DELAY},
    traits::TextGenerator,
};

use crate::requester::trade_requester;

/// Everything left behind by one played run.
pub struct Playback {
    pub run_id: RunId,
    pub controller: RunController,
    pub ledger: InMemoryLedger,
    /// Total simulated time spent waiting between stages.
    pub waited: Duration,
}

/// Play one run of `product` under `industry` against `generator`.
pub fn play(
    generator: Box<dyn TextGenerator>,
    industry: Industry,
    product: &str,
) -> VeriPuraResult<Playback> {
    let ledger = InMemoryLedger::new();
    let mut controller = RunController::new(Box::new(ledger.clone()), DEFAULT_STEP_DELAY);
    let requester = trade_requester(generator);
    let clock = ManualClock::new();

    let run_id = run_blocking(
        &mut controller,
        &requester,
        &clock,
        industry,
        product,
        print_line,
    )?;

    Ok(Playback {
        run_id,
        controller,
        ledger,
        waited: clock.slept(),
    })
}

fn print_line(line: &LogLine) {
    println!("  [{}] {}", line.clock(), line.text);
}

/// Print the ledger check that closes every scenario.
fn print_ledger(playback: &Playback) {
    let entries = playback
        .ledger
        .export(&playback.run_id)
        .map(|log| log.entries.len())
        .unwrap_or(0);
    println!(
        "  Ledger chain integrity: {} ({} entr{} in chain)",
        if playback.ledger.verify_integrity(&playback.run_id) {
            "VERIFIED"
        } else {
            "FAILED"
        },
        entries,
        if entries == 1 { "y" } else { "ies" }
    );
}

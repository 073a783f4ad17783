//! Scenario 3: Request failure
//!
//! The generation service is overloaded. The run appends exactly one failure
//! line after its two initialization lines, keeps no result, and leaves
//! nothing in the ledger. No retry is attempted.

use veripura_contracts::{error::VeriPuraResult, industry::Industry};

use super::{play, print_ledger, Playback};
use crate::mock_data::UnavailableGenerator;

pub fn play_scenario() -> VeriPuraResult<Playback> {
    play(
        Box::new(UnavailableGenerator),
        Industry::Cosmetics,
        "Retinol Night Cream 50ml",
    )
}

pub fn run_scenario() -> VeriPuraResult<()> {
    println!("=== Scenario 3: Request failure ===");
    println!();

    let playback = play_scenario()?;
    println!();
    println!(
        "  Result retained: {}",
        if playback.controller.result().is_some() { "yes" } else { "no" }
    );
    println!(
        "  Run in progress: {}",
        if playback.controller.is_in_progress() { "yes" } else { "no" }
    );
    print_ledger(&playback);
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

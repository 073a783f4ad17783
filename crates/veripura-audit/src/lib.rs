//! # veripura-audit
//!
//! Append-only, SHA-256 hash-chained notarization ledger.
//!
//! ## Overview
//!
//! Every stage the run controller reveals is wrapped in a `LedgerEntry` that
//! links to the previous entry of the same run via its hash. Sealing a run
//! returns the terminal hash, which commits to all six stages. Tampering with
//! any entry breaks the chain and is detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veripura_audit::InMemoryLedger;
//!
//! let ledger = InMemoryLedger::new();
//! let mut controller = RunController::new(Box::new(ledger.clone()), delay);
//! // ... run to completion ...
//! assert!(ledger.verify_integrity(&run_id));
//! let log = ledger.export(&run_id);
//! ```

pub mod chain;
pub mod entry;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use entry::{LedgerEntry, NotarizedLog};
pub use memory::InMemoryLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use veripura_contracts::{
        error::VeriPuraError,
        stage::{Stage, StageRecord},
        workflow::RunId,
    };
    use veripura_core::traits::Notary;

    use super::{verify_chain, InMemoryLedger, LedgerEntry};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn make_record(run_id: &RunId, stage: Stage) -> StageRecord {
        StageRecord {
            run_id: run_id.clone(),
            stage,
            payload: json!({ "stage": stage.label() }),
            recorded_at: Utc::now(),
        }
    }

    fn record_all(ledger: &InMemoryLedger, run_id: &RunId) {
        for stage in Stage::ALL {
            ledger.record(&make_record(run_id, stage)).unwrap();
        }
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn full_run_produces_six_linked_entries() {
        let ledger = InMemoryLedger::new();
        let run_id = RunId::new();
        record_all(&ledger, &run_id);

        let log = ledger.export(&run_id).unwrap();
        assert_eq!(log.entries.len(), 6);
        assert_eq!(log.entries[0].prev_hash, LedgerEntry::GENESIS_HASH);
        for (idx, entry) in log.entries.iter().enumerate() {
            assert_eq!(entry.sequence, idx as u64);
            assert_eq!(entry.record.stage, Stage::ALL[idx]);
        }
        assert!(verify_chain(&log.entries));
        assert!(ledger.verify_integrity(&run_id));
    }

    #[test]
    fn seal_returns_terminal_hash() {
        let ledger = InMemoryLedger::new();
        let run_id = RunId::new();
        record_all(&ledger, &run_id);

        let hash = ledger.seal(&run_id).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        let log = ledger.export(&run_id).unwrap();
        assert!(log.sealed);
        assert_eq!(log.terminal_hash, hash);
        assert_eq!(log.terminal_hash, log.entries.last().unwrap().this_hash);
    }

    #[test]
    fn sealed_run_refuses_more_records() {
        let ledger = InMemoryLedger::new();
        let run_id = RunId::new();
        record_all(&ledger, &run_id);
        ledger.seal(&run_id).unwrap();

        let err = ledger
            .record(&make_record(&run_id, Stage::Notarization))
            .unwrap_err();
        assert!(matches!(err, VeriPuraError::NotaryFailed { .. }));
        assert!(ledger.seal(&run_id).is_err(), "double seal must fail");
    }

    #[test]
    fn sealing_unknown_run_fails() {
        let ledger = InMemoryLedger::new();
        let err = ledger.seal(&RunId::new()).unwrap_err();
        assert!(matches!(err, VeriPuraError::NotaryFailed { .. }));
    }

    #[test]
    fn discard_drops_unsealed_chain_only() {
        let ledger = InMemoryLedger::new();
        let aborted = RunId::new();
        let finished = RunId::new();
        ledger.record(&make_record(&aborted, Stage::Intake)).unwrap();
        ledger.record(&make_record(&aborted, Stage::Mapping)).unwrap();
        record_all(&ledger, &finished);
        ledger.seal(&finished).unwrap();

        ledger.discard(&aborted).unwrap();
        assert!(ledger.export(&aborted).is_none());
        assert_eq!(ledger.run_count(), 1);

        assert!(ledger.discard(&finished).is_err());
        assert_eq!(ledger.export(&finished).unwrap().entries.len(), 6);

        ledger.discard(&RunId::new()).unwrap();
    }

    #[test]
    fn runs_have_independent_chains() {
        let ledger = InMemoryLedger::new();
        let first = RunId::new();
        let second = RunId::new();
        record_all(&ledger, &first);
        record_all(&ledger, &second);

        let a = ledger.seal(&first).unwrap();
        let b = ledger.seal(&second).unwrap();
        assert_ne!(a, b, "terminal hash commits to the run id");
        assert_eq!(ledger.run_count(), 2);
        assert_eq!(
            ledger.export(&second).unwrap().entries[0].prev_hash,
            LedgerEntry::GENESIS_HASH
        );
    }

    #[test]
    fn tampering_breaks_the_chain() {
        let ledger = InMemoryLedger::new();
        let run_id = RunId::new();
        record_all(&ledger, &run_id);

        {
            let mut chains = ledger.chains.lock().unwrap();
            let chain = chains.get_mut(&run_id).unwrap();
            chain.entries[2].record.payload = json!({ "extractionData": "TAMPERED" });
        }

        assert!(!ledger.verify_integrity(&run_id));
    }

    #[test]
    fn relinking_a_tampered_entry_is_detected() {
        let ledger = InMemoryLedger::new();
        let run_id = RunId::new();
        record_all(&ledger, &run_id);

        let mut entries = ledger.export(&run_id).unwrap().entries;
        entries.swap(1, 2);
        assert!(!verify_chain(&entries));
    }

    #[test]
    fn clones_share_state() {
        let ledger = InMemoryLedger::new();
        let handle = ledger.clone();
        let run_id = RunId::new();
        ledger.record(&make_record(&run_id, Stage::Intake)).unwrap();
        assert_eq!(handle.export(&run_id).unwrap().entries.len(), 1);
    }

    #[test]
    fn empty_chain_is_valid() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.verify_integrity(&RunId::new()));
        assert!(ledger.export(&RunId::new()).is_none());
        assert!(verify_chain(&[]));
    }
}

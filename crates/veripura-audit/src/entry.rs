//! Ledger entry and sealed-log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veripura_contracts::{stage::StageRecord, workflow::RunId};

/// One revealed stage, linked to the entry before it.
///
/// Modifying any field, including those of the embedded `record`,
/// invalidates `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Position in the run's chain, starting at 0.
    pub sequence: u64,

    pub run_id: RunId,

    pub record: StageRecord,

    /// Hash (hex) of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hash (hex) over (run_id, sequence, prev_hash, record).
    pub this_hash: String,
}

impl LedgerEntry {
    /// The `prev_hash` of the first entry in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of one run's chain.
///
/// `terminal_hash` is the `this_hash` of the last entry and commits to the
/// whole chain. It is the value shown, truncated, in the notarization line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotarizedLog {
    pub run_id: RunId,

    /// Entries in chain order (sequence 0 first).
    pub entries: Vec<LedgerEntry>,

    /// True once the run has been sealed; no further entries are accepted.
    pub sealed: bool,

    /// Wall-clock time (UTC) the snapshot was taken.
    pub exported_at: DateTime<Utc>,

    /// Empty if the chain is empty.
    pub terminal_hash: String,
}

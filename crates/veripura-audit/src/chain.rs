//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. run_id as UTF-8 bytes (hyphenated UUID)
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the stage record

use sha2::{Digest, Sha256};

use veripura_contracts::{
    error::{VeriPuraError, VeriPuraResult},
    stage::StageRecord,
    workflow::RunId,
};

use crate::entry::LedgerEntry;

/// Compute the SHA-256 hash of one ledger entry.
///
/// Commits to the run, the entry's position, its link to the previous entry
/// and the full stage record. Returns a lowercase 64-character hex string.
///
/// # Errors
///
/// `NotaryFailed` if the record cannot be serialized.
pub fn hash_entry(
    run_id: &RunId,
    sequence: u64,
    record: &StageRecord,
    prev_hash: &str,
) -> VeriPuraResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| VeriPuraError::NotaryFailed {
        reason: format!("stage record is not serializable: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(run_id.to_string().as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a chain.
///
/// Valid when every entry's `prev_hash` equals the previous `this_hash`
/// (`GENESIS_HASH` for the first) and every `this_hash` matches the value
/// recomputed from the entry's own fields. An empty chain is valid.
pub fn verify_chain(entries: &[LedgerEntry]) -> bool {
    let mut expected_prev = LedgerEntry::GENESIS_HASH.to_string();

    for entry in entries {
        if entry.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(&entry.run_id, entry.sequence, &entry.record, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}

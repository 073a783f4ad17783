//! In-memory implementation of `Notary`.
//!
//! `InMemoryLedger` keeps one hash chain per run behind a shared `Mutex`.
//! Clones share the same state, so a caller can hand one clone to the run
//! controller and keep another to export or verify chains afterwards.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::Utc;
use tracing::{debug, info, warn};

use veripura_contracts::{
    error::{VeriPuraError, VeriPuraResult},
    stage::StageRecord,
    workflow::RunId,
};
use veripura_core::traits::Notary;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{LedgerEntry, NotarizedLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct Chain {
    pub(crate) entries: Vec<LedgerEntry>,
    pub(crate) last_hash: String,
    pub(crate) sealed: bool,
}

impl Chain {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            last_hash: LedgerEntry::GENESIS_HASH.to_string(),
            sealed: false,
        }
    }
}

// ── Public ledger ─────────────────────────────────────────────────────────────

/// An in-memory, append-only notarization ledger.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    pub(crate) chains: Arc<Mutex<HashMap<RunId, Chain>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> VeriPuraResult<MutexGuard<'_, HashMap<RunId, Chain>>> {
        self.chains.lock().map_err(|e| VeriPuraError::NotaryFailed {
            reason: format!("ledger lock poisoned: {e}"),
        })
    }

    /// Snapshot the chain of `run_id`, or `None` if nothing was recorded.
    pub fn export(&self, run_id: &RunId) -> Option<NotarizedLog> {
        let chains = self.lock().ok()?;
        let chain = chains.get(run_id)?;
        Some(NotarizedLog {
            run_id: run_id.clone(),
            entries: chain.entries.clone(),
            sealed: chain.sealed,
            exported_at: Utc::now(),
            terminal_hash: chain
                .entries
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
        })
    }

    /// Check that the chain of `run_id` has not been tampered with.
    ///
    /// An unknown run has an empty chain, which is valid.
    pub fn verify_integrity(&self, run_id: &RunId) -> bool {
        match self.lock() {
            Ok(chains) => chains
                .get(run_id)
                .map_or(true, |chain| verify_chain(&chain.entries)),
            Err(_) => false,
        }
    }

    /// Number of runs with at least one recorded stage.
    pub fn run_count(&self) -> usize {
        self.lock().map(|chains| chains.len()).unwrap_or(0)
    }
}

// ── Notary impl ───────────────────────────────────────────────────────────────

impl Notary for InMemoryLedger {
    /// Append one stage record to its run's chain.
    ///
    /// # Errors
    ///
    /// `NotaryFailed` if the run is already sealed or the lock is poisoned.
    fn record(&self, record: &StageRecord) -> VeriPuraResult<()> {
        let mut chains = self.lock()?;
        let chain = chains.entry(record.run_id.clone()).or_insert_with(Chain::new);

        if chain.sealed {
            warn!(run_id = %record.run_id, "record refused: run already sealed");
            return Err(VeriPuraError::NotaryFailed {
                reason: format!("run {} is sealed", record.run_id),
            });
        }

        let sequence = chain.entries.len() as u64;
        let prev_hash = chain.last_hash.clone();
        let this_hash = hash_entry(&record.run_id, sequence, record, &prev_hash)?;

        debug!(
            run_id = %record.run_id,
            sequence,
            stage = record.stage.label(),
            "stage notarized"
        );

        chain.entries.push(LedgerEntry {
            sequence,
            run_id: record.run_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        chain.last_hash = this_hash;

        Ok(())
    }

    /// Seal the chain of `run_id` and return its terminal hash.
    ///
    /// # Errors
    ///
    /// `NotaryFailed` if nothing was recorded for the run, or it is already
    /// sealed.
    fn seal(&self, run_id: &RunId) -> VeriPuraResult<String> {
        let mut chains = self.lock()?;
        let chain = chains
            .get_mut(run_id)
            .filter(|chain| !chain.entries.is_empty())
            .ok_or_else(|| VeriPuraError::NotaryFailed {
                reason: format!("no stages recorded for run {run_id}"),
            })?;
        if chain.sealed {
            return Err(VeriPuraError::NotaryFailed {
                reason: format!("run {run_id} is already sealed"),
            });
        }

        chain.sealed = true;
        info!(
            run_id = %run_id,
            entry_count = chain.entries.len(),
            terminal_hash = %chain.last_hash,
            "ledger sealed"
        );

        Ok(chain.last_hash.clone())
    }

    /// Remove the chain of an aborted run.
    ///
    /// # Errors
    ///
    /// `NotaryFailed` if the run is sealed; notarized chains are permanent.
    fn discard(&self, run_id: &RunId) -> VeriPuraResult<()> {
        let mut chains = self.lock()?;
        if chains.get(run_id).is_some_and(|chain| chain.sealed) {
            return Err(VeriPuraError::NotaryFailed {
                reason: format!("run {run_id} is sealed and cannot be discarded"),
            });
        }
        if let Some(chain) = chains.remove(run_id) {
            debug!(run_id = %run_id, entry_count = chain.entries.len(), "partial chain discarded");
        }
        Ok(())
    }
}

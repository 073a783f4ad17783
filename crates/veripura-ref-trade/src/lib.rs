//! # veripura-ref-trade
//!
//! The trade-compliance reference runtime for VeriPura.
//!
//! - [`catalog`] — the five supported industries and their static profiles.
//! - [`requester`] — the verified requester shared by the demo and the TUI.
//! - [`mock_data`] — canned workflow results and an offline `TextGenerator`.
//! - [`scenarios`] — complete runs wired from real components:
//!   1. **Auto-approve** — organic mangoes, clean documents, high confidence.
//!   2. **HITM review** — a pharmaceutical batch with an anomaly.
//!   3. **Request failure** — the generator is unavailable; the run aborts.
//!
//! All canned data is fictional. Scenarios make no network calls.

pub mod catalog;
pub mod mock_data;
pub mod requester;
pub mod scenarios;

pub use catalog::{industry_config, TOTAL_MARKET};
pub use mock_data::CannedGenerator;
pub use requester::trade_requester;

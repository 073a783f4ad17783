//! The run controller: owns `RunState` and plays a result back stage by stage.
//!
//! Lifecycle of one run:
//!
//!   Idle ──begin──▶ Fetching (step 1) ──complete_fetch(Ok)──▶ Revealing
//!     ▲                  │                                        │ tick × 6
//!     └──────(Err)───────┘◀───────────── after stage 6 ───────────┘
//!
//! Every transition out of `Revealing` waits for the step delay. Time is
//! passed in by the caller (`tick(now)`), so playback is deterministic under
//! test. At most one run is in flight; `begin` refuses while one is.

use std::time::{Duration, Instant};

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use veripura_contracts::{
    error::{VeriPuraError, VeriPuraResult},
    industry::Industry,
    stage::{LogLine, Stage, StageRecord},
    workflow::{RunId, WorkflowResult},
};

use crate::{
    requester::WorkflowRequester,
    traits::{Clock, Notary},
};

/// Default delay between two revealed stages.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1200);

/// The single log line appended when a run fails.
pub const FAILURE_LINE: &str = "ERROR: Orchestration failure. Run aborted.";

/// Hex characters of the ledger hash shown in the notarization line.
const HASH_DISPLAY_LEN: usize = 16;

/// What a caller needs to dispatch the fetch for a freshly begun run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub run_id: RunId,
    pub industry: Industry,
    /// The trimmed product description.
    pub product_description: String,
}

/// An observable change produced by `tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A stage finished and the step index moved to `step`.
    Advanced { step: u8, line: String },
    /// The notarization stage finished; the result is now visible.
    Completed { line: String, notarization_hash: String },
    /// The run was abandoned and the failure line appended.
    Aborted { reason: String },
}

enum Phase {
    Idle,
    Fetching { run_id: RunId },
    Revealing {
        run_id: RunId,
        result: WorkflowResult,
        due: Instant,
    },
}

/// Owns the transient state of the presentation layer.
///
/// - `step`: 0 when idle, 1–6 while a run is visible
/// - `in_progress`: true from `begin` until completion or failure
/// - `logs`: cleared at `begin`, append-only during a run
/// - `result`: set only after the sixth stage completes
pub struct RunController {
    notary: Box<dyn Notary>,
    step_delay: Duration,
    step: u8,
    in_progress: bool,
    logs: Vec<LogLine>,
    result: Option<WorkflowResult>,
    phase: Phase,
}

impl RunController {
    pub fn new(notary: Box<dyn Notary>, step_delay: Duration) -> Self {
        Self {
            notary,
            step_delay,
            step: 0,
            in_progress: false,
            logs: Vec::new(),
            result: None,
            phase: Phase::Idle,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn logs(&self) -> &[LogLine] {
        &self.logs
    }

    pub fn result(&self) -> Option<&WorkflowResult> {
        self.result.as_ref()
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// The run currently being fetched or revealed.
    pub fn active_run(&self) -> Option<&RunId> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Fetching { run_id } | Phase::Revealing { run_id, .. } => Some(run_id),
        }
    }

    /// True while the fetch for the active run has not come back.
    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, Phase::Fetching { .. })
    }

    /// When the next stage is due, if playback is running.
    pub fn next_due(&self) -> Option<Instant> {
        match &self.phase {
            Phase::Revealing { due, .. } => Some(*due),
            _ => None,
        }
    }

    /// Start a run.
    ///
    /// Clears the log and the previous result, moves to step 1 and appends
    /// the two initialization lines. The caller then performs the fetch and
    /// reports back through `complete_fetch`.
    ///
    /// # Errors
    ///
    /// - `RunInProgress` if a run is active; state is left untouched.
    /// - `EmptyInput` if the description is blank; state is left untouched.
    pub fn begin(
        &mut self,
        industry: Industry,
        product_description: &str,
    ) -> VeriPuraResult<RunTicket> {
        if self.in_progress {
            debug!("run trigger refused: run already in progress");
            return Err(VeriPuraError::RunInProgress);
        }
        let product_description = product_description.trim();
        if product_description.is_empty() {
            debug!("run trigger refused: empty product description");
            return Err(VeriPuraError::EmptyInput);
        }

        let run_id = RunId::new();
        info!(run_id = %run_id, industry = %industry, "workflow run started");

        self.in_progress = true;
        self.result = None;
        self.step = 1;
        self.logs = vec![
            LogLine::new("Initializing VeriPura Multi-Agent Orchestrator..."),
            LogLine::new(format!("Setting regulatory context for {}", industry.label())),
        ];
        self.phase = Phase::Fetching { run_id: run_id.clone() };

        Ok(RunTicket {
            run_id,
            industry,
            product_description: product_description.to_string(),
        })
    }

    /// Deliver the outcome of the fetch for `run_id`.
    ///
    /// On success playback starts and the first stage is due one step delay
    /// after `now`. On failure the run is aborted: one failure line, no
    /// result, not in progress.
    ///
    /// # Errors
    ///
    /// `StateMachineError` if `run_id` is not the run awaiting its fetch.
    /// The outcome is discarded in that case.
    pub fn complete_fetch(
        &mut self,
        run_id: &RunId,
        outcome: VeriPuraResult<WorkflowResult>,
        now: Instant,
    ) -> VeriPuraResult<Option<Transition>> {
        match &self.phase {
            Phase::Fetching { run_id: pending } if pending == run_id => {}
            _ => {
                warn!(run_id = %run_id, "discarding fetch outcome for inactive run");
                return Err(VeriPuraError::StateMachineError {
                    reason: format!("no fetch pending for run {run_id}"),
                });
            }
        }

        match outcome {
            Ok(result) => {
                debug!(run_id = %run_id, "fetch complete, starting playback");
                self.phase = Phase::Revealing {
                    run_id: run_id.clone(),
                    result,
                    due: now + self.step_delay,
                };
                Ok(None)
            }
            Err(e) => Ok(Some(self.abort(e))),
        }
    }

    /// Reveal the current stage if its delay has elapsed.
    ///
    /// At most one stage is revealed per call, and the next stage is due one
    /// full delay after `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Transition> {
        let Phase::Revealing { run_id, result, due } = &mut self.phase else {
            return None;
        };
        if now < *due {
            return None;
        }

        let stage = Stage::from_ordinal(self.step)?;
        let record = StageRecord {
            run_id: run_id.clone(),
            stage,
            payload: stage_payload(stage, result),
            recorded_at: Utc::now(),
        };
        if let Err(e) = self.notary.record(&record) {
            return Some(self.abort(e));
        }

        if stage != Stage::Notarization {
            let line = stage_log_line(stage, result, "");
            *due = now + self.step_delay;
            self.logs.push(LogLine::new(line.clone()));
            self.step += 1;
            debug!(step = self.step, stage = stage.label(), "stage revealed");
            return Some(Transition::Advanced { step: self.step, line });
        }

        let terminal_hash = match self.notary.seal(run_id) {
            Ok(hash) => hash,
            Err(e) => return Some(self.abort(e)),
        };
        let notarization_hash: String = terminal_hash.chars().take(HASH_DISPLAY_LEN).collect();
        let line = stage_log_line(stage, result, &notarization_hash);
        info!(run_id = %run_id, hash = %notarization_hash, "workflow run complete");

        self.logs.push(LogLine::new(line.clone()));
        if let Phase::Revealing { result, .. } = std::mem::replace(&mut self.phase, Phase::Idle) {
            self.result = Some(result);
        }
        self.in_progress = false;

        Some(Transition::Completed { line, notarization_hash })
    }

    fn abort(&mut self, error: VeriPuraError) -> Transition {
        warn!(error = %error, step = self.step, "workflow run aborted");
        if let Some(run_id) = self.active_run().cloned() {
            if let Err(e) = self.notary.discard(&run_id) {
                warn!(run_id = %run_id, error = %e, "partial ledger chain not discarded");
            }
        }
        self.logs.push(LogLine::new(FAILURE_LINE));
        self.result = None;
        self.in_progress = false;
        self.step = 0;
        self.phase = Phase::Idle;
        Transition::Aborted { reason: error.to_string() }
    }
}

/// The fixed log line of a stage, filled from the already-fetched result.
///
/// `hash` is only used by the notarization stage.
pub fn stage_log_line(stage: Stage, result: &WorkflowResult, hash: &str) -> String {
    match stage {
        Stage::Intake => format!(
            "[Agent 1] Classified as: {} (HS: {})",
            result.classification, result.hs_code
        ),
        Stage::Mapping => format!(
            "[Agent 2] Mapped {} required documents.",
            result.requirements.len()
        ),
        Stage::Extraction => {
            "[Agent 3] Extracted data successfully with high confidence.".to_string()
        }
        Stage::Validation => "[Agent 4] Validating against Global Regulations...".to_string(),
        Stage::Audit if result.has_anomaly() => "[Agent 5] ALERT: Anomaly Detected!".to_string(),
        Stage::Audit => "[Agent 5] No anomalies found in documentation sequence.".to_string(),
        Stage::Notarization => format!(
            "[Blockchain] Transaction notarized on IOTA Tangle. Hash: 0x{hash}"
        ),
    }
}

/// The slice of the result a stage reveals, as written to the ledger.
fn stage_payload(stage: Stage, result: &WorkflowResult) -> serde_json::Value {
    match stage {
        Stage::Intake => json!({
            "classification": result.classification,
            "hsCode": result.hs_code,
        }),
        Stage::Mapping => json!({ "requirements": result.requirements }),
        Stage::Extraction => json!({ "extractionData": result.extraction_data }),
        Stage::Validation => json!({ "validationResult": result.validation_result }),
        Stage::Audit => json!({
            "anomalyFound": result.has_anomaly(),
            "anomalyDetail": result.anomaly_detail,
        }),
        Stage::Notarization => serde_json::to_value(result).unwrap_or(serde_json::Value::Null),
    }
}

/// Perform one complete run on the calling thread.
///
/// Blocks through the fetch and every stage delay using `clock`. Each log
/// line is handed to `observe` as soon as it is appended. Returns the id of
/// the run, which keys its ledger chain.
///
/// # Errors
///
/// Only the refusals of `begin` (`RunInProgress`, `EmptyInput`). A failed
/// fetch is absorbed into the run log like any other run.
pub fn run_blocking(
    controller: &mut RunController,
    requester: &WorkflowRequester,
    clock: &dyn Clock,
    industry: Industry,
    product_description: &str,
    mut observe: impl FnMut(&LogLine),
) -> VeriPuraResult<RunId> {
    let ticket = controller.begin(industry, product_description)?;
    let mut seen = 0;
    let mut flush = |controller: &RunController, seen: &mut usize| {
        for line in &controller.logs()[*seen..] {
            observe(line);
        }
        *seen = controller.logs().len();
    };
    flush(&*controller, &mut seen);

    let outcome = requester.request(ticket.industry, &ticket.product_description);
    controller.complete_fetch(&ticket.run_id, outcome, clock.now())?;
    flush(&*controller, &mut seen);

    while let Some(due) = controller.next_due() {
        clock.sleep_until(due);
        controller.tick(clock.now());
        flush(&*controller, &mut seen);
    }
    Ok(ticket.run_id)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use serde_json::Value;

    use veripura_contracts::verify::{OutputSchema, VerificationReport};

    use super::*;
    use crate::{
        clock::ManualClock,
        traits::{GenerationRequest, TextGenerator, Verifier},
    };

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A notary that keeps records per run and hashes nothing.
    #[derive(Default)]
    struct MockNotary {
        records: Mutex<HashMap<String, Vec<Stage>>>,
        fail_on: Option<Stage>,
    }

    impl Notary for MockNotary {
        fn record(&self, record: &StageRecord) -> VeriPuraResult<()> {
            if self.fail_on == Some(record.stage) {
                return Err(VeriPuraError::NotaryFailed {
                    reason: "ledger unavailable".to_string(),
                });
            }
            self.records
                .lock()
                .unwrap()
                .entry(record.run_id.to_string())
                .or_default()
                .push(record.stage);
            Ok(())
        }

        fn seal(&self, run_id: &RunId) -> VeriPuraResult<String> {
            let count = self
                .records
                .lock()
                .unwrap()
                .get(&run_id.to_string())
                .map(Vec::len)
                .unwrap_or(0);
            Ok(format!("{count:064x}"))
        }

        fn discard(&self, run_id: &RunId) -> VeriPuraResult<()> {
            self.records.lock().unwrap().remove(&run_id.to_string());
            Ok(())
        }
    }

    struct FixedGenerator(Option<String>);

    impl TextGenerator for FixedGenerator {
        fn generate(&self, _request: &GenerationRequest) -> VeriPuraResult<String> {
            self.0.clone().ok_or_else(|| VeriPuraError::RequestFailed {
                reason: "503 Service Unavailable".to_string(),
            })
        }
    }

    struct PassVerifier;

    impl Verifier for PassVerifier {
        fn verify(
            &self,
            _payload: &Value,
            _schema: &OutputSchema,
        ) -> VeriPuraResult<VerificationReport> {
            Ok(VerificationReport { passed: true, failures: vec![] })
        }
    }

    fn mango() -> WorkflowResult {
        WorkflowResult {
            classification: "Food Product".to_string(),
            hs_code: "0804.50".to_string(),
            requirements: vec![
                "Phytosanitary Certificate".to_string(),
                "Organic Certification".to_string(),
            ],
            extraction_data: None,
            validation_result: None,
            anomaly_found: None,
            anomaly_detail: None,
            confidence_score: 92.0,
            needs_hitm: Some(false),
        }
    }

    fn controller() -> RunController {
        RunController::new(Box::new(MockNotary::default()), DEFAULT_STEP_DELAY)
    }

    fn texts(controller: &RunController) -> Vec<String> {
        controller.logs().iter().map(|l| l.text.clone()).collect()
    }

    // ── begin ────────────────────────────────────────────────────────────────

    #[test]
    fn begin_initializes_run_state() {
        let mut c = controller();
        assert_eq!(c.step(), 0);

        let ticket = c.begin(Industry::Food, "  Organic Sun-Dried Mangoes ").unwrap();
        assert_eq!(ticket.product_description, "Organic Sun-Dried Mangoes");
        assert_eq!(c.step(), 1);
        assert!(c.is_in_progress());
        assert!(c.is_fetching());
        assert!(c.result().is_none());
        assert_eq!(
            texts(&c),
            vec![
                "Initializing VeriPura Multi-Agent Orchestrator...".to_string(),
                "Setting regulatory context for Food Import".to_string(),
            ]
        );
    }

    #[test]
    fn begin_refuses_empty_input() {
        let mut c = controller();
        assert!(matches!(c.begin(Industry::Food, ""), Err(VeriPuraError::EmptyInput)));
        assert!(matches!(c.begin(Industry::Food, "   "), Err(VeriPuraError::EmptyInput)));
        assert!(!c.is_in_progress());
        assert!(c.logs().is_empty());
    }

    #[test]
    fn begin_refused_while_in_progress() {
        let mut c = controller();
        let first = c.begin(Industry::Food, "Mangoes").unwrap();

        let err = c.begin(Industry::Pharma, "Insulin").unwrap_err();
        assert!(matches!(err, VeriPuraError::RunInProgress));
        // The active run is untouched.
        assert_eq!(c.active_run(), Some(&first.run_id));
        assert_eq!(c.logs()[1].text, "Setting regulatory context for Food Import");
    }

    // ── playback ─────────────────────────────────────────────────────────────

    #[test]
    fn step_strictly_increases_gated_by_delay() {
        let mut c = controller();
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        let t0 = Instant::now();
        c.complete_fetch(&ticket.run_id, Ok(mango()), t0).unwrap();

        let mut seen = vec![c.step()];
        let mut now = t0;
        for _ in 0..6 {
            // Just before the deadline nothing happens.
            let due = c.next_due().unwrap();
            assert_eq!(due - now, DEFAULT_STEP_DELAY);
            assert_eq!(c.tick(due - Duration::from_millis(1)), None);

            now = due;
            assert!(c.tick(now).is_some());
            seen.push(c.step());
        }

        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 6]);
        assert!(c.next_due().is_none());
        assert_eq!(c.tick(now + Duration::from_secs(60)), None);
    }

    #[test]
    fn late_tick_reveals_only_one_stage() {
        let mut c = controller();
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        let t0 = Instant::now();
        c.complete_fetch(&ticket.run_id, Ok(mango()), t0).unwrap();

        let late = t0 + Duration::from_secs(30);
        assert!(matches!(c.tick(late), Some(Transition::Advanced { step: 2, .. })));
        assert_eq!(c.tick(late), None, "next stage waits a full delay");
        assert_eq!(c.next_due(), Some(late + DEFAULT_STEP_DELAY));
    }

    #[test]
    fn full_run_produces_eight_lines_and_result() {
        let mut c = controller();
        let ticket = c.begin(Industry::Food, "Organic Sun-Dried Mangoes").unwrap();
        let mut now = Instant::now();
        c.complete_fetch(&ticket.run_id, Ok(mango()), now).unwrap();

        let mut last = None;
        while let Some(due) = c.next_due() {
            now = due;
            last = c.tick(now);
        }

        assert_eq!(c.step(), 6);
        assert!(!c.is_in_progress());
        assert_eq!(c.result(), Some(&mango()));

        let lines = texts(&c);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[2], "[Agent 1] Classified as: Food Product (HS: 0804.50)");
        assert_eq!(lines[3], "[Agent 2] Mapped 2 required documents.");
        assert_eq!(lines[4], "[Agent 3] Extracted data successfully with high confidence.");
        assert_eq!(lines[5], "[Agent 4] Validating against Global Regulations...");
        assert_eq!(lines[6], "[Agent 5] No anomalies found in documentation sequence.");
        assert!(lines[7]
            .starts_with("[Blockchain] Transaction notarized on IOTA Tangle. Hash: 0x"));

        match last {
            Some(Transition::Completed { notarization_hash, line }) => {
                assert_eq!(notarization_hash.len(), 16);
                assert!(line.ends_with(&notarization_hash));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn result_hidden_until_final_stage() {
        let mut c = controller();
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        let mut now = Instant::now();
        c.complete_fetch(&ticket.run_id, Ok(mango()), now).unwrap();

        for _ in 0..5 {
            now = c.next_due().unwrap();
            c.tick(now);
            assert!(c.result().is_none());
            assert!(c.is_in_progress());
        }
        now = c.next_due().unwrap();
        c.tick(now);
        assert!(c.result().is_some());
    }

    #[test]
    fn anomaly_line_follows_flag() {
        let mut result = mango();
        result.anomaly_found = Some(true);
        assert_eq!(
            stage_log_line(Stage::Audit, &result, ""),
            "[Agent 5] ALERT: Anomaly Detected!"
        );
        result.anomaly_found = Some(false);
        assert_eq!(
            stage_log_line(Stage::Audit, &result, ""),
            "[Agent 5] No anomalies found in documentation sequence."
        );
    }

    #[test]
    fn stage_lines_are_deterministic_and_non_empty() {
        for stage in Stage::ALL {
            let a = stage_log_line(stage, &mango(), "abc");
            let b = stage_log_line(stage, &mango(), "abc");
            assert!(!a.is_empty());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn new_run_clears_previous_log_and_result() {
        let mut c = controller();
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        c.complete_fetch(&ticket.run_id, Ok(mango()), Instant::now()).unwrap();
        while let Some(due) = c.next_due() {
            c.tick(due);
        }
        assert_eq!(c.logs().len(), 8);

        c.begin(Industry::Cosmetics, "Serum").unwrap();
        assert_eq!(c.logs().len(), 2);
        assert!(c.result().is_none());
        assert_eq!(c.step(), 1);
    }

    // ── failure handling ─────────────────────────────────────────────────────

    #[test]
    fn fetch_failure_appends_one_error_line() {
        let mut c = controller();
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        let outcome = Err(VeriPuraError::MalformedResponse { reason: "eof".to_string() });

        let transition = c.complete_fetch(&ticket.run_id, outcome, Instant::now()).unwrap();
        assert!(matches!(transition, Some(Transition::Aborted { .. })));
        assert_eq!(c.logs().len(), 3);
        assert_eq!(c.logs()[2].text, FAILURE_LINE);
        assert!(c.result().is_none());
        assert!(!c.is_in_progress());
        assert_eq!(c.step(), 0);

        // A new run may start immediately.
        assert!(c.begin(Industry::Food, "Mangoes").is_ok());
    }

    #[test]
    fn stale_fetch_outcome_is_rejected() {
        let mut c = controller();
        c.begin(Industry::Food, "Mangoes").unwrap();
        let err = c
            .complete_fetch(&RunId::new(), Ok(mango()), Instant::now())
            .unwrap_err();
        assert!(matches!(err, VeriPuraError::StateMachineError { .. }));
        assert!(c.is_fetching());
    }

    #[test]
    fn notary_failure_aborts_run() {
        let notary = MockNotary {
            fail_on: Some(Stage::Validation),
            ..MockNotary::default()
        };
        let mut c = RunController::new(Box::new(notary), DEFAULT_STEP_DELAY);
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        c.complete_fetch(&ticket.run_id, Ok(mango()), Instant::now()).unwrap();

        let mut last = None;
        while let Some(due) = c.next_due() {
            last = c.tick(due);
        }
        assert!(matches!(last, Some(Transition::Aborted { .. })));
        assert_eq!(c.logs().last().unwrap().text, FAILURE_LINE);
        assert_eq!(c.logs().len(), 2 + 3 + 1);
        assert!(!c.is_in_progress());
    }

    #[test]
    fn notary_failure_discards_partial_chain() {
        let notary = Arc::new(MockNotary {
            fail_on: Some(Stage::Audit),
            ..MockNotary::default()
        });
        let mut c = RunController::new(Box::new(Arc::clone(&notary)), DEFAULT_STEP_DELAY);
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        c.complete_fetch(&ticket.run_id, Ok(mango()), Instant::now()).unwrap();

        let mut recorded_before_abort = 0;
        while let Some(due) = c.next_due() {
            recorded_before_abort = notary
                .records
                .lock()
                .unwrap()
                .get(&ticket.run_id.to_string())
                .map_or(0, Vec::len);
            c.tick(due);
        }

        assert_eq!(recorded_before_abort, 4);
        assert!(!notary
            .records
            .lock()
            .unwrap()
            .contains_key(&ticket.run_id.to_string()));
    }

    #[test]
    fn each_stage_is_notarized_once() {
        let notary = Arc::new(MockNotary::default());
        let mut c = RunController::new(Box::new(Arc::clone(&notary)), DEFAULT_STEP_DELAY);
        let ticket = c.begin(Industry::Food, "Mangoes").unwrap();
        c.complete_fetch(&ticket.run_id, Ok(mango()), Instant::now()).unwrap();
        while let Some(due) = c.next_due() {
            c.tick(due);
        }

        let records = notary.records.lock().unwrap();
        assert_eq!(records[&ticket.run_id.to_string()], Stage::ALL.to_vec());
    }

    // ── run_blocking ─────────────────────────────────────────────────────────

    #[test]
    fn run_blocking_plays_back_with_injected_clock() {
        let text = serde_json::to_string(&mango()).unwrap();
        let requester = WorkflowRequester::new(
            Box::new(FixedGenerator(Some(text))),
            Box::new(PassVerifier),
        );
        let clock = ManualClock::new();
        let mut c = controller();
        let mut observed = Vec::new();

        run_blocking(&mut c, &requester, &clock, Industry::Food, "Mangoes", |line| {
            observed.push(line.text.clone())
        })
        .unwrap();

        assert_eq!(observed.len(), 8);
        assert_eq!(observed, texts(&c));
        assert_eq!(clock.slept(), DEFAULT_STEP_DELAY * 6);
        assert_eq!(c.step(), 6);
    }

    #[test]
    fn run_blocking_absorbs_request_failure() {
        let requester = WorkflowRequester::new(Box::new(FixedGenerator(None)), Box::new(PassVerifier));
        let clock = ManualClock::new();
        let mut c = controller();
        let mut observed = Vec::new();

        run_blocking(&mut c, &requester, &clock, Industry::Food, "Mangoes", |line| {
            observed.push(line.text.clone())
        })
        .unwrap();

        assert_eq!(observed.last().map(String::as_str), Some(FAILURE_LINE));
        assert_eq!(clock.slept(), Duration::ZERO);
        assert!(c.result().is_none());
    }

    #[test]
    fn run_blocking_propagates_empty_input() {
        let requester = WorkflowRequester::new(Box::new(FixedGenerator(None)), Box::new(PassVerifier));
        let mut c = controller();
        let err = run_blocking(&mut c, &requester, &ManualClock::new(), Industry::Food, "", |_| {})
            .unwrap_err();
        assert!(matches!(err, VeriPuraError::EmptyInput));
    }
}

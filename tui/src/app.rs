//! TUI application state.
//!
//! `App` owns the run controller and forwards key presses to it. The fetch
//! runs on a worker thread; its outcome comes back over an `mpsc` channel and
//! is handed to the controller on the next tick of the UI loop.

use std::{
    sync::{
        mpsc::{self, Receiver, Sender, TryRecvError},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use veripura_audit::InMemoryLedger;
use veripura_contracts::{
    error::{VeriPuraError, VeriPuraResult},
    industry::Industry,
    workflow::{RunId, WorkflowResult},
};
use veripura_core::{
    controller::{RunController, Transition},
    WorkflowRequester,
};
use veripura_ref_trade::catalog::sample_product;

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// A finished fetch, tagged with the run it belongs to.
struct FetchOutcome {
    run_id: RunId,
    outcome: VeriPuraResult<WorkflowResult>,
}

pub struct App {
    pub selected: Industry,
    pub input: String,
    pub focus: Focus,
    pub controller: RunController,
    pub ledger: InMemoryLedger,
    pub hitm_threshold: f64,
    /// One-line notice under the input, e.g. why a trigger was refused.
    pub notice: Option<String>,
    /// Truncated hash of the last completed run.
    pub last_hash: Option<String>,
    /// The last completed run, whose sealed chain the summary checks.
    pub last_run: Option<RunId>,

    requester: Arc<WorkflowRequester>,
    outcomes_tx: Sender<FetchOutcome>,
    outcomes_rx: Receiver<FetchOutcome>,
}

impl App {
    pub fn new(requester: WorkflowRequester, step_delay: Duration, hitm_threshold: f64) -> Self {
        let ledger = InMemoryLedger::new();
        let (outcomes_tx, outcomes_rx) = mpsc::channel();
        let selected = Industry::Food;
        Self {
            selected,
            input: sample_product(selected).to_string(),
            focus: Focus::Input,
            controller: RunController::new(Box::new(ledger.clone()), step_delay),
            ledger,
            hitm_threshold,
            notice: None,
            last_hash: None,
            last_run: None,
            requester: Arc::new(requester),
            outcomes_tx,
            outcomes_rx,
        }
    }

    // ── Input handling ────────────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        self.select(self.selected.next());
    }

    pub fn select_previous(&mut self) {
        self.select(self.selected.previous());
    }

    /// Change the selected industry. The running run, if any, keeps its own.
    pub fn select(&mut self, industry: Industry) {
        self.selected = industry;
        self.notice = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Input,
            Focus::Input => Focus::Sidebar,
        };
    }

    pub fn type_char(&mut self, c: char) {
        self.input.push(c);
        self.notice = None;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Start a run for the selected industry and the typed description.
    ///
    /// Refusals (empty input, run in progress) leave the run state untouched
    /// and only set a notice.
    pub fn trigger(&mut self) {
        let ticket = match self.controller.begin(self.selected, &self.input) {
            Ok(ticket) => ticket,
            Err(VeriPuraError::EmptyInput) => {
                self.notice = Some("Enter a product description first.".to_string());
                return;
            }
            Err(VeriPuraError::RunInProgress) => {
                self.notice = Some("A run is already in progress.".to_string());
                return;
            }
            Err(e) => {
                warn!(error = %e, "run trigger failed");
                self.notice = Some(e.to_string());
                return;
            }
        };

        self.notice = None;
        self.last_hash = None;
        self.last_run = None;

        let requester = Arc::clone(&self.requester);
        let tx = self.outcomes_tx.clone();
        thread::spawn(move || {
            let outcome = requester.request(ticket.industry, &ticket.product_description);
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(FetchOutcome {
                run_id: ticket.run_id,
                outcome,
            });
        });
    }

    // ── Time ──────────────────────────────────────────────────────────────────

    /// Deliver finished fetches and reveal a stage if one is due.
    pub fn on_tick(&mut self, now: Instant) -> Option<Transition> {
        loop {
            match self.outcomes_rx.try_recv() {
                Ok(FetchOutcome { run_id, outcome }) => {
                    match self.controller.complete_fetch(&run_id, outcome, now) {
                        Ok(Some(transition)) => return Some(transition),
                        Ok(None) => {}
                        Err(e) => debug!(error = %e, "stale fetch outcome dropped"),
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        let running = self.controller.active_run().cloned();
        let transition = self.controller.tick(now)?;
        if let Transition::Completed { notarization_hash, .. } = &transition {
            self.last_hash = Some(notarization_hash.clone());
            self.last_run = running;
        }
        Some(transition)
    }

    /// Integrity of the last completed run's ledger chain.
    pub fn ledger_verified(&self) -> Option<bool> {
        self.last_run
            .as_ref()
            .map(|run_id| self.ledger.verify_integrity(run_id))
    }

    /// How long the UI loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        const IDLE: Duration = Duration::from_millis(200);
        const FETCHING: Duration = Duration::from_millis(50);
        match self.controller.next_due() {
            Some(due) => due.saturating_duration_since(now).min(IDLE),
            None if self.controller.is_fetching() => FETCHING,
            None => IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use veripura_core::controller::FAILURE_LINE;
    use veripura_ref_trade::{
        mock_data::{CannedGenerator, UnavailableGenerator},
        requester::trade_requester,
    };

    use super::*;

    fn app_with(generator: Box<dyn veripura_core::traits::TextGenerator>) -> App {
        App::new(trade_requester(generator), Duration::ZERO, 85.0)
    }

    /// Tick until the run leaves the in-progress state, bounded in time.
    fn run_to_end(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.controller.is_in_progress() && Instant::now() < deadline {
            app.on_tick(Instant::now());
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn starts_on_food_with_sample_product() {
        let app = app_with(Box::new(CannedGenerator::new()));
        assert_eq!(app.selected, Industry::Food);
        assert_eq!(app.input, "Organic Sun-Dried Mangoes");
        assert_eq!(app.controller.step(), 0);
    }

    #[test]
    fn selection_wraps_around() {
        let mut app = app_with(Box::new(CannedGenerator::new()));
        app.select_previous();
        assert_eq!(app.selected, Industry::Pharma);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, Industry::Fashion);
    }

    #[test]
    fn empty_input_is_refused_with_notice() {
        let mut app = app_with(Box::new(CannedGenerator::new()));
        app.clear_input();
        app.trigger();
        assert!(!app.controller.is_in_progress());
        assert!(app.controller.logs().is_empty());
        assert!(app.notice.is_some());
    }

    #[test]
    fn second_trigger_is_refused_while_running() {
        let mut app = app_with(Box::new(CannedGenerator::new()));
        app.trigger();
        let run = app.controller.active_run().cloned();
        app.trigger();
        assert_eq!(app.controller.active_run().cloned(), run);
        assert_eq!(app.notice.as_deref(), Some("A run is already in progress."));
        run_to_end(&mut app);
    }

    #[test]
    fn run_completes_through_worker_thread() {
        let mut app = app_with(Box::new(CannedGenerator::new()));
        app.trigger();
        run_to_end(&mut app);

        assert_eq!(app.controller.step(), 6);
        assert_eq!(app.controller.logs().len(), 8);
        let hash = app.last_hash.clone().unwrap();
        assert_eq!(hash.len(), 16);
        assert!(app.controller.logs()[7].text.ends_with(&hash));
    }

    #[test]
    fn completed_run_chain_is_verified_from_app_ledger() {
        let mut app = app_with(Box::new(CannedGenerator::new()));
        assert_eq!(app.ledger_verified(), None);
        app.trigger();
        run_to_end(&mut app);

        let run_id = app.last_run.clone().unwrap();
        assert_eq!(app.ledger_verified(), Some(true));
        let log = app.ledger.export(&run_id).unwrap();
        assert!(log.sealed);
        assert_eq!(log.entries.len(), 6);
        assert!(log.terminal_hash.starts_with(app.last_hash.as_deref().unwrap()));
    }

    #[test]
    fn failed_run_leaves_nothing_in_ledger() {
        let mut app = app_with(Box::new(UnavailableGenerator));
        app.trigger();
        run_to_end(&mut app);
        assert_eq!(app.ledger.run_count(), 0);
        assert_eq!(app.ledger_verified(), None);
    }

    #[test]
    fn failed_fetch_aborts_run() {
        let mut app = app_with(Box::new(UnavailableGenerator));
        app.trigger();
        run_to_end(&mut app);

        assert!(!app.controller.is_in_progress());
        assert!(app.controller.result().is_none());
        assert_eq!(
            app.controller.logs().last().map(|l| l.text.as_str()),
            Some(FAILURE_LINE)
        );
    }

    #[test]
    fn idle_poll_timeout() {
        let app = app_with(Box::new(CannedGenerator::new()));
        assert_eq!(app.poll_timeout(Instant::now()), Duration::from_millis(200));
    }
}

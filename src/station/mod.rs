//! Scan station: pallet capture, part capture & submit, export trigger.
//!
//! DESIGN
//! ======
//! `ScanStation` owns the session context and handles scan events one at a
//! time on the task that calls [`ScanStation::run`]. A part scan reads the
//! pallet that is current when its event is handled (last write wins) and
//! spawns its submission without waiting for it. Submissions are tracked in
//! a `JoinSet` so every outcome is logged: success with the collector's
//! reply, failure with the record that was lost. There is no retry.

pub mod context;
pub mod export;
pub mod record;
pub mod scanner;
pub mod submit;
pub mod ui;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use context::SessionContext;
use record::ScanRecord;
use scanner::{Reader, ScanEvent};
use submit::{ScanSubmitter, SubmitError};
use ui::StationUi;

pub const SCAN_EVENT_CAPACITY: usize = 64;

/// Result of one spawned submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub record: ScanRecord,
    pub result: Result<Value, SubmitError>,
}

/// Counters reported when the station stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationSummary {
    pub pallet_scans: usize,
    pub part_scans: usize,
    pub submitted: usize,
    pub failed: usize,
    pub scanner_errors: usize,
}

pub struct ScanStation<U> {
    context: SessionContext,
    submitter: Arc<dyn ScanSubmitter>,
    ui: U,
    in_flight: JoinSet<SubmissionOutcome>,
    summary: StationSummary,
}

impl<U: StationUi> ScanStation<U> {
    pub fn new(submitter: Arc<dyn ScanSubmitter>, ui: U) -> Self {
        Self {
            context: SessionContext::new(),
            submitter,
            ui,
            in_flight: JoinSet::new(),
            summary: StationSummary::default(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    #[must_use]
    pub fn summary(&self) -> StationSummary {
        self.summary
    }

    /// Pallet capture: store the decode verbatim as the current pallet,
    /// acknowledge it, and reveal the part-scan section.
    pub fn capture_pallet(&mut self, decoded: String) {
        self.context.set_pallet(decoded);
        self.summary.pallet_scans += 1;
        info!(pallet = %self.context.pallet(), "pallet set");

        self.ui.acknowledge(&format!("Set pallet: {}", self.context.pallet()));
        self.ui.reveal_part_section();
    }

    /// Part capture & submit: parse the decode against the current pallet and
    /// start its submission. Returns the record as sent.
    ///
    /// Must be called inside a tokio runtime.
    pub fn capture_part(&mut self, decoded: &str) -> ScanRecord {
        let record = ScanRecord::from_part_payload(self.context.pallet(), decoded);
        self.summary.part_scans += 1;

        if !record.is_complete() {
            warn!(payload = %decoded, "part payload has fewer than four fields; submitting as decoded");
        }

        let submitter = Arc::clone(&self.submitter);
        let sent = record.clone();
        self.in_flight.spawn(async move {
            let result = submitter.submit(&sent).await;
            SubmissionOutcome { record: sent, result }
        });

        record
    }

    /// Dispatch one scanner event.
    pub fn handle_event(&mut self, event: ScanEvent) {
        match (event.reader, event.result) {
            (Reader::Pallet, Ok(text)) => self.capture_pallet(text),
            (Reader::Part, Ok(text)) => {
                self.capture_part(&text);
            }
            (reader, Err(e)) => {
                self.summary.scanner_errors += 1;
                debug!(reader = reader.as_str(), error = %e, "scanner decode error");
            }
        }
    }

    /// Handle events until every scanner has closed its sender, then wait for
    /// the submissions still in flight.
    pub async fn run(mut self, mut events: mpsc::Receiver<ScanEvent>) -> StationSummary {
        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    let Some(event) = maybe_event else { break };
                    self.handle_event(event);
                }
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    self.record_outcome(joined);
                }
            }
        }

        self.drain().await;
        self.summary
    }

    /// Wait for every in-flight submission and log its outcome.
    pub async fn drain(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            self.record_outcome(joined);
        }
    }

    fn record_outcome(&mut self, joined: Result<SubmissionOutcome, JoinError>) {
        match joined {
            Ok(SubmissionOutcome { record, result: Ok(response) }) => {
                self.summary.submitted += 1;
                info!(
                    pallet = %record.pallet,
                    order_no = ?record.order_no,
                    part = ?record.part,
                    qty = record.qty,
                    response = %response,
                    "scan submitted"
                );
            }
            Ok(SubmissionOutcome { record, result: Err(e) }) => {
                self.summary.failed += 1;
                warn!(
                    pallet = %record.pallet,
                    order_no = ?record.order_no,
                    part = ?record.part,
                    qty = record.qty,
                    error = %e,
                    "scan submission failed"
                );
            }
            Err(e) => {
                self.summary.failed += 1;
                error!(error = %e, "scan submission task failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::sync::Arc;

use accord_core::AppResult;
use accord_domain::{ConflictPair, ConflictReport, TimeInstant};
use tracing::{debug, info, warn};

use crate::gateway_ports::{ConflictDetectionGateway, ConflictDetectionResponse};
use crate::request_state::{RequestGenerations, RequestState, RequestTicket, StaleResponsePolicy};


/// Blocking alert shown when a detection request fails.
pub const CONFLICT_DETECTION_FAILED_ALERT: &str = "Error detecting conflicts. Please try again.";

/// What the conflict workflow currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictPresentation {
    /// Nothing shown.
    Hidden,
    /// Detection is running.
    Loading,
    /// Modal listing every conflict.
    Modal {
        /// `Detection Time: ...` heading.
        detection_time: String,
        /// Correlated rows in response order.
        pairs: Vec<ConflictPair>,
    },
    /// Distinct indicator for a run that found nothing.
    NoConflicts {
        /// `Detection Time: ...` heading.
        detection_time: String,
    },
    /// Blocking failure alert.
    Alert(String),
}

/// Drives on-demand conflict detection for a selected instant.
///
/// Detection is recomputed server-side from the instant alone; this
/// controller never reads the log retrieval result set.
pub struct ConflictDetectionController {
    gateway: Arc<dyn ConflictDetectionGateway>,
    stale_policy: StaleResponsePolicy,
    generations: RequestGenerations,
    state: RequestState<ConflictReport>,
    detection_time: Option<String>,
    alert: Option<String>,
}

impl ConflictDetectionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(gateway: Arc<dyn ConflictDetectionGateway>) -> Self {
        Self {
            gateway,
            stale_policy: StaleResponsePolicy::default(),
            generations: RequestGenerations::default(),
            state: RequestState::Idle,
            detection_time: None,
            alert: None,
        }
    }

    /// Overrides how superseded responses are handled.
    #[must_use]
    pub fn with_stale_response_policy(mut self, stale_policy: StaleResponsePolicy) -> Self {
        self.stale_policy = stale_policy;
        self
    }

    /// Returns the workflow state.
    #[must_use]
    pub fn state(&self) -> &RequestState<ConflictReport> {
        &self.state
    }

    /// Runs detection for `instant` and returns the resulting presentation.
    pub async fn detect(&mut self, instant: TimeInstant) -> ConflictPresentation {
        let ticket = self.begin_detect(instant);
        let outcome = self.gateway.detect_conflicts(instant).await;
        self.complete_detect(ticket, outcome);

        self.presentation()
    }

    /// Clears the previous outcome and marks detection as running.
    pub fn begin_detect(&mut self, instant: TimeInstant) -> RequestTicket {
        let ticket = self.generations.issue();
        self.state = RequestState::Loading;
        self.detection_time = None;
        self.alert = None;

        info!(
            generation = ticket.generation(),
            instant = %instant,
            "conflict detection started"
        );

        ticket
    }

    /// Installs the outcome of a request issued by [`Self::begin_detect`].
    ///
    /// Returns false when the response was superseded and discarded.
    pub fn complete_detect(
        &mut self,
        ticket: RequestTicket,
        outcome: AppResult<ConflictDetectionResponse>,
    ) -> bool {
        let generation = ticket.generation();
        if !self.generations.admits(ticket, self.stale_policy) {
            debug!(generation, "discarding superseded conflict detection response");
            return false;
        }

        match outcome {
            Ok(response) => {
                let report = ConflictReport::new(
                    response.detect_time_label,
                    response.conflict_ids,
                    response.logs,
                );

                if let Some(mismatch) = report.mismatch() {
                    warn!(
                        generation,
                        conflict_ids = mismatch.conflict_ids,
                        log_rows = mismatch.log_rows,
                        "conflict identifiers and log rows differ in length, truncating"
                    );
                }

                info!(
                    generation,
                    conflicts = report.pairs().len(),
                    "conflict detection finished"
                );

                self.detection_time =
                    Some(format!("Detection Time: {}", report.detect_time_label()));
                self.state = if report.is_empty() {
                    RequestState::Empty
                } else {
                    RequestState::Success(report)
                };
            }
            Err(error) => {
                warn!(generation, error = %error, "conflict detection failed");
                self.alert = Some(CONFLICT_DETECTION_FAILED_ALERT.to_owned());
                self.state = RequestState::Idle;
            }
        }

        true
    }

    /// Returns what should be shown for the current state.
    #[must_use]
    pub fn presentation(&self) -> ConflictPresentation {
        if let Some(alert) = &self.alert {
            return ConflictPresentation::Alert(alert.clone());
        }

        let detection_time = self.detection_time.clone().unwrap_or_default();
        match &self.state {
            RequestState::Idle | RequestState::Error(_) => ConflictPresentation::Hidden,
            RequestState::Loading => ConflictPresentation::Loading,
            RequestState::Success(report) => ConflictPresentation::Modal {
                detection_time,
                pairs: report.pairs().to_vec(),
            },
            RequestState::Empty => ConflictPresentation::NoConflicts { detection_time },
        }
    }

    /// Dismisses the failure alert, if one is showing.
    pub fn acknowledge_alert(&mut self) {
        self.alert = None;
    }
}

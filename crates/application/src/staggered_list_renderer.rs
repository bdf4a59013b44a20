use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use accord_domain::{ActionConstraint, DateSelection};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::gateway_ports::ActionConstraintGateway;
use crate::request_state::RequestState;


/// Per-row reveal delay unit.
pub const DEFAULT_REVEAL_STAGGER: Duration = Duration::from_millis(10);

/// Status shown while constraints are being fetched.
pub const CONSTRAINTS_LOADING_MESSAGE: &str = "Fetching constraints...";
/// Status shown when the listing is empty.
pub const CONSTRAINTS_EMPTY_MESSAGE: &str = "No Action Constraints found";
/// Status shown when the listing request fails.
pub const CONSTRAINTS_FAILED_MESSAGE: &str = "Failed to fetch Action Constraints";
/// Status shown when no date was picked.
pub const CONSTRAINTS_MISSING_DATE_MESSAGE: &str = "Select a date to fetch Action Constraints";

/// One constraint row with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRow {
    /// Row number starting at 1.
    pub number: usize,
    /// Constraint shown on this row.
    pub constraint: ActionConstraint,
}

/// Receives rows as they are revealed.
pub trait RevealSink: Send + Sync {
    /// Appends one row to the visible list.
    fn reveal(&self, row: ConstraintRow);
}

/// Ordered reveal schedule drained by a single loop.
///
/// Row `i` is revealed no earlier than `i * stagger` after draining starts.
#[derive(Debug)]
pub struct RevealQueue {
    stagger: Duration,
    rows: VecDeque<ConstraintRow>,
}

impl RevealQueue {
    /// Queues constraints in input order.
    #[must_use]
    pub fn new(stagger: Duration, constraints: Vec<ActionConstraint>) -> Self {
        let rows = constraints
            .into_iter()
            .enumerate()
            .map(|(index, constraint)| ConstraintRow {
                number: index + 1,
                constraint,
            })
            .collect();

        Self { stagger, rows }
    }

    /// Returns the delay of the row at `index` relative to the drain start.
    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        self.stagger
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Returns the number of queued rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reveals every row into `sink`, pacing each against a fixed start time.
    pub async fn drain(mut self, sink: &dyn RevealSink) -> usize {
        let started_at = Instant::now();
        let mut revealed = 0_usize;

        while let Some(row) = self.rows.pop_front() {
            tokio::time::sleep_until(started_at + self.delay_for(revealed)).await;
            sink.reveal(row);
            revealed += 1;
        }

        revealed
    }
}

/// Fetches the action constraint listing and reveals it with a stagger.
pub struct StaggeredListRenderer {
    gateway: Arc<dyn ActionConstraintGateway>,
    sink: Arc<dyn RevealSink>,
    stagger: Duration,
    state: RequestState<Vec<ActionConstraint>>,
    status_message: Option<String>,
}

impl StaggeredListRenderer {
    /// Creates an idle renderer using the default stagger.
    #[must_use]
    pub fn new(gateway: Arc<dyn ActionConstraintGateway>, sink: Arc<dyn RevealSink>) -> Self {
        Self {
            gateway,
            sink,
            stagger: DEFAULT_REVEAL_STAGGER,
            state: RequestState::Idle,
            status_message: None,
        }
    }

    /// Overrides the per-row delay unit.
    #[must_use]
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Returns the workflow state.
    #[must_use]
    pub fn state(&self) -> &RequestState<Vec<ActionConstraint>> {
        &self.state
    }

    /// Returns the status line above the constraint table.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Fetches constraints for `selection` and reveals them in order.
    ///
    /// A missing selection fails fast without issuing a request.
    pub async fn fetch_and_reveal(
        &mut self,
        selection: Option<DateSelection>,
    ) -> &RequestState<Vec<ActionConstraint>> {
        let Some(selection) = selection else {
            self.state = RequestState::Error(CONSTRAINTS_MISSING_DATE_MESSAGE.to_owned());
            self.status_message = Some(CONSTRAINTS_MISSING_DATE_MESSAGE.to_owned());
            return &self.state;
        };

        self.state = RequestState::Loading;
        self.status_message = Some(CONSTRAINTS_LOADING_MESSAGE.to_owned());
        info!(instant = %selection.instant(), "action constraint fetch started");

        match self
            .gateway
            .fetch_action_constraints(selection.instant())
            .await
        {
            Ok(constraints) if constraints.is_empty() => {
                info!("action constraint fetch returned no rows");
                self.state = RequestState::Empty;
                self.status_message = Some(CONSTRAINTS_EMPTY_MESSAGE.to_owned());
            }
            Ok(constraints) => {
                self.status_message =
                    Some(format!("Fetched {} Action Constraints", constraints.len()));
                self.state = RequestState::Success(constraints.clone());

                let revealed = RevealQueue::new(self.stagger, constraints)
                    .drain(self.sink.as_ref())
                    .await;
                info!(rows = revealed, "action constraints revealed");
            }
            Err(error) => {
                warn!(error = %error, "action constraint fetch failed");
                self.state = RequestState::Error(CONSTRAINTS_FAILED_MESSAGE.to_owned());
                self.status_message = Some(CONSTRAINTS_FAILED_MESSAGE.to_owned());
            }
        }

        &self.state
    }
}

use std::sync::Arc;

use accord_domain::ConstraintRequest;
use tracing::{info, warn};

use crate::gateway_ports::ActionConstraintGateway;
use crate::request_state::RequestState;

/// Message shown when the batch is empty.
pub const SUBMISSION_EMPTY_MESSAGE: &str = "Select at least one action to constrain";
/// Message shown when the backend rejects or cannot receive the batch.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to add Action Constraints";

/// Submits batches of requested action constraints.
pub struct ConstraintSubmissionController {
    gateway: Arc<dyn ActionConstraintGateway>,
    state: RequestState<usize>,
}

impl ConstraintSubmissionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(gateway: Arc<dyn ActionConstraintGateway>) -> Self {
        Self {
            gateway,
            state: RequestState::Idle,
        }
    }

    /// Returns the workflow state; success carries the submitted count.
    #[must_use]
    pub fn state(&self) -> &RequestState<usize> {
        &self.state
    }

    /// Sends `requests` as one batch.
    pub async fn submit(&mut self, requests: Vec<ConstraintRequest>) -> &RequestState<usize> {
        if requests.is_empty() {
            self.state = RequestState::Error(SUBMISSION_EMPTY_MESSAGE.to_owned());
            return &self.state;
        }

        self.state = RequestState::Loading;
        match self.gateway.add_action_constraints(&requests).await {
            Ok(()) => {
                info!(constraints = requests.len(), "action constraints added");
                self.state = RequestState::Success(requests.len());
            }
            Err(error) => {
                warn!(
                    constraints = requests.len(),
                    error = %error,
                    "adding action constraints failed"
                );
                self.state = RequestState::Error(SUBMISSION_FAILED_MESSAGE.to_owned());
            }
        }

        &self.state
    }
}

use async_trait::async_trait;

use accord_core::AppResult;
use accord_domain::{ActionConstraint, ConstraintRequest, LogEntry, TimeInstant};

/// Port for the activity-log read path and its refresh nudge.
#[async_trait]
pub trait ActivityLogGateway: Send + Sync {
    /// Returns the log rows bounded by `instant`, in server order.
    async fn fetch_log_window(&self, instant: TimeInstant) -> AppResult<Vec<LogEntry>>;

    /// Asks the backend to pull new activity into its log store.
    async fn request_log_refresh(&self) -> AppResult<()>;
}

/// Raw detection payload: two parallel arrays plus a timing label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConflictDetectionResponse {
    /// Server timing summary.
    pub detect_time_label: String,
    /// Conflict identifiers, index-aligned with `logs`.
    pub conflict_ids: Vec<String>,
    /// Raw conflicting log rows.
    pub logs: Vec<Vec<String>>,
}

/// Port for server-side conflict detection.
#[async_trait]
pub trait ConflictDetectionGateway: Send + Sync {
    /// Runs detection over the log window starting at `instant`.
    async fn detect_conflicts(&self, instant: TimeInstant) -> AppResult<ConflictDetectionResponse>;
}

/// Port for reading and creating action constraints.
#[async_trait]
pub trait ActionConstraintGateway: Send + Sync {
    /// Lists constraints recorded since `instant`.
    async fn fetch_action_constraints(
        &self,
        instant: TimeInstant,
    ) -> AppResult<Vec<ActionConstraint>>;

    /// Records a batch of requested constraints.
    async fn add_action_constraints(&self, requests: &[ConstraintRequest]) -> AppResult<()>;
}

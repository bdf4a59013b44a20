use std::sync::Arc;

use accord_core::{AppError, AppResult};
use accord_domain::{DateSelection, LogEntry, LogResultSet};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::gateway_ports::ActivityLogGateway;
use crate::pagination_renderer::{PaginationRenderer, RenderedPage};
use crate::request_state::{RequestGenerations, RequestState, RequestTicket, StaleResponsePolicy};


/// Message shown when the log window request fails for any reason.
pub const LOG_FETCH_FAILED_MESSAGE: &str = "Error fetching data. Please try again.";

/// Handle for one issued log window request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFetchTicket {
    request: RequestTicket,
    selection: DateSelection,
}

impl LogFetchTicket {
    /// Returns the request identity.
    #[must_use]
    pub fn request(&self) -> RequestTicket {
        self.request
    }

    /// Returns the day the request was issued for.
    #[must_use]
    pub fn selection(&self) -> DateSelection {
        self.selection
    }
}

/// Drives the log retrieval workflow and owns its result set.
pub struct LogRetrievalController {
    gateway: Arc<dyn ActivityLogGateway>,
    stale_policy: StaleResponsePolicy,
    generations: RequestGenerations,
    state: RequestState<LogResultSet>,
    renderer: Option<PaginationRenderer>,
    message: Option<String>,
    pending_refresh: Option<JoinHandle<()>>,
}

impl LogRetrievalController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(gateway: Arc<dyn ActivityLogGateway>) -> Self {
        Self {
            gateway,
            stale_policy: StaleResponsePolicy::default(),
            generations: RequestGenerations::default(),
            state: RequestState::Idle,
            renderer: None,
            message: None,
            pending_refresh: None,
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
    pub fn state(&self) -> &RequestState<LogResultSet> {
        &self.state
    }

    /// Returns the status line shown above the table.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the renderer for the installed result set, if one exists.
    #[must_use]
    pub fn renderer(&self) -> Option<&PaginationRenderer> {
        self.renderer.as_ref()
    }

    /// Returns whether conflict detection may be triggered.
    ///
    /// Advisory only: it tracks whether a non-empty result set is installed.
    #[must_use]
    pub fn conflict_trigger_enabled(&self) -> bool {
        self.renderer.is_some()
    }

    /// Fetches the log window for `selection`, installs the outcome, then
    /// fires the refresh notification.
    pub async fn fetch_logs(&mut self, selection: DateSelection) -> &RequestState<LogResultSet> {
        let ticket = self.begin_fetch(selection);
        let outcome = self.gateway.fetch_log_window(selection.instant()).await;
        self.complete_fetch(ticket, outcome);
        self.notify_refresh();

        &self.state
    }

    /// Marks the workflow as loading and hides the previous table.
    pub fn begin_fetch(&mut self, selection: DateSelection) -> LogFetchTicket {
        let request = self.generations.issue();
        self.state = RequestState::Loading;
        self.renderer = None;
        self.message = None;

        info!(
            generation = request.generation(),
            instant = %selection.instant(),
            "log window fetch started"
        );

        LogFetchTicket { request, selection }
    }

    /// Installs the outcome of a request issued by [`Self::begin_fetch`].
    ///
    /// Returns false when the response was superseded and discarded. Callers
    /// driving the split API are responsible for [`Self::notify_refresh`].
    pub fn complete_fetch(
        &mut self,
        ticket: LogFetchTicket,
        outcome: AppResult<Vec<LogEntry>>,
    ) -> bool {
        let generation = ticket.request.generation();
        if !self.generations.admits(ticket.request, self.stale_policy) {
            debug!(generation, "discarding superseded log window response");
            return false;
        }

        let label = ticket.selection.label();
        match outcome {
            Ok(entries) if entries.is_empty() => {
                info!(generation, date = %label, "log window fetch returned no rows");
                self.state = RequestState::Empty;
                self.renderer = None;
                self.message = Some(format!("No data found for {label}"));
            }
            Ok(entries) => {
                let result_set = LogResultSet::new(generation, entries);
                info!(
                    generation,
                    rows = result_set.len(),
                    "log window fetch succeeded"
                );
                self.message = Some(format!(
                    "Fetched {} rows from {label}",
                    result_set.len()
                ));
                self.renderer = Some(PaginationRenderer::new(result_set.clone()));
                self.state = RequestState::Success(result_set);
            }
            Err(error) => {
                warn!(
                    generation,
                    request_failure = error.is_request_failure(),
                    error = %error,
                    "log window fetch failed"
                );
                self.state = RequestState::Error(LOG_FETCH_FAILED_MESSAGE.to_owned());
                self.renderer = None;
                self.message = Some(LOG_FETCH_FAILED_MESSAGE.to_owned());
            }
        }

        true
    }

    /// Moves the installed result set to `page` without touching the network.
    pub fn go_to_page(&mut self, page: usize) -> AppResult<RenderedPage> {
        let renderer = self.renderer.as_mut().ok_or_else(|| {
            AppError::Validation("no log results are loaded to paginate".to_owned())
        })?;

        renderer.go_to_page(page)
    }

    /// Sends the fire-and-forget refresh notification on a background task.
    ///
    /// Its outcome is only logged; the workflow state is never touched.
    pub fn notify_refresh(&mut self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime available, skipping log store refresh");
            return;
        };

        let gateway = Arc::clone(&self.gateway);
        let handle = runtime.spawn(async move {
            match gateway.request_log_refresh().await {
                Ok(()) => debug!("log store refresh requested"),
                Err(error) => warn!(error = %error, "log store refresh request failed"),
            }
        });

        self.pending_refresh = Some(handle);
    }

    /// Waits for the most recent refresh notification to finish.
    pub async fn settle_refresh(&mut self) {
        let Some(handle) = self.pending_refresh.take() else {
            return;
        };

        if let Err(error) = handle.await {
            warn!(error = %error, "log store refresh task did not complete");
        }
    }
}

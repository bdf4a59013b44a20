use std::str::FromStr;

use accord_core::AppError;

/// Lifecycle of one workflow's latest request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    /// Nothing requested yet, or the last failure was acknowledged.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The request produced data.
    Success(T),
    /// The request succeeded with zero rows.
    Empty,
    /// The request failed; the message is safe to show to the user.
    Error(String),
}

impl<T> RequestState<T> {
    /// Returns a stable state name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::Error(_) => "error",
        }
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the successful payload.
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the user-facing failure message.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// What to do with a response whose request has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Ignore completions older than the latest issued request.
    #[default]
    Discard,
    /// Apply every completion in arrival order, so a late response may win.
    Apply,
}

impl StaleResponsePolicy {
    /// Returns a stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discard => "discard",
            Self::Apply => "apply",
        }
    }
}

impl FromStr for StaleResponsePolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "apply" => Ok(Self::Apply),
            _ => Err(AppError::Validation(format!(
                "stale response policy must be either 'discard' or 'apply', got '{value}'"
            ))),
        }
    }
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Returns the monotonically increasing generation number.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Per-controller request counter.
#[derive(Debug, Default)]
pub(crate) struct RequestGenerations {
    latest: u64,
}

impl RequestGenerations {
    pub(crate) fn issue(&mut self) -> RequestTicket {
        self.latest = self.latest.saturating_add(1);
        RequestTicket(self.latest)
    }

    pub(crate) fn admits(&self, ticket: RequestTicket, policy: StaleResponsePolicy) -> bool {
        match policy {
            StaleResponsePolicy::Apply => true,
            StaleResponsePolicy::Discard => ticket.0 == self.latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{RequestGenerations, RequestState, StaleResponsePolicy};

    #[test]
    fn default_state_is_idle() {
        let state: RequestState<Vec<u8>> = RequestState::default();
        assert_eq!(state.as_str(), "idle");
        assert!(state.success().is_none());
    }

    #[test]
    fn error_state_exposes_message() {
        let state: RequestState<()> = RequestState::Error("try again".to_owned());
        assert_eq!(state.error_message(), Some("try again"));
    }

    #[test]
    fn discard_policy_only_admits_latest_ticket() {
        let mut generations = RequestGenerations::default();
        let first = generations.issue();
        let second = generations.issue();

        assert!(first < second);
        assert!(!generations.admits(first, StaleResponsePolicy::Discard));
        assert!(generations.admits(second, StaleResponsePolicy::Discard));
        assert!(generations.admits(first, StaleResponsePolicy::Apply));
    }

    #[test]
    fn policy_parses_configuration_values() {
        assert_eq!(
            StaleResponsePolicy::from_str("Apply").ok(),
            Some(StaleResponsePolicy::Apply)
        );
        assert!(StaleResponsePolicy::from_str("latest").is_err());
    }
}

use accord_application::{
    ActionConstraintGateway, ActivityLogGateway, ConflictDetectionGateway,
    ConflictDetectionResponse,
};
use accord_core::{AppError, AppResult};
use accord_domain::{ActionConstraint, ConstraintRequest, LogEntry, TimeInstant};
use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

#[cfg(test)]
mod tests;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
struct FetchActionConstraintsRequest {
    date: String,
}

#[derive(Debug, Serialize)]
struct AddActionConstraintsRequest<'a> {
    actions: &'a [ConstraintRequest],
}

#[derive(Debug, Deserialize)]
struct AddActionConstraintsResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectConflictsResponse {
    #[serde(rename = "detectTimeLabel", default)]
    detect_time_label: String,
    #[serde(rename = "conflictID", default)]
    conflict_ids: Vec<Value>,
    #[serde(default)]
    logs: Vec<Vec<Value>>,
}

impl DetectConflictsResponse {
    fn into_detection_response(self) -> ConflictDetectionResponse {
        ConflictDetectionResponse {
            detect_time_label: self.detect_time_label,
            conflict_ids: self.conflict_ids.into_iter().map(value_to_text).collect(),
            logs: self
                .logs
                .into_iter()
                .map(|row| row.into_iter().map(value_to_text).collect())
                .collect(),
        }
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// HTTP implementation of every front-end gateway port.
///
/// The backend keys its per-user state on a session cookie issued by `GET /`,
/// so the client must keep a cookie store; the bootstrap runs once, lazily.
pub struct HttpAccordGateway {
    http_client: reqwest::Client,
    base_url: Url,
    session: OnceCell<()>,
}

impl HttpAccordGateway {
    /// Creates a gateway rooted at `base_url`.
    pub fn new(http_client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(normalized.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid backend base url '{base_url}': {error}"))
        })?;

        Ok(Self {
            http_client,
            base_url,
            session: OnceCell::new(),
        })
    }

    /// Returns the normalized backend root.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Internal(format!("failed to build endpoint url for '{path}': {error}"))
        })
    }

    async fn ensure_session(&self) -> AppResult<()> {
        self.session
            .get_or_try_init(|| async {
                let response = self
                    .http_client
                    .get(self.base_url.clone())
                    .send()
                    .await
                    .map_err(|error| {
                        AppError::Transport(format!("failed to open backend session: {error}"))
                    })?;
                check_status(response, "session bootstrap").await?;
                debug!(base_url = %self.base_url, "backend session established");
                Ok::<(), AppError>(())
            })
            .await
            .map(|_| ())
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint_name: &str,
    ) -> AppResult<reqwest::Response> {
        self.ensure_session().await?;

        let response = request.send().await.map_err(|error| {
            AppError::Transport(format!("failed to call {endpoint_name} endpoint: {error}"))
        })?;

        check_status(response, endpoint_name).await
    }
}

async fn check_status(
    response: reqwest::Response,
    endpoint_name: &str,
) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_owned());
    Err(AppError::Transport(format!(
        "{endpoint_name} endpoint returned status {}: {body}",
        status.as_u16()
    )))
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint_name: &str,
) -> AppResult<T> {
    response.json::<T>().await.map_err(|error| {
        AppError::Decode(format!(
            "failed to parse {endpoint_name} endpoint response body: {error}"
        ))
    })
}

#[async_trait]
impl ActivityLogGateway for HttpAccordGateway {
    async fn fetch_log_window(&self, instant: TimeInstant) -> AppResult<Vec<LogEntry>> {
        let mut endpoint = self.endpoint("fetch_drive_log")?;
        endpoint
            .query_pairs_mut()
            .append_pair("time", instant.to_iso_string().as_str());

        let response = self
            .send(self.http_client.get(endpoint), "fetch drive log")
            .await?;
        decode(response, "fetch drive log").await
    }

    async fn request_log_refresh(&self) -> AppResult<()> {
        let endpoint = self.endpoint("refresh_logs")?;
        self.send(
            self.http_client
                .post(endpoint)
                .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE),
            "refresh logs",
        )
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ConflictDetectionGateway for HttpAccordGateway {
    async fn detect_conflicts(&self, instant: TimeInstant) -> AppResult<ConflictDetectionResponse> {
        let endpoint = self.endpoint("detect_conflicts_demo")?;
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("current_date", instant.to_iso_string().as_str())
            .finish();

        let response = self
            .send(
                self.http_client
                    .post(endpoint)
                    .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(body),
                "detect conflicts",
            )
            .await?;
        let decoded: DetectConflictsResponse = decode(response, "detect conflicts").await?;

        Ok(decoded.into_detection_response())
    }
}

#[async_trait]
impl ActionConstraintGateway for HttpAccordGateway {
    async fn fetch_action_constraints(
        &self,
        instant: TimeInstant,
    ) -> AppResult<Vec<ActionConstraint>> {
        let endpoint = self.endpoint("fetch_actionConstraints")?;
        let response = self
            .send(
                self.http_client
                    .post(endpoint)
                    .json(&FetchActionConstraintsRequest {
                        date: instant.to_iso_string(),
                    }),
                "fetch action constraints",
            )
            .await?;

        decode(response, "fetch action constraints").await
    }

    async fn add_action_constraints(&self, requests: &[ConstraintRequest]) -> AppResult<()> {
        let endpoint = self.endpoint("addActionConstraints")?;
        let response = self
            .send(
                self.http_client
                    .post(endpoint)
                    .json(&AddActionConstraintsRequest { actions: requests }),
                "add action constraints",
            )
            .await?;
        let outcome: AddActionConstraintsResponse =
            decode(response, "add action constraints").await?;

        if !outcome.success {
            return Err(AppError::Validation(format!(
                "backend rejected action constraints: {}",
                outcome
                    .error
                    .unwrap_or_else(|| "no reason given".to_owned())
            )));
        }

        Ok(())
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use accord_application::{ActionConstraintGateway, ActivityLogGateway, ConflictDetectionGateway};
use accord_core::AppError;
use accord_domain::{ConstrainedAction, ConstraintRequest, TimeInstant};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::HttpAccordGateway;

const SESSION_COOKIE: &str = "session=accord-test";

#[derive(Clone, Default)]
struct BackendState {
    calls: Arc<Mutex<Vec<String>>>,
}

impl BackendState {
    async fn record(&self, call: impl Into<String>) {
        self.calls.lock().await.push(call.into());
    }

    async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(SESSION_COOKIE))
}

async fn index(State(state): State<BackendState>) -> impl IntoResponse {
    state.record("GET /").await;
    (
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/"))],
        "ok",
    )
}

async fn fetch_drive_log(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !has_session(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!([])));
    }

    let time = query.get("time").cloned().unwrap_or_default();
    state.record(format!("GET /fetch_drive_log time={time}")).await;
    (
        StatusCode::OK,
        Json(json!([
            {"time": "01 January 2024, 09:00:00", "activity": "Alice has Created a resource", "actor": "Alice", "resource": "Budget"},
            {"time": "01 January 2024, 09:05:00", "activity": "Bob has Moved a resource", "actor": "Bob", "resource": "Plan"},
        ])),
    )
}

async fn refresh_logs(State(state): State<BackendState>, headers: HeaderMap) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    state
        .record(format!("POST /refresh_logs content-type={content_type}"))
        .await;
    Json(json!({"len": "0"}))
}

async fn detect_conflicts(
    State(state): State<BackendState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let current_date = form.get("current_date").cloned().unwrap_or_default();
    state
        .record(format!("POST /detect_conflicts_demo current_date={current_date}"))
        .await;
    Json(json!({
        "detectTimeLabel": "Time taken to detect 2 conflicts from 5 activity logs: 0.001 seconds.",
        "conflictID": ["5", 3],
        "logs": [
            ["01 January 2024, 09:00:00", "Move", "Budget", "Alice"],
            ["01 January 2024, 09:05:00", "Delete", "Plan", "Bob", "extra"],
        ],
        "briefLogs": [],
    }))
}

async fn fetch_action_constraints(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state
        .record(format!("POST /fetch_actionConstraints {body}"))
        .await;
    Json(json!([
        {"TimeStamp": "2024-01-01 08:00:00", "ConstraintOwner": "admin@example.com", "ConstraintTarget": "bob@example.com", "File": "Budget", "Constraint": "Cannot Move file"},
    ]))
}

async fn add_action_constraints(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record(format!("POST /addActionConstraints {body}")).await;
    let accepted = body["actions"]
        .as_array()
        .is_some_and(|actions| actions.iter().all(|action| action["fileID"] != "locked"));

    if accepted {
        Json(json!({"success": true}))
    } else {
        Json(json!({"success": false, "error": "file is locked"}))
    }
}

fn backend(state: BackendState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/fetch_drive_log", get(fetch_drive_log))
        .route("/refresh_logs", post(refresh_logs))
        .route("/detect_conflicts_demo", post(detect_conflicts))
        .route("/fetch_actionConstraints", post(fetch_action_constraints))
        .route("/addActionConstraints", post(add_action_constraints))
        .with_state(state)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|_| unreachable!());
    let address = listener.local_addr().unwrap_or_else(|_| unreachable!());

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{address}/")
}

fn gateway(base_url: &str) -> HttpAccordGateway {
    let http_client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|_| unreachable!());
    HttpAccordGateway::new(http_client, base_url).unwrap_or_else(|_| unreachable!())
}

fn new_year() -> TimeInstant {
    TimeInstant::start_of_day(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_else(|| unreachable!()))
}

#[tokio::test]
async fn fetch_log_window_sends_iso_time_and_reuses_session() {
    let state = BackendState::default();
    let gateway = gateway(serve(backend(state.clone())).await.as_str());

    let first = gateway.fetch_log_window(new_year()).await;
    assert!(first.is_ok());
    let rows = first.unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].actor(), "Bob");
    assert_eq!(rows[1].resource(), "Plan");

    let second = gateway.fetch_log_window(new_year()).await;
    assert!(second.is_ok());

    assert_eq!(
        state.calls().await,
        vec![
            "GET /".to_owned(),
            "GET /fetch_drive_log time=2024-01-01T00:00:00.000Z".to_owned(),
            "GET /fetch_drive_log time=2024-01-01T00:00:00.000Z".to_owned(),
        ]
    );
}

#[tokio::test]
async fn refresh_posts_json_without_body() {
    let state = BackendState::default();
    let gateway = gateway(serve(backend(state.clone())).await.as_str());

    assert!(gateway.request_log_refresh().await.is_ok());
    assert!(
        state
            .calls()
            .await
            .contains(&"POST /refresh_logs content-type=application/json".to_owned())
    );
}

#[tokio::test]
async fn detect_conflicts_posts_form_and_normalizes_identifiers() {
    let state = BackendState::default();
    let gateway = gateway(serve(backend(state.clone())).await.as_str());

    let response = gateway.detect_conflicts(new_year()).await;
    assert!(response.is_ok());
    let response = response.unwrap_or_default();

    assert_eq!(response.conflict_ids, vec!["5".to_owned(), "3".to_owned()]);
    assert_eq!(response.logs.len(), 2);
    assert_eq!(response.logs[1][1], "Delete");
    assert!(response.detect_time_label.starts_with("Time taken to detect 2"));
    assert!(
        state
            .calls()
            .await
            .contains(&"POST /detect_conflicts_demo current_date=2024-01-01T00:00:00.000Z".to_owned())
    );
}

#[tokio::test]
async fn fetch_action_constraints_posts_json_date() {
    let state = BackendState::default();
    let gateway = gateway(serve(backend(state.clone())).await.as_str());

    let constraints = gateway.fetch_action_constraints(new_year()).await;
    assert!(constraints.is_ok());
    let constraints = constraints.unwrap_or_default();
    assert_eq!(constraints.len(), 1);
    assert_eq!(constraints[0].constraint_target(), "bob@example.com");

    assert!(
        state
            .calls()
            .await
            .contains(&r#"POST /fetch_actionConstraints {"date":"2024-01-01T00:00:00.000Z"}"#.to_owned())
    );
}

#[tokio::test]
async fn add_action_constraints_maps_rejection_to_error() {
    let state = BackendState::default();
    let gateway = gateway(serve(backend(state.clone())).await.as_str());

    let accepted = ConstraintRequest::new("Budget", "file-1", "bob@example.com", ConstrainedAction::Move)
        .unwrap_or_else(|_| unreachable!());
    assert!(gateway.add_action_constraints(&[accepted]).await.is_ok());

    let locked = ConstraintRequest::new("Plan", "locked", "bob@example.com", ConstrainedAction::Edit)
        .unwrap_or_else(|_| unreachable!());
    let result = gateway.add_action_constraints(&[locked]).await;
    assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("file is locked")));

    let calls = state.calls().await;
    assert!(calls.iter().any(|call| call.contains(r#""performingUser":"bob@example.com""#)));
    assert!(calls.iter().any(|call| call.contains(r#""action":"Move""#)));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let router = Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/detect_conflicts_demo",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let gateway = gateway(serve(router).await.as_str());

    let result = gateway.detect_conflicts(new_year()).await;
    assert!(matches!(result, Err(AppError::Transport(message)) if message.contains("500")));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/fetch_drive_log", get(|| async { "<html>not json</html>" }));
    let gateway = gateway(serve(router).await.as_str());

    let result = gateway.fetch_log_window(new_year()).await;
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|_| unreachable!());
    let address = listener.local_addr().unwrap_or_else(|_| unreachable!());
    drop(listener);

    let gateway = gateway(format!("http://{address}").as_str());
    let result = gateway.fetch_log_window(new_year()).await;
    assert!(matches!(result, Err(AppError::Transport(_))));
}

#[test]
fn base_url_is_normalized_with_trailing_slash() {
    let gateway = gateway("http://127.0.0.1:5000/accord//");
    assert_eq!(gateway.base_url().as_str(), "http://127.0.0.1:5000/accord/");
    assert_eq!(
        gateway
            .endpoint("fetch_drive_log")
            .map(|url| url.to_string())
            .unwrap_or_default(),
        "http://127.0.0.1:5000/accord/fetch_drive_log"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let http_client = reqwest::Client::new();
    assert!(HttpAccordGateway::new(http_client, "not a url").is_err());
}

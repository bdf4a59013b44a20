//! Accord console front end.

#![forbid(unsafe_code)]

mod cli;
mod console_config;
mod presenter;

use std::sync::Arc;

use accord_application::{
    ConflictDetectionController, ConstraintSubmissionController, LogRetrievalController,
    RequestState, StaggeredListRenderer,
};
use accord_core::{AppError, AppResult};
use accord_domain::{ConstrainedAction, ConstraintRequest, SelectableDateRange};
use accord_infrastructure::HttpAccordGateway;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::console_config::ConsoleConfig;
use crate::presenter::{StdoutRevealSink, format_conflicts, format_page};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = ConsoleConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .cookie_store(true)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let gateway = Arc::new(HttpAccordGateway::new(
        http_client,
        config.api_base_url.as_str(),
    )?);

    info!(
        api_base_url = %gateway.base_url(),
        stale_responses = config.stale_policy.as_str(),
        reveal_stagger_ms = config.reveal_stagger.as_millis(),
        "accord-console started"
    );

    let dates = SelectableDateRange::ending_today();
    match args.command {
        Command::Logs { date, page } => {
            run_logs(gateway, &config, &dates, date.as_str(), page).await
        }
        Command::Detect { date } => run_detect(gateway, &config, &dates, date.as_str()).await,
        Command::Constraints { date } => {
            run_constraints(gateway, &config, &dates, date.as_deref()).await
        }
        Command::AddConstraint {
            file_name,
            file_id,
            user,
            actions,
        } => run_add_constraint(gateway, file_name, file_id, user, actions).await,
    }
}

async fn run_logs(
    gateway: Arc<HttpAccordGateway>,
    config: &ConsoleConfig,
    dates: &SelectableDateRange,
    date: &str,
    page: u64,
) -> AppResult<()> {
    let selection = dates.parse_and_select(date)?;
    let page = usize::try_from(page)
        .map_err(|_| AppError::Validation(format!("page {page} is out of range")))?;

    let mut controller =
        LogRetrievalController::new(gateway).with_stale_response_policy(config.stale_policy);
    controller.fetch_logs(selection).await;
    print_message(controller.message());

    let rendered = if controller.renderer().is_some() {
        Some(controller.go_to_page(page))
    } else {
        None
    };
    controller.settle_refresh().await;

    if let Some(rendered) = rendered {
        for line in format_page(&rendered?) {
            println!("{line}");
        }
    }

    Ok(())
}

async fn run_detect(
    gateway: Arc<HttpAccordGateway>,
    config: &ConsoleConfig,
    dates: &SelectableDateRange,
    date: &str,
) -> AppResult<()> {
    let selection = dates.parse_and_select(date)?;

    let mut logs = LogRetrievalController::new(gateway.clone())
        .with_stale_response_policy(config.stale_policy);
    logs.fetch_logs(selection).await;
    print_message(logs.message());
    logs.settle_refresh().await;

    if !logs.conflict_trigger_enabled() {
        warn!(date = %selection.label(), "no log rows loaded, conflict detection unavailable");
        return Ok(());
    }

    let mut detection = ConflictDetectionController::new(gateway)
        .with_stale_response_policy(config.stale_policy);
    let presentation = detection.detect(selection.instant()).await;
    for line in format_conflicts(&presentation) {
        println!("{line}");
    }

    Ok(())
}

async fn run_constraints(
    gateway: Arc<HttpAccordGateway>,
    config: &ConsoleConfig,
    dates: &SelectableDateRange,
    date: Option<&str>,
) -> AppResult<()> {
    let selection = date.map(|raw| dates.parse_and_select(raw)).transpose()?;

    let mut renderer = StaggeredListRenderer::new(gateway, Arc::new(StdoutRevealSink))
        .with_stagger(config.reveal_stagger);
    renderer.fetch_and_reveal(selection).await;
    print_message(renderer.status_message());

    Ok(())
}

async fn run_add_constraint(
    gateway: Arc<HttpAccordGateway>,
    file_name: String,
    file_id: String,
    user: String,
    actions: Vec<String>,
) -> AppResult<()> {
    let requests = actions
        .iter()
        .map(|raw| {
            let action = raw.parse::<ConstrainedAction>()?;
            ConstraintRequest::new(file_name.as_str(), file_id.as_str(), user.as_str(), action)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let mut controller = ConstraintSubmissionController::new(gateway);
    match controller.submit(requests).await {
        RequestState::Success(count) => println!("Added {count} Action Constraints"),
        other => print_message(other.error_message()),
    }

    Ok(())
}

fn print_message(message: Option<&str>) {
    if let Some(message) = message {
        println!("{message}");
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

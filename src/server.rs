use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::checker;
use crate::config::ServerConfig;
use crate::data;
use crate::data::{ComplianceAssessment, CourseEntry, NewEntry, TimetableRow, ViolationReport};
use crate::error::TimetableError;
use crate::grid::ScheduleGrid;
use crate::pool::EntryPool;
use crate::scorer;
use crate::session::Planner;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<Mutex<Planner>>,
    analyze_delay: Duration,
}

impl AppState {
    pub fn new(planner: Planner, analyze_delay: Duration) -> Self {
        AppState {
            planner: Arc::new(Mutex::new(planner)),
            analyze_delay,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl IntoResponse for TimetableError {
    fn into_response(self) -> Response {
        warn!("Rejected request: {self}");
        let body = ApiError {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct TimetableView {
    pub timetable: ScheduleGrid,
    pub violations: ViolationReport,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub rows: Vec<TimetableRow>,
}

#[derive(Debug, Serialize)]
pub struct RemovedEntries {
    pub removed: usize,
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn list_entries_handler(State(state): State<AppState>) -> Json<EntryPool> {
    let planner = state.planner.lock().await;
    Json(planner.pool().clone())
}

async fn add_entry_handler(
    State(state): State<AppState>,
    Json(input): Json<NewEntry>,
) -> Result<(StatusCode, Json<Arc<CourseEntry>>), TimetableError> {
    let mut planner = state.planner.lock().await;
    let entry = planner.add_entry(input)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn remove_entry_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<RemovedEntries> {
    let mut planner = state.planner.lock().await;
    let removed = planner.remove_entry(&id);
    Json(RemovedEntries { removed })
}

async fn reset_handler(State(state): State<AppState>) -> StatusCode {
    state.planner.lock().await.reset();
    info!("Session reset");
    StatusCode::NO_CONTENT
}

async fn generate_handler(
    State(state): State<AppState>,
) -> Result<Json<TimetableView>, TimetableError> {
    let mut planner = state.planner.lock().await;
    let (grid, violations) = planner.generate()?;
    Ok(Json(TimetableView {
        timetable: grid.clone(),
        violations: violations.clone(),
    }))
}

async fn timetable_handler(State(state): State<AppState>) -> Json<TimetableView> {
    let planner = state.planner.lock().await;
    Json(TimetableView {
        timetable: planner.grid().clone(),
        violations: planner.violations().clone(),
    })
}

async fn check_handler(Json(grid): Json<ScheduleGrid>) -> Json<ViolationReport> {
    Json(checker::check(&grid))
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ComplianceAssessment>, TimetableError> {
    let rows = data::normalize_rows(request.rows)?;
    if !state.analyze_delay.is_zero() {
        tokio::time::sleep(state.analyze_delay).await;
    }
    scorer::score(&rows).map(Json)
}

pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/entries", get(list_entries_handler).post(add_entry_handler))
        .route("/entries/:id", delete(remove_entry_handler))
        .route("/session", delete(reset_handler))
        .route("/timetable", get(timetable_handler))
        .route("/timetable/generate", post(generate_handler))
        .route("/timetable/check", post(check_handler))
        .route("/timetable/analyze", post(analyze_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", api_v1)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(Planner::with_seed(config.generator_seed), config.analyze_delay);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

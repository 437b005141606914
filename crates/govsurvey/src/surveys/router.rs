use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::service::{
    OverviewReport, ReportError, ResultsReport, SubmissionDetailReport, SurveyReportService,
};
use super::store::{Role, SessionAuthority, SessionUser, SubmissionStore};

/// Shared router state: the report service plus the session boundary.
pub struct SurveyRouterState<S, G> {
    service: Arc<SurveyReportService<S>>,
    sessions: Arc<G>,
}

impl<S, G> Clone for SurveyRouterState<S, G> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

/// Router builder exposing the admin reporting and submission endpoints.
pub fn survey_router<S, G>(
    service: Arc<SurveyReportService<S>>,
    sessions: Arc<G>,
) -> Router
where
    S: SubmissionStore + 'static,
    G: SessionAuthority + 'static,
{
    let state = SurveyRouterState { service, sessions };
    Router::new()
        .route("/api/v1/admin/overview", get(overview_handler::<S, G>))
        .route("/api/v1/admin/results/:slug", get(results_handler::<S, G>))
        .route(
            "/api/v1/admin/submissions/:id",
            get(submission_handler::<S, G>),
        )
        .route("/api/v1/admin/export/:slug", get(export_handler::<S, G>))
        .route(
            "/api/v1/surveys/:slug/submissions",
            post(submit_handler::<S, G>),
        )
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OverviewQuery {
    #[serde(default)]
    pub(crate) q: Option<String>,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> Response {
    let payload = json!({ "error": "unauthorized" });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}

fn authenticate<G: SessionAuthority>(
    sessions: &G,
    headers: &HeaderMap,
) -> Result<SessionUser, Response> {
    bearer_token(headers)
        .and_then(|token| sessions.session_user(token))
        .ok_or_else(unauthorized)
}

fn require_admin<G: SessionAuthority>(
    sessions: &G,
    headers: &HeaderMap,
) -> Result<SessionUser, Response> {
    let user = authenticate(sessions, headers)?;
    if user.role != Role::Admin {
        return Err(unauthorized());
    }
    Ok(user)
}

fn error_response(error: ReportError) -> Response {
    let status = match &error {
        ReportError::SurveyNotFound | ReportError::SubmissionNotFound => StatusCode::NOT_FOUND,
        ReportError::AllSourcesFailed => StatusCode::SERVICE_UNAVAILABLE,
        ReportError::Store(_) | ReportError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn overview_handler<S, G>(
    State(state): State<SurveyRouterState<S, G>>,
    headers: HeaderMap,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<OverviewReport>, Response>
where
    S: SubmissionStore + 'static,
    G: SessionAuthority + 'static,
{
    require_admin(&*state.sessions, &headers)?;
    state
        .service
        .overview(query.q.as_deref())
        .await
        .map(Json)
        .map_err(error_response)
}

pub(crate) async fn results_handler<S, G>(
    State(state): State<SurveyRouterState<S, G>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Json<ResultsReport>, Response>
where
    S: SubmissionStore + 'static,
    G: SessionAuthority + 'static,
{
    require_admin(&*state.sessions, &headers)?;
    state.service.results(&slug).map(Json).map_err(error_response)
}

pub(crate) async fn submission_handler<S, G>(
    State(state): State<SurveyRouterState<S, G>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<SubmissionDetailReport>, Response>
where
    S: SubmissionStore + 'static,
    G: SessionAuthority + 'static,
{
    require_admin(&*state.sessions, &headers)?;
    state
        .service
        .submission_detail(&id)
        .map(Json)
        .map_err(error_response)
}

pub(crate) async fn export_handler<S, G>(
    State(state): State<SurveyRouterState<S, G>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response
where
    S: SubmissionStore + 'static,
    G: SessionAuthority + 'static,
{
    if let Err(response) = require_admin(&*state.sessions, &headers) {
        return response;
    }
    match state.service.export_csv(&slug) {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", export.filename),
                ),
            ],
            export.content,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<S, G>(
    State(state): State<SurveyRouterState<S, G>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(payload): Json<Value>,
) -> Response
where
    S: SubmissionStore + 'static,
    G: SessionAuthority + 'static,
{
    let user = match authenticate(&*state.sessions, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.service.submit(&slug, &user.email, &payload) {
        Ok(record) => {
            let payload = json!({
                "id": record.id,
                "survey_slug": record.survey_slug,
                "created_at": record.created_at,
            });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

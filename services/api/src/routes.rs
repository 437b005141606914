use crate::infra::{AppState, InMemorySubmissionStore, StaticSessionAuthority};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use govsurvey::surveys::{survey_router, SurveyReportService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_survey_routes(
    service: Arc<SurveyReportService<InMemorySubmissionStore>>,
    sessions: Arc<StaticSessionAuthority>,
) -> axum::Router {
    survey_router(service, sessions)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::seed_submissions;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn test_router() -> axum::Router {
        let store = InMemorySubmissionStore::default();
        seed_submissions(&store).expect("seeds insert");
        let service = Arc::new(SurveyReportService::new(Arc::new(store)));
        let sessions = Arc::new(StaticSessionAuthority::from_env());
        survey_router(service, sessions).route("/health", axum::routing::get(healthcheck))
    }

    #[tokio::test]
    async fn health_endpoint_answers_ok() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_routes_reject_missing_tokens() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/admin/overview")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_results_render_for_seeded_data() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/admin/results/board_evaluation")
                    .header(header::AUTHORIZATION, "Bearer local-admin-token")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn export_streams_csv_for_admins() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/admin/export/peer-evaluation")
                    .header(header::AUTHORIZATION, "Bearer local-admin-token")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );
    }
}

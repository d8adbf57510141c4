//! HTTP surface for recommendations.
//!
//! Routes:
//! - `POST /recommend_users` with `{"selected_skill": "..."}`
//! - `GET /skills`
//! - `GET /health`
//!
//! The catalog is built once before binding and shared read-only across
//! requests through the [`Recommender`].

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::{Result, SmError};
use crate::matching::Recommender;
use crate::projection::{NO_USERS_MESSAGE, project};

#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub mailto: bool,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    #[must_use]
    pub fn new(recommender: Recommender, mailto: bool) -> Self {
        Self {
            recommender,
            mailto,
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub selected_skill: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub users: usize,
    pub skills: usize,
    pub strategy: &'static str,
    pub started_at: DateTime<Utc>,
}

/// Error body for requests that fail after the catalog was built.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: bool,
    code: &'static str,
    message: String,
}

struct ApiError(StatusCode, SmError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self(status, err) = self;
        let body = ErrorBody {
            error: true,
            code: err.code(),
            message: err.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<SmError> for ApiError {
    fn from(err: SmError) -> Self {
        Self(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/recommend_users", post(recommend_users))
        .route("/skills", get(list_skills))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn recommend_users(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecommendRequest>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError(
            StatusCode::BAD_REQUEST,
            SmError::Server(format!("invalid request body: {}", rejection.body_text())),
        )
    })?;

    let recommendation = state.recommender.recommend(&[request.selected_skill.as_str()])?;
    let users = project(
        state.recommender.catalog().roster(),
        &recommendation,
        state.mailto,
    );
    debug!(skill = %request.selected_skill, users = users.len(), "recommend_users");

    if users.is_empty() {
        let body = MessageBody {
            message: NO_USERS_MESSAGE.to_string(),
        };
        return Ok(Json(body).into_response());
    }
    Ok(Json(users).into_response())
}

async fn list_skills(State(state): State<AppState>) -> Json<Vec<String>> {
    let labels = state
        .recommender
        .catalog()
        .index()
        .labels()
        .map(str::to_string)
        .collect();
    Json(labels)
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let catalog = state.recommender.catalog();
    Json(HealthBody {
        status: "ok",
        users: catalog.roster().len(),
        skills: catalog.index().len(),
        strategy: catalog.strategy().as_str(),
        started_at: state.started_at,
    })
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|err| SmError::Config(format!("invalid bind address {addr}: {err}")))?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, strategy = %state.recommender.catalog().strategy(), "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| SmError::Server(err.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::matching::MatchStrategy;
    use crate::test_utils::fixtures::sample_recommender;

    fn app(mailto: bool) -> Router {
        router(AppState::new(sample_recommender(MatchStrategy::Tiered), mailto))
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn recommend_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/recommend_users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn recommends_users_in_roster_order() {
        let resp = app(false)
            .oneshot(recommend_request(r#"{"selected_skill":"Python"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let ids: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|user| user["id"].clone())
            .collect();
        assert_eq!(ids, [serde_json::json!(1), serde_json::json!(2)]);
        assert_eq!(body[0]["email"], "a@x.com");
        assert!(body[0].get("Skills").is_none());
    }

    #[tokio::test]
    async fn unknown_skill_returns_message() {
        let resp = app(true)
            .oneshot(recommend_request(r#"{"selected_skill":"Rust"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({ "message": NO_USERS_MESSAGE })
        );
    }

    #[tokio::test]
    async fn mailto_links_are_rendered() {
        let resp = app(true)
            .oneshot(recommend_request(r#"{"selected_skill":"Go"}"#))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body[0]["email"], r#"<a href="mailto:c@x.com">c@x.com</a>"#);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let resp = app(false)
            .oneshot(recommend_request(r#"{"skill":"Python"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["code"], "server_error");
    }

    #[tokio::test]
    async fn skills_and_health() {
        let resp = app(false)
            .oneshot(Request::builder().uri("/skills").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, serde_json::json!(["Go", "Python"]));

        let resp = app(false)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["users"], 3);
        assert_eq!(body["skills"], 2);
        assert_eq!(body["strategy"], "tiered");
    }
}

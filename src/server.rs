//! HTTP boundary: a single read endpoint serving the ranked issue list.
//! The engine absorbs every classification failure, so the only error that
//! can reach a client is a store-read failure, mapped to a 500 JSON body.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::engine::TriageEngine;
use crate::out_models::RankedIssue;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Store(err) => err.to_string(),
        };
        error!("Request failed - {}", message);
        let body = ErrorBody { error: message };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub fn api_router(engine: Arc<TriageEngine>) -> Router {
    Router::new()
        .route("/api/feedback", get(ranked_feedback))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

async fn ranked_feedback(
    State(engine): State<Arc<TriageEngine>>,
) -> Result<Json<Vec<RankedIssue>>, ApiError> {
    let ranked = engine.ranked_issues().await?;
    Ok(Json(ranked))
}

//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{FareError, FareRequest, QueryError};
use crate::planner;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes/best", get(best_route))
        .route("/routes", post(add_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Cheapest route between `board` and `dest`.
///
/// Responds 204 with no body when the destination cannot be reached.
async fn best_route(
    State(state): State<AppState>,
    Query(query): Query<BestRouteQuery>,
) -> Result<Response, AppError> {
    match planner::best_route(&state.stores, &query.board, &query.dest) {
        Ok(best) => Ok(Json(BestRouteResponse::from(&best)).into_response()),
        Err(QueryError::RouteNotFound { .. }) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e @ (QueryError::InvalidLocationCode(_) | QueryError::LocationNotRegistered(_))) => {
            Err(AppError::BadRequest {
                message: e.to_string(),
            })
        }
    }
}

/// Add a fare.
///
/// A fare that is already stored is not an error: the response is 200 with
/// the submitted fare instead of 201.
async fn add_route(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let request: FareRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid fare JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    match state.coordinator.add_fare(&request) {
        Ok(added) => Ok((StatusCode::CREATED, Json(FareResponse::from(&added))).into_response()),
        Err(FareError::FareAlreadyExists) => {
            let submitted = FareResponse::from(&request.normalized());
            Ok((StatusCode::OK, Json(submitted)).into_response())
        }
        Err(e @ FareError::InvalidFare) => Err(AppError::BadRequest {
            message: e.to_string(),
        }),
        Err(e @ FareError::Persistence(_)) => Err(AppError::Unavailable {
            message: e.to_string(),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "request rejected");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Unavailable { message } => {
                error!(%message, "request failed");
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

mod open_courts;
mod reserve;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use courtbot_booking::CourtService;
use courtbot_core::AppConfig;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

/// Error text returned with the 403 when the club blocks a booking.
pub const RESTRICTED_MESSAGE: &str = "Booking restricted by club rules";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn CourtService>,
    pub config: Arc<AppConfig>,
}

/// A failed request, rendered as `{"success": false, "error": ...}` with the
/// carried status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    browser: &'static str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn restricted() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: RESTRICTED_MESSAGE.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/open-courts", get(open_courts::open_courts))
        .route("/api/v1/reserve-court", post(reserve::reserve_court))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    // Chrome launches per request, so the only cheap preflight is whether a
    // configured executable path still exists.
    let browser_ok = match &state.config.chrome_executable {
        Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
        None => true,
    };

    if browser_ok {
        (
            StatusCode::OK,
            Json(HealthBody {
                status: "ok",
                browser: "ok",
            }),
        )
    } else {
        tracing::warn!(
            request_id = %req_id.0,
            "health check: configured chrome executable missing"
        );
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthBody {
                status: "degraded",
                browser: "unavailable",
            }),
        )
    }
}

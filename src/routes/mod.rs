// Route exports
pub mod ai;
pub mod profile;

use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::models::ErrorResponse;
use crate::services::{GeminiClient, PostgresClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub gemini: Arc<GeminiClient>,
    pub feed_limit: usize,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(profile::configure)
            .configure(ai::configure),
    );
}

/// Extract the acting user's id from the request
///
/// The upstream gateway authenticates the session and forwards the caller's
/// identity in the `X-User-Id` header. Requests without it are rejected.
pub fn caller_id(req: &HttpRequest) -> Result<String, HttpResponse> {
    req.headers()
        .get("X-User-Id")
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .ok_or_else(|| {
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Missing identity".to_string(),
                message: "X-User-Id header is required".to_string(),
                status_code: 401,
            })
        })
}

use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::models::{ErrorResponse, HealthResponse, LikeResponse, UserResponse};
use crate::routes::{caller_id, AppState};
use crate::services::PostgresError;

/// Configure profile and connection routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/profile", web::get().to(get_profile))
        .route("/matches", web::get().to(get_matches))
        .route("/connections", web::get().to(get_connections))
        .route("/like/{liked_user_id}", web::post().to(like_user));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Fetch the caller's own profile with achievements and listings
///
/// GET /api/profile
async fn get_profile(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match caller_id(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let user = match state.postgres.get_user(&user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "User not found".to_string(),
                message: format!("No user with id {}", user_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user_id, e);
            return internal_error(e);
        }
    };

    let achievements = match state.postgres.get_achievements(&user_id).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch achievements for {}: {}", user_id, e);
            return internal_error(e);
        }
    };

    let listings = match state.postgres.get_marketplace_listings(&user_id).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch listings for {}: {}", user_id, e);
            return internal_error(e);
        }
    };

    HttpResponse::Ok().json(UserResponse::from_parts(user, achievements, listings))
}

/// Discovery feed: candidates the caller has not contacted yet
///
/// GET /api/matches
async fn get_matches(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match caller_id(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state
        .postgres
        .get_discovery_profiles(&user_id, state.feed_limit)
        .await
    {
        Ok(users) => {
            tracing::info!("Discovery feed for {}: {} profiles", user_id, users.len());
            let profiles: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(profiles)
        }
        Err(e) => {
            tracing::error!("Failed to build discovery feed for {}: {}", user_id, e);
            internal_error(e)
        }
    }
}

/// Mutual matches of the caller
///
/// GET /api/connections
async fn get_connections(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user_id = match caller_id(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.postgres.get_connections(&user_id).await {
        Ok(users) => {
            let profiles: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(profiles)
        }
        Err(e) => {
            tracing::error!("Failed to fetch connections for {}: {}", user_id, e);
            internal_error(e)
        }
    }
}

/// Record a like and report whether it completed a match
///
/// POST /api/like/{liked_user_id}
async fn like_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let liker_id = match caller_id(&req) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let liked_id = path.into_inner();

    if liker_id == liked_id {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid like".to_string(),
            message: "A user cannot like themselves".to_string(),
            status_code: 400,
        });
    }

    match state.postgres.user_exists(&liked_id).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "User not found".to_string(),
                message: format!("No user with id {}", liked_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to check user {}: {}", liked_id, e);
            return internal_error(e);
        }
    }

    let is_match = match state.postgres.record_like(&liker_id, &liked_id).await {
        Ok(is_match) => is_match,
        Err(PostgresError::InvalidInput(message)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid like".to_string(),
                message,
                status_code: 400,
            });
        }
        Err(e) => {
            tracing::error!("Failed to record like {} -> {}: {}", liker_id, liked_id, e);
            return internal_error(e);
        }
    };

    // Attach the matched profile so the client can show the new connection
    let match_profile = if is_match {
        match state.postgres.get_user(&liked_id).await {
            Ok(user) => user.map(UserResponse::from),
            Err(e) => {
                tracing::warn!("Match recorded but profile fetch failed: {}", e);
                None
            }
        }
    } else {
        None
    };

    HttpResponse::Ok().json(LikeResponse {
        is_match,
        match_profile,
    })
}

fn internal_error(e: PostgresError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Database error".to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

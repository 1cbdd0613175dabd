use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::json_extract::extract_json;
use crate::core::prompts;
use crate::models::{
    ErrorResponse, GenerateInterestsRequest, ProfileAssistantRequest, ProfileAssistantResponse,
    RewriteMessageRequest, SuggestIcebreakerRequest, SuggestRepliesRequest,
};
use crate::routes::AppState;
use crate::services::{GeminiError, GenerationConfig};

/// Configure AI assist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ai")
            .route("/profile-assistant", web::post().to(profile_assistant))
            .route("/generate-interests", web::post().to(generate_interests))
            .route("/suggest-icebreaker", web::post().to(suggest_icebreaker))
            .route("/suggest-replies", web::post().to(suggest_replies))
            .route("/rewrite-message", web::post().to(rewrite_message)),
    );
}

/// Profile interview turn
///
/// POST /api/ai/profile-assistant
async fn profile_assistant(
    state: web::Data<AppState>,
    req: web::Json<ProfileAssistantRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let config = GenerationConfig::json_output()
        .temperature(0.4)
        .top_p(0.95)
        .max_output_tokens(500);

    let text = match state
        .gemini
        .chat(
            prompts::PROFILE_ASSISTANT_INSTRUCTION,
            &req.chat_history,
            &req.user_message,
            config,
        )
        .await
    {
        Ok(text) => text,
        Err(e) => return gemini_error(e),
    };

    let turn: ProfileAssistantResponse = match extract_json(&text)
        .map_err(|e| e.to_string())
        .and_then(|value| serde_json::from_value(value).map_err(|e| e.to_string()))
    {
        Ok(turn) => turn,
        Err(e) => {
            tracing::error!("Assistant returned malformed turn: {}", e);
            return malformed_json_error();
        }
    };

    HttpResponse::Ok().json(turn)
}

/// Derive interests from a bio
///
/// POST /api/ai/generate-interests
async fn generate_interests(
    state: web::Data<AppState>,
    req: web::Json<GenerateInterestsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let prompt = prompts::generate_interests_prompt(&req.bio_text);

    let text = match state
        .gemini
        .generate(&prompt, GenerationConfig::json_output())
        .await
    {
        Ok(text) => text,
        Err(e) => return gemini_error(e),
    };

    match parse_string_array(&text) {
        Some(interests) => HttpResponse::Ok().json(interests),
        None => {
            tracing::error!("Interests response was not a JSON string array");
            malformed_json_error()
        }
    }
}

/// Suggest a conversation opener
///
/// POST /api/ai/suggest-icebreaker
async fn suggest_icebreaker(
    state: web::Data<AppState>,
    req: web::Json<SuggestIcebreakerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let prompt = prompts::suggest_icebreaker_prompt(
        &req.user_name,
        &req.user_interests,
        req.attempt_number,
    );

    match state
        .gemini
        .generate(&prompt, GenerationConfig::with_temperature(0.85))
        .await
    {
        Ok(text) => HttpResponse::Ok().json(text.trim()),
        Err(e) => gemini_error(e),
    }
}

/// Suggest chat replies
///
/// POST /api/ai/suggest-replies
async fn suggest_replies(
    state: web::Data<AppState>,
    req: web::Json<SuggestRepliesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let prompt = prompts::suggest_replies_prompt(
        &req.last_message_text,
        &req.own_name,
        &req.chat_partner_name,
    );

    let config = GenerationConfig::json_output().temperature(0.8);

    let text = match state.gemini.generate(&prompt, config).await {
        Ok(text) => text,
        Err(e) => return gemini_error(e),
    };

    match parse_string_array(&text) {
        Some(replies) => HttpResponse::Ok().json(replies),
        None => {
            tracing::error!("Replies response was not a JSON string array");
            malformed_json_error()
        }
    }
}

/// Restyle a message toward a goal
///
/// POST /api/ai/rewrite-message
async fn rewrite_message(
    state: web::Data<AppState>,
    req: web::Json<RewriteMessageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let prompt = prompts::rewrite_message_prompt(&req.original_message, &req.rewrite_goal);

    match state
        .gemini
        .generate(&prompt, GenerationConfig::with_temperature(0.85))
        .await
    {
        Ok(text) => HttpResponse::Ok().json(text.trim()),
        Err(e) => gemini_error(e),
    }
}

/// Decode a model answer expected to be a JSON array of strings
fn parse_string_array(text: &str) -> Option<Vec<String>> {
    let value = extract_json(text).ok()?;
    serde_json::from_value(value).ok()
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn malformed_json_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Malformed AI response".to_string(),
        message: "The AI returned JSON that could not be parsed".to_string(),
        status_code: 500,
    })
}

fn gemini_error(e: GeminiError) -> HttpResponse {
    match e {
        GeminiError::Unavailable => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "AI service unavailable".to_string(),
            message: "The AI service is not configured".to_string(),
            status_code: 503,
        }),
        e => {
            tracing::error!("Gemini call failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "AI request failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

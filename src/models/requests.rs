use serde::{Deserialize, Serialize};
use validator::Validate;

/// One message part in a profile-assistant conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One turn of a profile-assistant conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// Request for a profile-assistant interview turn
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileAssistantRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_message", rename = "userMessage")]
    pub user_message: String,
    #[serde(default)]
    #[serde(alias = "chat_history", rename = "chatHistory")]
    pub chat_history: Vec<Content>,
}

/// Request to derive interests from a bio
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateInterestsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "bio_text", rename = "bioText")]
    pub bio_text: String,
}

/// Request for an icebreaker suggestion
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestIcebreakerRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_name", rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    #[serde(alias = "user_interests", rename = "userInterests")]
    pub user_interests: Vec<String>,
    #[serde(default = "default_attempt_number")]
    #[serde(alias = "attempt_number", rename = "attemptNumber")]
    pub attempt_number: u32,
}

fn default_attempt_number() -> u32 {
    1
}

/// Request for chat reply suggestions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestRepliesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "last_message_text", rename = "lastMessageText")]
    pub last_message_text: String,
    #[validate(length(min = 1))]
    #[serde(alias = "own_name", rename = "ownName")]
    pub own_name: String,
    #[validate(length(min = 1))]
    #[serde(alias = "chat_partner_name", rename = "chatPartnerName")]
    pub chat_partner_name: String,
}

/// Request to rewrite a message toward a goal
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RewriteMessageRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "original_message", rename = "originalMessage")]
    pub original_message: String,
    #[serde(default = "default_rewrite_goal")]
    #[serde(alias = "rewrite_goal", rename = "rewriteGoal")]
    pub rewrite_goal: String,
}

fn default_rewrite_goal() -> String {
    "default".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icebreaker_request_defaults() {
        let req: SuggestIcebreakerRequest =
            serde_json::from_str(r#"{"userName": "Ana"}"#).unwrap();
        assert_eq!(req.user_name, "Ana");
        assert!(req.user_interests.is_empty());
        assert_eq!(req.attempt_number, 1);
    }

    #[test]
    fn test_rewrite_request_accepts_camel_case() {
        let req: RewriteMessageRequest =
            serde_json::from_str(r#"{"originalMessage": "hola", "rewriteGoal": "flirty"}"#)
                .unwrap();
        assert_eq!(req.original_message, "hola");
        assert_eq!(req.rewrite_goal, "flirty");
    }

    #[test]
    fn test_empty_bio_fails_validation() {
        let req = GenerateInterestsRequest {
            bio_text: String::new(),
        };
        assert!(req.validate().is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{
    Achievement, MarketplaceListing, ResponsivenessLevel, User,
};

/// User profile as sent over the wire
///
/// Storage and Rust code are snake_case; the frontend speaks camelCase,
/// so the conversion happens here at the serialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub primary_photo_url: Option<String>,
    pub interests: Vec<String>,
    pub occupation: Option<String>,
    pub looking_for: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub gender_identities: Vec<String>,
    pub seeking_gender_identities: Vec<String>,
    pub responsiveness_level: ResponsivenessLevel,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub achievements: Vec<AchievementResponse>,
    pub marketplace_listings: Vec<MarketplaceListingResponse>,
}

impl UserResponse {
    /// Build a wire profile from a user row plus its owned content
    pub fn from_parts(
        user: User,
        achievements: Vec<Achievement>,
        listings: Vec<MarketplaceListing>,
    ) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            bio: user.bio,
            photos: user.photos,
            primary_photo_url: user.primary_photo_url,
            interests: user.interests,
            occupation: user.occupation,
            looking_for: user.looking_for,
            country: user.country,
            latitude: user.latitude,
            longitude: user.longitude,
            gender_identities: user.gender_identities,
            seeking_gender_identities: user.seeking_gender_identities,
            responsiveness_level: user.responsiveness_level,
            is_premium: user.is_premium,
            created_at: user.created_at,
            achievements: achievements.into_iter().map(Into::into).collect(),
            marketplace_listings: listings.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from_parts(user, vec![], vec![])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub description: String,
    pub photo: Option<String>,
    pub date_added: DateTime<Utc>,
    pub is_boosted: bool,
    pub boost_expiry_date: Option<DateTime<Utc>>,
}

impl From<Achievement> for AchievementResponse {
    fn from(a: Achievement) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            category: a.category,
            description: a.description,
            photo: a.photo,
            date_added: a.date_added,
            is_boosted: a.is_boosted,
            boost_expiry_date: a.boost_expiry_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListingResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub title: String,
    pub description: String,
    pub photo: Option<String>,
    pub price: Option<f64>,
    pub is_paid_ad: bool,
    pub date_added: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub was_successful_via_vibrai: Option<bool>,
}

impl From<MarketplaceListing> for MarketplaceListingResponse {
    fn from(l: MarketplaceListing) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            listing_type: l.listing_type,
            title: l.title,
            description: l.description,
            photo: l.photo,
            price: l.price,
            is_paid_ad: l.is_paid_ad,
            date_added: l.date_added,
            expiry_date: l.expiry_date,
            was_successful_via_vibrai: l.was_successful_via_vibrai,
        }
    }
}

/// Response to a like action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub is_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_profile: Option<UserResponse>,
}

/// Response for a profile-assistant interview turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAssistantResponse {
    pub response_text: String,
    pub generated_bio: Option<String>,
    pub is_profile_complete: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            age: 27,
            bio: Some("Hola".to_string()),
            photos: vec!["p1.jpg".to_string()],
            primary_photo_url: None,
            interests: vec!["viajes".to_string()],
            occupation: None,
            looking_for: None,
            country: Some("ES".to_string()),
            latitude: Some(40.41),
            longitude: Some(-3.70),
            gender_identities: vec!["mujer".to_string()],
            seeking_gender_identities: vec!["hombre".to_string()],
            responsiveness_level: ResponsivenessLevel::High,
            gift_balance: 0,
            interaction_score: 5,
            is_premium: false,
            last_interaction_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_response_uses_camel_case_keys() {
        let response = UserResponse::from(sample_user());
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("primaryPhotoUrl").is_some());
        assert!(json.get("genderIdentities").is_some());
        assert!(json.get("responsivenessLevel").is_some());
        assert!(json.get("marketplaceListings").is_some());
        assert!(json.get("primary_photo_url").is_none());
    }

    #[test]
    fn test_like_response_omits_absent_profile() {
        let response = LikeResponse {
            is_match: false,
            match_profile: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json.get("isMatch").unwrap(), false);
        assert!(json.get("matchProfile").is_none());
    }

    #[test]
    fn test_profile_assistant_response_shape() {
        let response = ProfileAssistantResponse {
            response_text: "hola".to_string(),
            generated_bio: None,
            is_profile_complete: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("responseText").is_some());
        assert!(json.get("isProfileComplete").is_some());
    }
}

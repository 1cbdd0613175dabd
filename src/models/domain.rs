use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User row as stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
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
    pub gift_balance: i32,
    pub interaction_score: i32,
    pub is_premium: bool,
    pub last_interaction_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// How quickly a user tends to respond to messages
///
/// Closed enumeration: unknown values are rejected at the boundary,
/// never coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "responsiveness_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResponsivenessLevel {
    Low,
    Medium,
    High,
}

/// Profile-attached achievement, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Achievement {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub description: String,
    pub photo: Option<String>,
    pub date_added: DateTime<Utc>,
    pub is_boosted: bool,
    pub boost_expiry_date: Option<DateTime<Utc>>,
}

/// Profile-attached marketplace listing, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MarketplaceListing {
    pub id: String,
    pub user_id: String,
    #[sqlx(rename = "type")]
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

/// State of a directed connection edge
///
/// Edges are keyed by (liker_id, liked_id), so at most one exists per
/// ordered pair of users. Closed enumeration: unknown values are
/// rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "connection_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Liked,
    Matched,
    Passed,
    Blocked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_status_serializes_lowercase() {
        let json = serde_json::to_string(&ConnectionStatus::Matched).unwrap();
        assert_eq!(json, "\"matched\"");
    }

    #[test]
    fn test_connection_status_rejects_unknown_value() {
        let result: Result<ConnectionStatus, _> = serde_json::from_str("\"superliked\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_responsiveness_level_rejects_unknown_value() {
        let result: Result<ResponsivenessLevel, _> = serde_json::from_str("\"instant\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_responsiveness_level_round_trip() {
        let json = serde_json::to_string(&ResponsivenessLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: ResponsivenessLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ResponsivenessLevel::Medium);
    }
}

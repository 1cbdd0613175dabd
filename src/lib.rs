//! Vibrai Backend - API service for the Vibrai dating app
//!
//! This library provides the user-profile store, the like/match connection
//! ledger, the discovery feed, and the AI conversation-helper proxy used by
//! the Vibrai frontend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_json, resolve_like, LikeOutcome};
pub use crate::models::{ConnectionStatus, LikeResponse, User, UserResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let outcome = resolve_like(Some(ConnectionStatus::Liked));
        assert!(outcome.is_match());
    }
}

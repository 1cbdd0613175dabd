// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Achievement, ConnectionStatus, MarketplaceListing, ResponsivenessLevel, User};
pub use requests::{
    Content, GenerateInterestsRequest, Part, ProfileAssistantRequest, RewriteMessageRequest,
    SuggestIcebreakerRequest, SuggestRepliesRequest,
};
pub use responses::{
    AchievementResponse, ErrorResponse, HealthResponse, LikeResponse,
    MarketplaceListingResponse, ProfileAssistantResponse, UserResponse,
};

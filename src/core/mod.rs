// Core logic exports
pub mod json_extract;
pub mod ledger;
pub mod prompts;

pub use json_extract::{extract_json, JsonExtractError};
pub use ledger::{resolve_like, LikeOutcome};

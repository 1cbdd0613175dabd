use serde_json::Value;
use thiserror::Error;

/// Errors produced while extracting JSON from model output
#[derive(Debug, Error)]
pub enum JsonExtractError {
    #[error("Model returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Extract a JSON payload from generative-model output text
///
/// Models frequently wrap JSON answers in a fenced code block
/// (```json ... ```), often with prose around it. Tolerant-decode
/// strategy: attempt a strict parse first; on failure pull the first
/// fenced block out of the text and retry once. Anything else is a
/// hard failure, not repaired heuristically.
pub fn extract_json(text: &str) -> Result<Value, JsonExtractError> {
    let trimmed = text.trim();

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(first_err) => match find_fenced_block(trimmed) {
            Some(inner) => serde_json::from_str(inner).map_err(Into::into),
            None => Err(first_err.into()),
        },
    }
}

/// Find the first ``` fence in the text, with an optional `json` language tag
///
/// The fence may appear anywhere, surrounded by prose. Returns the inner
/// text, or None if no complete fenced block exists.
fn find_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let rest = &text[open + 3..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let close = rest.find("```")?;
    Some(rest[..close].trim())
}

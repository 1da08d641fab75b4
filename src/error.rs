use thiserror::Error;

/// Fatal configuration problems detected at match start. Everything the
/// core reads from the host config is validated once here; nothing is
/// re-interpreted per turn.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unit information table has {0} entries, expected at least 6")]
    TruncatedUnitTable(usize),
    #[error("unit information entry {0} has an empty shorthand")]
    EmptyShorthand(usize),
}

/// Structural failures of the per-turn event feed. Unlike placement
/// rejections these are not expected control flow: a frame that cannot
/// be parsed records nothing and the error propagates to the caller.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("action frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("breach event {index} is malformed: {reason}")]
    MalformedBreach { index: usize, reason: &'static str },
}

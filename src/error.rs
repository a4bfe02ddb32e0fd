//! Error types shared across the crate.
//! Conversation misses (unknown names, blank input) are not errors; they are
//! ordinary outcomes of the engine and never surface here.

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("catalogue IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalogue parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalogue fetch error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalogue fetch returned HTTP {0}")]
    Status(u16),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

//! Error types shared by every pipeline.

/// Result type for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Error types for scraper operations
#[derive(thiserror::Error, Debug)]
pub enum ScraperError {
    #[error("YOUTUBE_API_KEY not set. Copy .env.example to .env and fill in your key.")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API request to {endpoint} failed with status {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScraperError {
    /// Errors that only spoil one entity (a channel, a video page). The run
    /// records the entity as failed and moves on; everything else aborts it.
    pub fn is_per_entity(&self) -> bool {
        matches!(self, Self::ChannelNotFound(_) | Self::Browser(_))
    }

    /// Errors raised before any work starts.
    pub fn is_fatal_config(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::Config(_))
    }
}

impl From<fantoccini::error::CmdError> for ScraperError {
    fn from(e: fantoccini::error::CmdError) -> Self {
        Self::Browser(e.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for ScraperError {
    fn from(e: fantoccini::error::NewSessionError) -> Self {
        Self::Browser(format!("could not start WebDriver session: {}", e))
    }
}

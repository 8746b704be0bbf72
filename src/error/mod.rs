use thiserror::Error;

/// Error taxonomy for the conversion bot. Handlers match on the kind to pick
/// the user-visible reply; none of these are fatal to the dispatch loop.
#[derive(Debug, Clone, Error)]
pub enum BotError {
    /// User input that does not parse into a usable conversion request
    #[error("Parse Error: {0}")]
    ParseError(String),

    /// Price API transport failures or non-success HTTP statuses
    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    /// Pair rejected by the price API, or missing from its response
    #[error("Unsupported Pair: {0}")]
    InvalidPair(String),

    /// Startup configuration errors
    #[error("Config Error: {0}")]
    ConfigError(String),

    /// Telegram Bot API transport errors
    #[error("Telegram Error: {0}")]
    TelegramError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::ServiceUnavailable(format!("HTTP request failed: {err}"))
    }
}

impl BotError {
    /// True for errors caused by what the user typed, as opposed to the
    /// service side. User errors are logged at warn, the rest at error.
    pub fn is_user_error(&self) -> bool {
        matches!(self, BotError::ParseError(_))
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

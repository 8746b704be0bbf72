use log::LevelFilter;
use std::env;

pub const DEFAULT_PRICE_API_BASE_URL: &str = "https://min-api.cryptocompare.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub log_filename: String,
    pub price_api_base_url: String,
    pub http_timeout_secs: u64,
    pub poll_timeout_secs: u64,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            telegram_token: env::var("TELEGRAM_API_KEY").unwrap_or_default(),
            log_filename: env::var("LOG_FILENAME").unwrap_or_default(),
            price_api_base_url: env::var("PRICE_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PRICE_API_BASE_URL.to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(25),
            log_level: env::var("LOG_LEVEL").ok(),
        }
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn validate_and_log(&self) {
        // The token never goes to the log.
        log::info!(
            "Configuration loaded: log_filename={}, price_api_base_url={}, \
             http_timeout_secs={}, poll_timeout_secs={}, log_level={:?}",
            self.log_filename,
            self.price_api_base_url,
            self.http_timeout_secs,
            self.poll_timeout_secs,
            self.log_level,
        );
    }
}

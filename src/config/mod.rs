pub mod settings;

pub use settings::Config;

use crate::error::BotError;
use std::env;
use std::sync::Arc;

/// Environment variables that must be present for the bot to start.
pub const REQUIRED_ENV_VARS: &[&str] = &["TELEGRAM_API_KEY", "LOG_FILENAME"];

/// Loads the application configuration as an `Arc<Config>`, reading a `.env`
/// file if one is present. Missing required variables are a startup error;
/// nothing is read from the environment after this returns.
pub fn load_config() -> Result<Arc<Config>, BotError> {
    dotenv::dotenv().ok();

    let missing: Vec<&str> = REQUIRED_ENV_VARS
        .iter()
        .copied()
        .filter(|key| env::var(key).map_or(true, |value| value.is_empty()))
        .collect();
    if !missing.is_empty() {
        return Err(BotError::ConfigError(format!(
            "missing required environment variables: {missing:?}"
        )));
    }

    let config = Config::from_env();
    if config.price_api_base_url.is_empty() {
        return Err(BotError::ConfigError(
            "PRICE_API_BASE_URL cannot be empty".to_string(),
        ));
    }

    Ok(Arc::new(config))
}

//! HTTP client for the Telegram Bot API.

use crate::error::{BotError, Result};
use crate::telegram::types::{
    AnswerCallbackQuery, ApiResponse, GetUpdates, Message, ReplyMarkup, SendMessage, Update,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

pub struct TelegramClient {
    http: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
}

impl TelegramClient {
    /// `request_timeout` bounds ordinary calls; long polls get their own
    /// per-request timeout derived from the poll duration.
    pub fn new(token: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| BotError::ConfigError(format!("failed to build HTTP client: {e}")))?;
        let base_url = Url::parse(&format!("https://api.telegram.org/bot{token}/"))
            .map_err(|e| BotError::ConfigError(format!("invalid Telegram token: {e}")))?;
        Ok(Self {
            http,
            base_url,
            request_timeout,
        })
    }

    /// Long-polls for updates past `offset`. Blocks server-side for up to
    /// `poll_timeout_secs` when there is nothing to deliver.
    pub async fn get_updates(&self, offset: i64, poll_timeout_secs: u64) -> Result<Vec<Update>> {
        let payload = GetUpdates {
            offset,
            timeout: poll_timeout_secs,
        };
        // The poll itself may last the full server-side timeout.
        let timeout = Duration::from_secs(poll_timeout_secs) + self.request_timeout;
        self.call("getUpdates", &payload, timeout).await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<Message> {
        let payload = SendMessage {
            chat_id,
            text: text.to_string(),
            reply_markup,
        };
        self.call("sendMessage", &payload, self.request_timeout)
            .await
    }

    /// Stops the button's loading spinner; the visible answer is the message
    /// sent separately.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<bool> {
        let payload = AnswerCallbackQuery {
            callback_query_id: callback_query_id.to_string(),
        };
        self.call("answerCallbackQuery", &payload, self.request_timeout)
            .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &impl Serialize,
        timeout: Duration,
    ) -> Result<T> {
        // Errors carry the method name only; the URL embeds the token.
        let url = self
            .base_url
            .join(method)
            .map_err(|e| BotError::TelegramError(format!("{method}: bad method URL: {e}")))?;

        let response = self
            .http
            .post(url)
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| BotError::TelegramError(format!("{method} request failed: {e}")))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::TelegramError(format!("{method} returned a bad body: {e}")))?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "no description".to_string());
            return Err(BotError::TelegramError(format!(
                "{method} rejected: {description}"
            )));
        }
        envelope.result.ok_or_else(|| {
            BotError::TelegramError(format!("{method} returned ok without a result"))
        })
    }
}

//! Command routing over per-user session state.
//!
//! Dispatch order mirrors the handler chain of the chat surface: recognized
//! commands first (from any state), then button callbacks, then free text.
//! Free text is an amount entry while a pair is pending, and otherwise goes
//! to the greeting/farewell classifier.

use crate::bot::event::{ChatEvent, EventKind, Markup, Reply};
use crate::bot::replies;
use crate::error::BotError;
use crate::exchange::ConversionService;
use crate::session::{CurrencyPair, SessionState, SessionStore};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static GREETINGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)hello|hi|hey|good morning|good afternoon|good evening")
        .expect("greeting pattern is valid")
});

static FAREWELLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)bye|goodbye|see you|farewell|have a nice day|good night")
        .expect("farewell pattern is valid")
});

pub struct CommandRouter {
    service: ConversionService,
    sessions: SessionStore,
}

impl CommandRouter {
    pub fn new(service: ConversionService, sessions: SessionStore) -> Self {
        Self { service, sessions }
    }

    pub async fn handle(&self, event: ChatEvent) -> Reply {
        let user_id = event.user_id;
        match event.kind {
            EventKind::Command { name, args } => self.handle_command(user_id, &name, &args).await,
            EventKind::Callback(data) => self.handle_callback(user_id, &data),
            EventKind::Text(text) => self.handle_text(user_id, &text).await,
        }
    }

    async fn handle_command(&self, user_id: i64, name: &str, args: &str) -> Reply {
        match name {
            "start" => {
                self.sessions.clear(user_id);
                info!("User {user_id} has started the conversation.");
                Reply::with_markup(replies::GREETING, Markup::MainMenu)
            }
            "help" => {
                self.sessions.clear(user_id);
                info!("User {user_id} has requested help.");
                Reply::text(replies::HELP)
            }
            "often_exchanges" => {
                self.sessions.clear(user_id);
                info!("User {user_id} has requested often exchanges.");
                Reply::with_markup(replies::OFTEN_EXCHANGES, Markup::ShortcutPairs)
            }
            "convert" => self.handle_convert_command(user_id, args).await,
            // Unrecognized commands flow through the free-text path.
            _ => {
                let raw = if args.is_empty() {
                    format!("/{name}")
                } else {
                    format!("/{name} {args}")
                };
                self.handle_text(user_id, &raw).await
            }
        }
    }

    /// `/convert <amount> <from> <to>`. Always resets the session first,
    /// whatever happens to the arguments afterwards.
    async fn handle_convert_command(&self, user_id: i64, args: &str) -> Reply {
        self.sessions.clear(user_id);

        let tokens: Vec<&str> = args.split_whitespace().collect();
        let [amount, from, to] = tokens.as_slice() else {
            warn!("User {user_id} attempted an invalid conversion request.");
            return Reply::text(replies::CONVERT_FORMAT_HELP);
        };
        let Ok(amount) = amount.parse::<f64>() else {
            warn!("User {user_id} attempted an invalid conversion request.");
            return Reply::text(replies::CONVERT_FORMAT_HELP);
        };

        self.run_conversion(user_id, amount, from, to, replies::CONVERT_FORMAT_HELP)
            .await
    }

    fn handle_callback(&self, user_id: i64, data: &str) -> Reply {
        match CurrencyPair::parse(data) {
            Some(pair) => {
                info!("User {user_id} has selected exchange {pair}.");
                let prompt = replies::pair_selected(&pair);
                self.sessions.await_amount(user_id, pair);
                Reply::text(prompt)
            }
            None => {
                warn!("User {user_id} pressed a button with an unusable payload: {data:?}");
                Reply::text(replies::TEXT_FALLBACK)
            }
        }
    }

    async fn handle_text(&self, user_id: i64, text: &str) -> Reply {
        if let SessionState::AwaitingAmount(pair) = self.sessions.get(user_id) {
            return self.handle_amount_entry(user_id, pair, text).await;
        }
        self.classify_text(user_id, text)
    }

    /// Amount entry for a pre-selected pair. A value that does not parse as
    /// a positive number keeps the session waiting; a completed lookup,
    /// successful or not, ends it.
    async fn handle_amount_entry(&self, user_id: i64, pair: CurrencyPair, text: &str) -> Reply {
        let amount = text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0);
        let Some(amount) = amount else {
            warn!("User {user_id} attempted an invalid exchange amount: {text:?}");
            return Reply::text(replies::ENTER_NUMBER);
        };

        self.sessions.clear(user_id);
        self.run_conversion(user_id, amount, &pair.from, &pair.to, replies::ENTER_NUMBER)
            .await
    }

    /// Runs the conversion and maps each failure kind onto its reply text.
    /// `parse_failure_text` differs between the `/convert` form and the
    /// amount-entry form.
    async fn run_conversion(
        &self,
        user_id: i64,
        amount: f64,
        from: &str,
        to: &str,
        parse_failure_text: &str,
    ) -> Reply {
        match self.service.convert(amount, from, to).await {
            Ok(conversion) => {
                info!("User {user_id} has completed the exchange successfully.");
                Reply::text(replies::conversion_result(&conversion))
            }
            Err(err) => {
                if err.is_user_error() {
                    warn!("User {user_id} sent a conversion request that was rejected: {err}");
                } else {
                    error!("User {user_id} encountered an error during conversion: {err}");
                }
                let text = match err {
                    BotError::ParseError(_) => parse_failure_text,
                    BotError::InvalidPair(_) => replies::UNSUPPORTED_PAIR,
                    _ => replies::SERVICE_UNAVAILABLE,
                };
                Reply::text(text)
            }
        }
    }

    fn classify_text(&self, user_id: i64, text: &str) -> Reply {
        // Greeting wins when both patterns match.
        if GREETINGS.is_match(text) {
            info!("User {user_id} greeted the bot.");
            Reply::text(replies::TEXT_GREETING)
        } else if FAREWELLS.is_match(text) {
            info!("User {user_id} bid farewell.");
            Reply::text(replies::TEXT_FAREWELL)
        } else {
            warn!("User {user_id} made an incomprehensible request.");
            Reply::text(replies::TEXT_FALLBACK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PriceClient;
    use crate::error::Result;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct StubPriceClient {
        rate: Result<f64>,
    }

    #[async_trait]
    impl PriceClient for StubPriceClient {
        async fn get_rate(&self, _from: &str, _to: &str) -> Result<f64> {
            self.rate.clone()
        }
    }

    fn router_with_rate(rate: f64) -> CommandRouter {
        CommandRouter::new(
            ConversionService::new(Arc::new(StubPriceClient { rate: Ok(rate) })),
            SessionStore::new(),
        )
    }

    fn router_with_error(err: BotError) -> CommandRouter {
        CommandRouter::new(
            ConversionService::new(Arc::new(StubPriceClient { rate: Err(err) })),
            SessionStore::new(),
        )
    }

    async fn send_text(router: &CommandRouter, user_id: i64, text: &str) -> Reply {
        router.handle(ChatEvent::from_text(user_id, text)).await
    }

    #[tokio::test]
    async fn start_help_and_often_exchanges_reset_the_session() {
        let router = router_with_rate(2.0);
        for command in ["/start", "/help", "/often_exchanges"] {
            router.handle(ChatEvent::callback(7, "BTC USD")).await;
            send_text(&router, 7, command).await;
            assert_eq!(router.sessions.get(7), SessionState::Idle);
        }
    }

    #[tokio::test]
    async fn start_brings_up_the_main_menu() {
        let router = router_with_rate(2.0);
        let reply = send_text(&router, 7, "/start").await;
        assert_eq!(reply.markup, Some(Markup::MainMenu));
        assert_eq!(reply.text, replies::GREETING);
    }

    #[tokio::test]
    async fn often_exchanges_brings_up_the_shortcut_keyboard() {
        let router = router_with_rate(2.0);
        let reply = send_text(&router, 7, "/often_exchanges").await;
        assert_eq!(reply.markup, Some(Markup::ShortcutPairs));
    }

    #[tokio::test]
    async fn shortcut_selection_collects_an_amount() {
        let router = router_with_rate(0.00002);

        let reply = router.handle(ChatEvent::callback(7, "BTC USD")).await;
        assert_eq!(
            reply.text,
            "You have selected exchange BTC -> USD. Now enter the exchange amount"
        );
        assert_eq!(
            router.sessions.get(7),
            SessionState::AwaitingAmount(CurrencyPair {
                from: "BTC".to_string(),
                to: "USD".to_string()
            })
        );

        // A non-numeric amount keeps the session waiting.
        let reply = send_text(&router, 7, "a lot").await;
        assert_eq!(reply.text, replies::ENTER_NUMBER);
        assert_eq!(
            router.sessions.get(7),
            SessionState::AwaitingAmount(CurrencyPair {
                from: "BTC".to_string(),
                to: "USD".to_string()
            })
        );

        // A valid amount completes the conversion and resets the session.
        let reply = send_text(&router, 7, "100").await;
        assert_eq!(reply.text, "100.0 BTC equals 0.002 USD");
        assert_eq!(router.sessions.get(7), SessionState::Idle);
    }

    #[tokio::test]
    async fn convert_command_uses_the_destination_keyed_rate() {
        // USD -> BTC against a 50 000 USD/BTC market: the response is keyed
        // by BTC and holds BTC-per-USD.
        let router = router_with_rate(0.00002);
        let reply = send_text(&router, 7, "/convert 100 usd btc").await;
        assert_eq!(reply.text, "100.0 USD equals 0.002 BTC");
    }

    #[tokio::test]
    async fn convert_command_rejects_malformed_arguments() {
        let router = router_with_rate(2.0);
        for args in ["/convert abc usd btc", "/convert 100 usd", "/convert", "/convert -5 usd btc"] {
            let reply = send_text(&router, 7, args).await;
            assert_eq!(reply.text, replies::CONVERT_FORMAT_HELP);
            assert_eq!(router.sessions.get(7), SessionState::Idle);
        }
    }

    #[tokio::test]
    async fn convert_command_escapes_a_pending_amount_entry() {
        let router = router_with_rate(2.0);
        router.handle(ChatEvent::callback(7, "BTC USD")).await;
        let reply = send_text(&router, 7, "/convert 2 eth btc").await;
        assert_eq!(reply.text, "2.0 ETH equals 4.0 BTC");
        assert_eq!(router.sessions.get(7), SessionState::Idle);
    }

    #[tokio::test]
    async fn api_reported_errors_read_as_unsupported_pair() {
        let router = router_with_error(BotError::InvalidPair("unknown symbol".to_string()));
        let reply = send_text(&router, 7, "/convert 100 usd xyz").await;
        assert_eq!(reply.text, replies::UNSUPPORTED_PAIR);
    }

    #[tokio::test]
    async fn transport_failures_read_as_try_again_later() {
        let router = router_with_error(BotError::ServiceUnavailable("HTTP 503".to_string()));
        let reply = send_text(&router, 7, "/convert 100 usd btc").await;
        assert_eq!(reply.text, replies::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn a_failed_lookup_still_ends_the_amount_entry() {
        let router = router_with_error(BotError::ServiceUnavailable("HTTP 503".to_string()));
        router.handle(ChatEvent::callback(7, "BTC USD")).await;
        let reply = send_text(&router, 7, "100").await;
        assert_eq!(reply.text, replies::SERVICE_UNAVAILABLE);
        assert_eq!(router.sessions.get(7), SessionState::Idle);
    }

    #[tokio::test]
    async fn free_text_is_classified() {
        let router = router_with_rate(2.0);
        assert_eq!(
            send_text(&router, 7, "hello there").await.text,
            replies::TEXT_GREETING
        );
        assert_eq!(
            send_text(&router, 7, "bye for now").await.text,
            replies::TEXT_FAREWELL
        );
        assert_eq!(
            send_text(&router, 7, "asdfgh").await.text,
            replies::TEXT_FALLBACK
        );
    }

    #[tokio::test]
    async fn greeting_wins_over_farewell() {
        let router = router_with_rate(2.0);
        assert_eq!(
            send_text(&router, 7, "hello and goodbye").await.text,
            replies::TEXT_GREETING
        );
    }

    #[tokio::test]
    async fn classification_ignores_case() {
        let router = router_with_rate(2.0);
        assert_eq!(
            send_text(&router, 7, "GOOD MORNING").await.text,
            replies::TEXT_GREETING
        );
    }

    #[tokio::test]
    async fn malformed_callbacks_do_not_open_a_session() {
        let router = router_with_rate(2.0);
        let reply = router.handle(ChatEvent::callback(7, "BTC")).await;
        assert_eq!(reply.text, replies::TEXT_FALLBACK);
        assert_eq!(router.sessions.get(7), SessionState::Idle);
    }
}

//! Update dispatch loop.
//!
//! One long-poll loop feeds one spawned task per update, so a slow price
//! lookup delays only the user who asked for it. Handler errors are logged
//! and die with their task; the loop itself only ever sleeps and retries.

use crate::bot::event::{ChatEvent, EventKind};
use crate::bot::router::CommandRouter;
use crate::error::Result;
use crate::telegram::types::Update;
use crate::telegram::{keyboards, TelegramClient};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

pub struct Dispatcher {
    telegram: Arc<TelegramClient>,
    router: Arc<CommandRouter>,
    poll_timeout_secs: u64,
}

impl Dispatcher {
    pub fn new(
        telegram: Arc<TelegramClient>,
        router: Arc<CommandRouter>,
        poll_timeout_secs: u64,
    ) -> Self {
        Self {
            telegram,
            router,
            poll_timeout_secs,
        }
    }

    pub async fn run(&self) {
        info!("Dispatch loop started.");
        let mut offset: i64 = 0;
        loop {
            let updates = match self.telegram.get_updates(offset, self.poll_timeout_secs).await {
                Ok(updates) => updates,
                Err(err) => {
                    error!("Failed to fetch updates: {err}");
                    sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let telegram = Arc::clone(&self.telegram);
                let router = Arc::clone(&self.router);
                tokio::spawn(async move {
                    if let Err(err) = handle_update(telegram, router, update).await {
                        error!("Update handler failed: {err}");
                    }
                });
            }
        }
    }
}

async fn handle_update(
    telegram: Arc<TelegramClient>,
    router: Arc<CommandRouter>,
    update: Update,
) -> Result<()> {
    let Some(inbound) = Inbound::from_update(update) else {
        debug!("Ignoring an update without usable text or callback data");
        return Ok(());
    };

    let reply = router.handle(inbound.event).await;
    let markup = reply.markup.map(keyboards::render);
    telegram
        .send_message(inbound.chat_id, &reply.text, markup)
        .await?;

    if let Some(callback_id) = inbound.callback_id {
        telegram.answer_callback_query(&callback_id).await?;
    }
    Ok(())
}

struct Inbound {
    event: ChatEvent,
    chat_id: i64,
    callback_id: Option<String>,
}

impl Inbound {
    /// Adapts a raw update into a routable event. Updates without text or
    /// callback data (stickers, edits, joins) are dropped.
    fn from_update(update: Update) -> Option<Self> {
        if let Some(callback) = update.callback_query {
            let chat_id = callback.message.as_ref()?.chat.id;
            let data = callback.data?;
            return Some(Self {
                event: ChatEvent {
                    user_id: callback.from.id,
                    kind: EventKind::Callback(data),
                },
                chat_id,
                callback_id: Some(callback.id),
            });
        }

        let message = update.message?;
        let text = message.text?;
        let user_id = message.from.as_ref().map_or(message.chat.id, |user| user.id);
        Some(Self {
            event: ChatEvent::from_text(user_id, &text),
            chat_id: message.chat.id,
            callback_id: None,
        })
    }
}

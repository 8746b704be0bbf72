//! Transport-agnostic chat events and replies.
//!
//! The router consumes `ChatEvent`s and produces `Reply`s; which messenger
//! delivered the event and how a `Markup` intent gets rendered is the
//! transport layer's business.

#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub user_id: i64,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub enum EventKind {
    /// A `/command`, split into its name and the remainder of the line
    Command { name: String, args: String },
    /// Any other text message
    Text(String),
    /// A button press carrying its callback payload
    Callback(String),
}

impl ChatEvent {
    pub fn callback(user_id: i64, data: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Callback(data.into()),
        }
    }

    /// Classifies a text message: `/name args` becomes a command (a
    /// `@botname` suffix on the name is dropped), everything else free text.
    pub fn from_text(user_id: i64, text: &str) -> Self {
        let trimmed = text.trim();
        let kind = match trimmed.strip_prefix('/') {
            Some(rest) => {
                let mut parts = rest.splitn(2, char::is_whitespace);
                let name = parts
                    .next()
                    .unwrap_or("")
                    .split('@')
                    .next()
                    .unwrap_or("")
                    .to_string();
                let args = parts.next().unwrap_or("").trim().to_string();
                EventKind::Command { name, args }
            }
            None => EventKind::Text(trimmed.to_string()),
        };
        Self { user_id, kind }
    }
}

/// Abstract markup intents; the transport decides what they look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    MainMenu,
    ShortcutPairs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub markup: Option<Markup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
        }
    }

    pub fn with_markup(text: impl Into<String>, markup: Markup) -> Self {
        Self {
            text: text.into(),
            markup: Some(markup),
        }
    }
}

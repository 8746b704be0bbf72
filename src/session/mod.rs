//! Per-user conversation state.
//!
//! Sessions live in memory only and have no expiry: a user left in
//! `AwaitingAmount` stays there until a clearing command or a completed
//! amount entry. An absent key is the same as `Idle`. Concurrent writes for
//! one user are last-write-wins; the map itself is safe to share across
//! handler tasks.

use dashmap::DashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    /// Parses a `"SRC DST"` shortcut payload. Anything but exactly two
    /// tokens is rejected.
    pub fn parse(data: &str) -> Option<Self> {
        let mut tokens = data.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(from), Some(to), None) => Some(Self {
                from: from.to_ascii_uppercase(),
                to: to.to_ascii_uppercase(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The pending pair travels inside the variant, so it exists exactly when an
/// amount is being awaited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingAmount(CurrencyPair),
}

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<i64, SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: i64) -> SessionState {
        self.sessions
            .get(&user_id)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    pub fn await_amount(&self, user_id: i64, pair: CurrencyPair) {
        self.sessions
            .insert(user_id, SessionState::AwaitingAmount(pair));
    }

    pub fn clear(&self, user_id: i64) {
        self.sessions.remove(&user_id);
    }
}

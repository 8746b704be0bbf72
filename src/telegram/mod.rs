//! Minimal Telegram Bot API surface: long polling, message sending,
//! callback acknowledgement, and the two keyboards the bot shows.

pub mod client;
pub mod keyboards;
pub mod types;

pub use client::TelegramClient;

//! Bot core: inbound event model, command routing over per-user session
//! state, reply texts, and the update dispatch loop.

pub mod dispatcher;
pub mod event;
pub mod replies;
pub mod router;

pub use dispatcher::Dispatcher;
pub use event::{ChatEvent, EventKind, Markup, Reply};
pub use router::CommandRouter;

/// Frequently requested conversions offered as one-tap buttons. Button label
/// and callback payload are the same `"SRC DST"` string.
pub const SHORTCUT_PAIRS: &[&str] = &[
    "BTC USD", "ETH BTC", "SOL USD", "ETH USD", "EUR RUB", "USD RUB", "RUB USD", "USD EUR",
];

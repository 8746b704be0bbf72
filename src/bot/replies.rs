//! Every user-visible string in one place, plus the number formatting the
//! reply template depends on.

use crate::exchange::Conversion;
use crate::session::CurrencyPair;

pub const GREETING: &str = "Hello! I am a cryptocurrency conversion bot. \
     Choose a command from the menu or press /help for assistance.";

pub const HELP: &str = "Available commands:\n\
     /start - begin conversation with the bot\n\
     /help - get list of available commands\n\
     /convert <amount> <from_currency> <to_currency> - convert currency\n\
     /often_exchanges - display frequently requested conversions";

pub const OFTEN_EXCHANGES: &str = "Frequently requested conversions today:";

pub const ENTER_NUMBER: &str = "Please enter a number or begin again with /start";

pub const CONVERT_FORMAT_HELP: &str = "Incorrect request format\n\
     Use the template /convert <amount> <from_currency> <to_currency>\n\
     Example: /convert 100 usd btc";

pub const SERVICE_UNAVAILABLE: &str = "Failed to process the request. Please try again later";

pub const UNSUPPORTED_PAIR: &str =
    "Invalid request parameters or one of the selected currencies is not supported";

pub const TEXT_GREETING: &str = "Good day. This is a currency conversion bot.\n\
     Press /help for details";

pub const TEXT_FAREWELL: &str = "Thank you for using our bot. Goodbye!";

pub const TEXT_FALLBACK: &str = "I do not understand you!\n\
     Press /help for details";

pub fn pair_selected(pair: &CurrencyPair) -> String {
    format!("You have selected exchange {pair}. Now enter the exchange amount")
}

pub fn conversion_result(conversion: &Conversion) -> String {
    format!(
        "{} {} equals {} {}",
        format_number(conversion.amount),
        conversion.from,
        format_number(round5(conversion.value)),
        conversion.to
    )
}

/// Rounds to five decimal places, half away from zero.
fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

/// Renders a float the way the reply template expects: integral values keep
/// a trailing `.0`, fractional values print their shortest form.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

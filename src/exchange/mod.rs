//! Conversion service: one price lookup, one multiplication.

use crate::api::PriceClient;
use crate::error::{BotError, Result};
use std::sync::Arc;

/// A completed conversion, kept at full precision. Rounding happens only
/// when the reply text is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub value: f64,
}

pub struct ConversionService {
    price_client: Arc<dyn PriceClient>,
}

impl ConversionService {
    pub fn new(price_client: Arc<dyn PriceClient>) -> Self {
        Self { price_client }
    }

    /// Converts `amount` units of `from` into `to` units. Symbols are always
    /// uppercased on entry, so callers may pass any case. The rate returned
    /// by the price client is destination-keyed: units of `to` per one unit
    /// of `from`, applied as `amount * rate`.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion> {
        let from = normalize_symbol(from)?;
        let to = normalize_symbol(to)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BotError::ParseError(format!(
                "amount must be a positive number, got {amount}"
            )));
        }

        let rate = self.price_client.get_rate(&from, &to).await?;
        Ok(Conversion {
            value: amount * rate,
            amount,
            from,
            to,
        })
    }
}

fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim();
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(BotError::ParseError(format!(
            "{raw:?} is not a currency symbol"
        )));
    }
    Ok(symbol.to_ascii_uppercase())
}

//! Outbound price API boundary.
//!
//! `PriceClient` is the seam the conversion service talks through; the only
//! production implementation queries the CryptoCompare price endpoint.

pub mod price_client;

pub use price_client::{CryptoCompareClient, PriceClient};

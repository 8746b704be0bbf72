use crypto_convert_bot::{
    api::CryptoCompareClient,
    bot::{CommandRouter, Dispatcher},
    config,
    exchange::ConversionService,
    session::SessionStore,
    telegram::TelegramClient,
    utils::setup_logging,
};
use log::info;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_config()?;
    setup_logging(&app_config.log_filename, app_config.log_level_filter())?;
    app_config.validate_and_log();
    info!("Crypto conversion bot starting...");

    let request_timeout = Duration::from_secs(app_config.http_timeout_secs);
    let price_client = Arc::new(CryptoCompareClient::new(
        &app_config.price_api_base_url,
        request_timeout,
    )?);
    let service = ConversionService::new(price_client);
    let router = Arc::new(CommandRouter::new(service, SessionStore::new()));
    let telegram = Arc::new(TelegramClient::new(
        &app_config.telegram_token,
        request_timeout,
    )?);

    let dispatcher = Dispatcher::new(telegram, router, app_config.poll_timeout_secs);
    dispatcher.run().await;
    Ok(())
}

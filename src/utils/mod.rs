use log::{info, LevelFilter};

/// Initializes logging: records go to stdout and to the configured log file,
/// timestamped, with noisy HTTP internals capped at warn.
pub fn setup_logging(log_file: &str, level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper", LevelFilter::Warn)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?)
        .apply()?;
    info!("Logging initialized.");
    Ok(())
}

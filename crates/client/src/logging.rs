use linkquote_core::config::LoggingConfig;
use linkquote_core::LogFormat;
use tracing::Level;

/// Install the global tracing subscriber from the logging section of the
/// configuration. Call once, before any client work.
pub fn init_logging(config: &LoggingConfig) {
    let log_level = config.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub mod config;
pub mod db;
pub mod screening;

pub use screening::ScreeningService;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Output goes to stderr so that
/// stdout stays free for JSON reports. A second call is a no-op.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("triage-screen starting v{}", config::APP_VERSION);
    }
}

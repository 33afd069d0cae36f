use std::path::PathBuf;

use crate::screening::provider::{DEFAULT_CATALOG_KEY, DEFAULT_MESSAGES_KEY};
use crate::screening::DEFAULT_THRESHOLD;

/// Application-level constants
pub const APP_NAME: &str = "triage-screen";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const THRESHOLD_ENV: &str = "TRIAGE_THRESHOLD";
pub const DB_PATH_ENV: &str = "TRIAGE_DB_PATH";

/// Per-user data directory for the screen (`<data dir>/triage-screen`).
/// `None` when the platform exposes neither a data nor a home directory.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|base| base.join(APP_NAME))
}

/// Suggested location of the screening database.
pub fn default_database_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("screen.db"))
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "triage_lib=info,triage_screen=info"
}

/// Runtime settings of the screening service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningConfig {
    pub threshold: u32,
    /// `None` means no store: built-in catalogs and no assessment log.
    pub database_path: Option<PathBuf>,
    pub catalog_key: String,
    pub messages_key: String,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            database_path: None,
            catalog_key: DEFAULT_CATALOG_KEY.to_string(),
            messages_key: DEFAULT_MESSAGES_KEY.to_string(),
        }
    }
}

impl ScreeningConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unusable values fall back
    /// to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(THRESHOLD_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(threshold) => config.threshold = threshold,
                Err(_) => tracing::warn!(
                    var = THRESHOLD_ENV,
                    value = %raw,
                    default = DEFAULT_THRESHOLD,
                    "Ignoring invalid threshold"
                ),
            }
        }

        config.database_path = lookup(DB_PATH_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        config
    }
}

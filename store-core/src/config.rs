use shared::Currency;
use std::str::FromStr;

/// Application configuration for the settlement core
///
/// # Environment variables
///
/// Every setting can be overridden through the environment (a `.env` file
/// is loaded first when present):
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | STORE_DB_PATH | ./store.redb | Settlement database file |
/// | STORE_CURRENCY | UAH | Currency orders settle in |
/// | STORE_LOG_LEVEL | info | Log verbosity |
/// | STORE_LOG_DIR | (unset) | Directory for rolling log files |
///
/// # Example
///
/// ```ignore
/// STORE_DB_PATH=/data/store.redb STORE_CURRENCY=EUR cargo run
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the redb database file
    pub db_path: String,
    /// Currency every order and top-up must settle in
    pub settlement_currency: Currency,
    /// Log verbosity: trace | debug | info | warn | error
    pub log_level: String,
    /// Directory for rolling log files; stdout-only when unset
    pub log_dir: Option<String>,
}

impl StoreConfig {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to their defaults; an unparseable
    /// `STORE_CURRENCY` falls back too rather than aborting startup.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            db_path: std::env::var("STORE_DB_PATH").unwrap_or_else(|_| "./store.redb".into()),
            settlement_currency: std::env::var("STORE_CURRENCY")
                .ok()
                .and_then(|c| Currency::from_str(&c).ok())
                .unwrap_or(Currency::Uah),
            log_level: std::env::var("STORE_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("STORE_LOG_DIR").ok(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

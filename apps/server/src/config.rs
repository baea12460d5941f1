use std::{net::SocketAddr, str::FromStr, time::Duration};

const DEFAULT_DB_PATH: &str = "./db/debtfolio.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// How balance observations reach the balance ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancePublishMode {
    /// Handed to a background worker; requests never wait on the ledger.
    Queued,
    /// Appended before the request returns.
    Inline,
}

impl FromStr for BalancePublishMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "queued" => Ok(BalancePublishMode::Queued),
            "inline" => Ok(BalancePublishMode::Inline),
            other => Err(format!("unknown balance publish mode '{}'", other)),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub balance_publish: BalancePublishMode,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr = parse_or_default(
            "DF_LISTEN_ADDR",
            std::env::var("DF_LISTEN_ADDR").ok(),
            || SocketAddr::from(([0, 0, 0, 0], 8080)),
        );
        let db_path = std::env::var("DF_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into());
        let cors_allow = std::env::var("DF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_or_default(
            "DF_REQUEST_TIMEOUT_MS",
            std::env::var("DF_REQUEST_TIMEOUT_MS").ok(),
            || DEFAULT_REQUEST_TIMEOUT_MS,
        );
        let balance_publish = parse_or_default(
            "DF_BALANCE_PUBLISH",
            std::env::var("DF_BALANCE_PUBLISH").ok(),
            || BalancePublishMode::Queued,
        );
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            balance_publish,
        }
    }
}

/// Parses an optional environment value, warning and falling back to the
/// default when it does not parse.
///
/// Runs before the tracing subscriber is installed, so warnings go to stderr.
fn parse_or_default<T, F>(key: &str, raw: Option<String>, default: F) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: FnOnce() -> T,
{
    match raw {
        None => default(),
        Some(value) => value.trim().parse().unwrap_or_else(|e| {
            eprintln!("warning: invalid {} '{}' ({}), using the default", key, value, e);
            default()
        }),
    }
}

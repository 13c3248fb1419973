use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AppError;

/// Signed video URLs are valid for exactly one hour.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

const DEFAULT_ACCESS_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SIGNING_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_SIGNING_RETRY_BACKOFF_MS: u64 = 200;

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::configuration(format!("{key} has an invalid value"))),
        Err(_) => Ok(default),
    }
}

/// Timeouts and disclosure policy for the lesson access resolver.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Upper bound on a whole resolution (lookups, policy, signing).
    pub request_timeout: Duration,
    /// Upper bound on a single signed-URL issuance attempt.
    pub signing_timeout: Duration,
    /// Pause before the one retry of a transient signing failure.
    pub signing_retry_backoff: Duration,
    /// Report denied lessons as missing so their existence is not revealed.
    pub conceal_forbidden: bool,
    pub signed_url_ttl: Duration,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(DEFAULT_ACCESS_TIMEOUT_MS),
            signing_timeout: Duration::from_millis(DEFAULT_SIGNING_TIMEOUT_MS),
            signing_retry_backoff: Duration::from_millis(DEFAULT_SIGNING_RETRY_BACKOFF_MS),
            conceal_forbidden: false,
            signed_url_ttl: SIGNED_URL_TTL,
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            request_timeout: Duration::from_millis(env_or("ACCESS_TIMEOUT_MS", DEFAULT_ACCESS_TIMEOUT_MS)?),
            signing_timeout: Duration::from_millis(env_or("SIGNING_TIMEOUT_MS", DEFAULT_SIGNING_TIMEOUT_MS)?),
            signing_retry_backoff: Duration::from_millis(env_or(
                "SIGNING_RETRY_BACKOFF_MS",
                DEFAULT_SIGNING_RETRY_BACKOFF_MS,
            )?),
            conceal_forbidden: env_or("ACCESS_CONCEAL_FORBIDDEN", false)?,
            signed_url_ttl: SIGNED_URL_TTL,
        })
    }
}

/// Where video objects live and how links to them are minted.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub public_url: String,
    pub signing_secret: Vec<u8>,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let root = std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "./storage".to_string());
        let public_url = std::env::var("STORAGE_PUBLIC_URL").unwrap_or_else(|_| {
            let port = std::env::var("APP_PORT").unwrap_or_else(|_| "8000".to_string());
            format!("http://localhost:{port}")
        });
        let signing_secret = std::env::var("STORAGE_SIGNING_SECRET")
            .or_else(|_| std::env::var("JWT_SECRET"))
            .map_err(|_| AppError::configuration("STORAGE_SIGNING_SECRET or JWT_SECRET must be set"))?;

        Ok(Self {
            root: PathBuf::from(root),
            public_url: public_url.trim_end_matches('/').to_string(),
            signing_secret: signing_secret.into_bytes(),
        })
    }
}

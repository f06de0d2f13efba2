//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_QUEUE_MAX_ATTEMPTS,
    DEFAULT_QUEUE_RETRY_DELAY_SECONDS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub storage_endpoint: String,
    pub storage_region: String,
    pub storage_bucket: String,
    storage_access_key: String,
    storage_secret_key: String,
    pub mail_from: String,
    pub mail_reply_to: String,
    pub queue_max_attempts: u32,
    pub queue_retry_delay_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("storage_endpoint", &self.storage_endpoint)
            .field("storage_region", &self.storage_region)
            .field("storage_bucket", &self.storage_bucket)
            .field("storage_access_key", &"[REDACTED]")
            .field("storage_secret_key", &"[REDACTED]")
            .field("mail_from", &self.mail_from)
            .field("mail_reply_to", &self.mail_reply_to)
            .field("queue_max_attempts", &self.queue_max_attempts)
            .field("queue_retry_delay_seconds", &self.queue_retry_delay_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics when a required value is missing or invalid (JWT secret,
    /// storage bucket, mail sender) so the process refuses to start in
    /// a broken state.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let storage_bucket = required_or_dev_default("STORAGE_BUCKET", "givehub-dev");
        let mail_from = required_or_dev_default("MAIL_FROM", "noreply@givehub.local");

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: redis_url_from_env(),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            storage_endpoint: env::var("STORAGE_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            storage_region: env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            storage_bucket,
            storage_access_key: env::var("STORAGE_ACCESS_KEY_ID").unwrap_or_default(),
            storage_secret_key: env::var("STORAGE_SECRET_ACCESS_KEY").unwrap_or_default(),
            mail_reply_to: env::var("MAIL_REPLY_TO").unwrap_or_else(|_| mail_from.clone()),
            mail_from,
            queue_max_attempts: parse_or_panic("QUEUE_MAX_ATTEMPTS", DEFAULT_QUEUE_MAX_ATTEMPTS),
            queue_retry_delay_seconds: parse_or_panic(
                "QUEUE_RETRY_DELAY_SECONDS",
                DEFAULT_QUEUE_RETRY_DELAY_SECONDS,
            ),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get object storage credentials as (access key, secret key).
    pub fn storage_credentials(&self) -> (&str, &str) {
        (&self.storage_access_key, &self.storage_secret_key)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Read a value that must be present in production; development builds
/// fall back to a default with a warning.
fn required_or_dev_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            tracing::warn!("{} not set, using development default", key);
            default.to_string()
        } else {
            panic!("{} environment variable must be set in production", key);
        }
    })
}

/// Parse a numeric variable, refusing to start on garbage values.
fn parse_or_panic<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a valid number, got {:?}", key, raw)),
        Err(_) => default,
    }
}

/// Build the Redis URL, either verbatim from REDIS_URL or composed from
/// REDIS_HOST / REDIS_PORT / REDIS_PASSWORD parts.
fn redis_url_from_env() -> String {
    if let Ok(url) = env::var("REDIS_URL") {
        return url;
    }

    match env::var("REDIS_HOST") {
        Ok(host) => {
            let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
            match env::var("REDIS_PASSWORD") {
                Ok(password) if !password.is_empty() => {
                    format!("redis://:{}@{}:{}", password, host, port)
                }
                _ => format!("redis://{}:{}", host, port),
            }
        }
        Err(_) => DEFAULT_REDIS_URL.to_string(),
    }
}

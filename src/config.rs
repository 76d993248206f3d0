/*
 * Responsibility
 * - Load settings from the environment (.env honoured): address, database, CORS, JWT
 * - Validate them up front (startup fails on anything missing or invalid)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::services::auth::jwt::MIN_SECRET_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,
    pub cors_allowed_origins: Vec<String>,

    // HMAC key, already base64-decoded
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl_seconds: u64,
    // carried for the refresh flow; not issued by this service
    pub refresh_token_ttl_seconds: u64,

    pub user_lookup_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material or credentials in the database URL
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .field("user_lookup_timeout", &self.user_lookup_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = decode_secret(
            &std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?,
        )?;

        let access_token_ttl_seconds = parse_or("ACCESS_TOKEN_TTL_SECONDS", 3600)?;
        if access_token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
        }
        let refresh_token_ttl_seconds = parse_or("REFRESH_TOKEN_TTL_SECONDS", 1_209_600)?; // 14 days

        let user_lookup_timeout =
            Duration::from_millis(parse_or("USER_LOOKUP_TIMEOUT_MS", 2000)?);
        let request_timeout = Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECONDS", 30)?);

        Ok(Self {
            addr,
            app_env,
            database_url,
            cors_allowed_origins,
            jwt_secret,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            user_lookup_timeout,
            request_timeout,
        })
    }
}

/// Unset falls back to `default`; set-but-unparsable is an error.
fn parse_or(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

fn decode_secret(raw: &str) -> Result<Vec<u8>, ConfigError> {
    let bytes = STANDARD
        .decode(raw.trim())
        .map_err(|_| ConfigError::Invalid("JWT_SECRET"))?;

    if bytes.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid("JWT_SECRET"));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_must_be_base64_and_long_enough() {
        let ok = STANDARD.encode([7u8; 32]);
        assert_eq!(decode_secret(&ok).unwrap().len(), 32);

        let short = STANDARD.encode([7u8; 16]);
        assert!(matches!(
            decode_secret(&short),
            Err(ConfigError::Invalid("JWT_SECRET"))
        ));
        assert!(decode_secret("not base64!").is_err());
    }

    #[test]
    fn config_error_messages_name_the_key() {
        assert_eq!(
            ConfigError::Missing("JWT_SECRET").to_string(),
            "missing configuration: JWT_SECRET"
        );
    }
}

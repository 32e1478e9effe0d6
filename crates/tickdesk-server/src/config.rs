//! Server configuration from environment variables.
//!
//! `.env` loading happens in `main` (via `dotenvy`) before this module
//! reads anything.

use std::env;

use thiserror::Error;
use tickdesk_auth::AuthConfig;
use tickdesk_db::DbConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:5000`.
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Build the configuration from `TICKDESK_*` environment variables.
    ///
    /// The JWT key pair is required; everything else has a development
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            env::var("TICKDESK_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());

        let mut db = DbConfig::default();
        if let Ok(url) = env::var("TICKDESK_DB_URL") {
            db.url = url;
        }
        if let Ok(ns) = env::var("TICKDESK_DB_NAMESPACE") {
            db.namespace = ns;
        }
        if let Ok(name) = env::var("TICKDESK_DB_NAME") {
            db.database = name;
        }
        db.username = env::var("TICKDESK_DB_USER").ok();
        db.password = env::var("TICKDESK_DB_PASS").ok();

        let mut auth = AuthConfig {
            jwt_private_key_pem: env::var("TICKDESK_JWT_PRIVATE_KEY")
                .map_err(|_| ConfigError::Missing("TICKDESK_JWT_PRIVATE_KEY"))?,
            jwt_public_key_pem: env::var("TICKDESK_JWT_PUBLIC_KEY")
                .map_err(|_| ConfigError::Missing("TICKDESK_JWT_PUBLIC_KEY"))?,
            ..AuthConfig::default()
        };
        if let Ok(issuer) = env::var("TICKDESK_JWT_ISSUER") {
            auth.jwt_issuer = issuer;
        }
        if let Ok(raw) = env::var("TICKDESK_TOKEN_LIFETIME_SECS") {
            auth.access_token_lifetime_secs =
                raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "TICKDESK_TOKEN_LIFETIME_SECS",
                    reason: format!("not a number: {raw}"),
                })?;
        }
        auth.pepper = env::var("TICKDESK_PASSWORD_PEPPER").ok();

        Ok(Self {
            bind_addr,
            db,
            auth,
        })
    }
}

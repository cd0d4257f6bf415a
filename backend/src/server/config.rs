//! Application settings loaded via OrthoConfig.
//!
//! Values come from `TASKS_*` environment variables, CLI flags or a config
//! file. [`AppSettings::validate`] turns the raw layer into
//! [`ServerSettings`], which the rest of startup consumes.

use std::fmt;
use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use taskboard::domain::{Credentials, CredentialsValidationError};
use taskboard::outbound::security::MIN_SECRET_LENGTH;
use thiserror::Error;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_JWT_ISSUER: &str = "task-management";
const DEFAULT_JWT_TTL_MINUTES: u32 = 60;

const REDACTED: &str = "<redacted>";

/// Raw configuration layer.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound for pooled connections.
    pub db_max_connections: Option<u32>,
    /// HS256 signing secret; at least 32 bytes.
    pub jwt_secret: Option<String>,
    /// `iss` claim written to and required from tokens.
    pub jwt_issuer: Option<String>,
    /// Token lifetime in minutes.
    pub jwt_ttl_minutes: Option<u32>,
    /// Apply embedded migrations on startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Administrator account created on startup when absent.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| REDACTED))
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_ttl_minutes", &self.jwt_ttl_minutes)
            .field("run_migrations", &self.run_migrations)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Reasons settings cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    #[error("database_url is required")]
    MissingDatabaseUrl,
    #[error("jwt_secret is required")]
    MissingJwtSecret,
    #[error("jwt_secret must be at least {min} bytes")]
    JwtSecretTooShort { min: usize },
    #[error("jwt_ttl_minutes must be greater than zero")]
    InvalidTokenLifetime,
    #[error("bind_addr '{value}' is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("admin_username and admin_password must be set together")]
    IncompleteAdmin,
    #[error("admin credentials are invalid: {0}")]
    InvalidAdmin(#[from] CredentialsValidationError),
}

/// Validated settings used to wire the server.
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: Zeroizing<String>,
    pub jwt_issuer: String,
    pub jwt_ttl: Duration,
    pub run_migrations: bool,
    pub admin: Option<Credentials>,
}

impl AppSettings {
    /// Load from process arguments and environment.
    pub fn load_settings() -> Result<Self, SettingsError> {
        Self::load().map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Check required values and apply defaults.
    pub fn validate(self) -> Result<ServerSettings, SettingsError> {
        let bind_value = self
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|_| SettingsError::InvalidBindAddr { value: bind_value })?;

        let database_url = self
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;

        let jwt_secret = Zeroizing::new(self.jwt_secret.ok_or(SettingsError::MissingJwtSecret)?);
        if jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(SettingsError::JwtSecretTooShort {
                min: MIN_SECRET_LENGTH,
            });
        }

        let ttl_minutes = self.jwt_ttl_minutes.unwrap_or(DEFAULT_JWT_TTL_MINUTES);
        if ttl_minutes == 0 {
            return Err(SettingsError::InvalidTokenLifetime);
        }

        let admin = match (self.admin_username, self.admin_password) {
            (Some(username), Some(password)) => {
                Some(Credentials::try_from_parts(&username, &password)?)
            }
            (None, None) => None,
            _ => return Err(SettingsError::IncompleteAdmin),
        };

        Ok(ServerSettings {
            bind_addr,
            database_url,
            db_max_connections: self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            jwt_secret,
            jwt_issuer: self
                .jwt_issuer
                .unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_owned()),
            jwt_ttl: Duration::minutes(i64::from(ttl_minutes)),
            run_migrations: self.run_migrations,
            admin,
        })
    }
}

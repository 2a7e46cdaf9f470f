use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid issuer URL: {0}")]
    InvalidIssuer(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Expected `iss` claim, e.g. "https://dev-xyz.us.auth0.com/"
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Where the identity provider publishes its signing key set
    pub jwks: JwksSource,
    /// Claim key holding the permission scope array
    pub permissions_claim: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JwksSource {
    Url(String),
    File(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        };

        config.database.url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let issuer = env::var("AUTH_ISSUER").map_err(|_| ConfigError::MissingVar("AUTH_ISSUER"))?;
        config.auth.audience =
            env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::MissingVar("AUTH_AUDIENCE"))?;
        config.auth.jwks = if let Ok(path) = env::var("AUTH_JWKS_FILE") {
            JwksSource::File(path)
        } else if let Ok(url) = env::var("AUTH_JWKS_URL") {
            JwksSource::Url(url)
        } else {
            JwksSource::Url(derive_jwks_url(&issuer)?)
        };
        config.auth.issuer = issuer;

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env::var("BARISTA_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        if let Ok(v) = env::var("AUTH_PERMISSIONS_CLAIM") {
            self.auth.permissions_claim = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            auth: AuthConfig {
                issuer: String::new(),
                audience: String::new(),
                jwks: JwksSource::Url(String::new()),
                permissions_claim: "permissions".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            auth: AuthConfig {
                issuer: String::new(),
                audience: String::new(),
                jwks: JwksSource::Url(String::new()),
                permissions_claim: "permissions".to_string(),
            },
        }
    }
}

impl DatabaseConfig {
    /// Standalone database config for operator tooling that does not need
    /// the auth section.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let mut config = DatabaseConfig {
            url,
            max_connections: 10,
            connect_timeout_secs: 30,
        };
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = v.parse().unwrap_or(config.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout_secs = v.parse().unwrap_or(config.connect_timeout_secs);
        }
        Ok(config)
    }
}

/// Identity providers publish their key set under a well-known path
/// relative to the issuer.
fn derive_jwks_url(issuer: &str) -> Result<String, ConfigError> {
    let mut base = issuer.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = url::Url::parse(&base)
        .and_then(|u| u.join(".well-known/jwks.json"))
        .map_err(|_| ConfigError::InvalidIssuer(issuer.to_string()))?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.permissions_claim, "permissions");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.connect_timeout_secs, 5);
    }

    #[test]
    fn test_jwks_url_derivation() {
        assert_eq!(
            derive_jwks_url("https://dev-xyz.us.auth0.com/").unwrap(),
            "https://dev-xyz.us.auth0.com/.well-known/jwks.json"
        );
        // Trailing slash is optional on the issuer
        assert_eq!(
            derive_jwks_url("https://dev-xyz.us.auth0.com").unwrap(),
            "https://dev-xyz.us.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_jwks_url_rejects_garbage() {
        assert!(derive_jwks_url("not a url").is_err());
    }
}

//! API server configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Minimum required length for JWT_SECRET to be considered secure
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "" => Ok(Environment::Development),
            other => bail!("unknown environment: {other}"),
        }
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment
    pub environment: Environment,

    /// Server port (default: 3003)
    pub port: u16,

    /// MongoDB connection URL
    pub mongo_url: String,

    /// MongoDB database name
    pub mongo_database: String,

    /// JWT secret for bearer token signing/verification
    pub jwt_secret: String,

    /// JWT token TTL in seconds (default: 7 days)
    pub token_ttl_secs: i64,

    /// GitHub OAuth client ID (optional; login disabled for GitHub without it)
    pub github_client_id: Option<String>,

    /// GitHub OAuth client secret
    pub github_client_secret: Option<String>,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode `JWT_SECRET` must be set and at least 32 characters
    /// long; development falls back to an insecure default for convenience.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        )
        .context("Invalid ENVIRONMENT value")?;

        let jwt_secret = Self::load_jwt_secret(environment.is_production())?;

        Ok(Self {
            environment,

            port: env::var("PORT")
                .unwrap_or_else(|_| "3003".to_string())
                .parse()
                .context("Invalid PORT value")?,

            mongo_url: env::var("MONGO_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),

            mongo_database: env::var("MONGO_DATABASE").unwrap_or_else(|_| "linkstash".to_string()),

            jwt_secret,

            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| (7 * 24 * 3600).to_string())
                .parse()
                .context("Invalid TOKEN_TTL_SECS value")?,

            github_client_id: env::var("GITHUB_CLIENT_ID").ok().filter(|s| !s.is_empty()),

            github_client_secret: env::var("GITHUB_CLIENT_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    fn load_jwt_secret(is_production: bool) -> Result<String> {
        match env::var("JWT_SECRET") {
            Ok(secret) => {
                if is_production && secret.len() < MIN_JWT_SECRET_LENGTH {
                    bail!(
                        "JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} characters in production"
                    );
                }
                Ok(secret)
            }
            Err(_) if is_production => {
                bail!("JWT_SECRET must be set in production")
            }
            Err(_) => Ok("linkstash-development-secret-do-not-use".to_string()),
        }
    }
}

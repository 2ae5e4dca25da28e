use std::env;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The secret used to sign session tokens.
    pub jwt_secret: Zeroizing<String>,
    /// The lifetime of an issued session token, in seconds.
    pub token_ttl_secs: i64,
    /// The SMTP endpoint for outbound mail. When unset, mail is logged
    /// instead of delivered.
    pub smtp_url: Option<String>,
    /// The sender address for outbound mail.
    pub mail_from: String,
    /// The operator address notified of each registration.
    pub admin_email: String,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .context("JWT_SECRET must be set (generate with: openssl rand -hex 32)")?;

        // An empty secret makes every issued token forgeable. Refuse to
        // start rather than surface this per-request.
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            jwt_secret: Zeroizing::new(jwt_secret),
            token_ttl_secs: env::var("TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("Invalid TOKEN_TTL_SECS")?,
            smtp_url: env::var("SMTP_URL").ok(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@site.local".to_string()),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@site.local".to_string()),
        })
    }
}

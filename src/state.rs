use deadpool_postgres::Pool;
use crate::config::Config;
use crate::error::Result;
use crate::services::mailer::Mailer;
use crate::services::token::TokenIssuer;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: Pool,
    /// The outbound mailer.
    pub mailer: Mailer,
    /// The session-token issuer.
    pub tokens: TokenIssuer,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url)?;
        tracing::info!("✅ PostgreSQL pool initialized with deadpool-postgres");

        let mailer = Mailer::from_config(config)?;
        if config.smtp_url.is_some() {
            tracing::info!("✅ Mailer initialized with SMTP transport");
        } else {
            tracing::warn!("⚠️ SMTP_URL not set; outbound mail will be logged only");
        }

        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs)?;
        tracing::info!("✅ Token issuer initialized (TTL {}s)", config.token_ttl_secs);

        Ok(AppState {
            db,
            mailer,
            tokens,
            config: config.clone(),
        })
    }
}

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means the in-memory document store is used.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub telegraph_api_url: String,
    pub publish_timeout: Duration,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: 10,
            telegraph_api_url: "https://api.telegra.ph".to_string(),
            publish_timeout: Duration::from_secs(15),
            port: 3000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            telegraph_api_url: env::var("TELEGRAPH_API_URL")
                .unwrap_or_else(|_| "https://api.telegra.ph".to_string()),
            publish_timeout: Duration::from_secs(
                env::var("PUBLISH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()?,
            ),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
        })
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub cookie_max_age_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub identity: IdentityConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let identity = IdentityConfig {
            cookie_max_age_days: std::env::var("IDENTITY_COOKIE_MAX_AGE_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        Ok(Self {
            database_url,
            identity,
        })
    }
}

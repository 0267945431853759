use std::env;

use crate::pricing::Locale;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub default_locale: Locale,
    pub seed_demo: bool,
    pub profile: String,
}

impl Config {
    /// Read settings from the environment; `profile` takes precedence over `PROFILE`.
    pub fn for_profile(profile: Option<String>) -> Self {
        let profile = profile
            .or_else(|| env::var("PROFILE").ok())
            .unwrap_or_else(|| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://souq.db?mode=rwc".to_string()
            } else {
                format!("sqlite://souq_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            default_locale: env::var("DEFAULT_LOCALE")
                .map(|code| Locale::from_code(&code))
                .unwrap_or_default(),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
            profile,
        }
    }
}

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        // Empty list means any origin, matching the original wide-open CORS.
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            port,
            cors_allowed_origins,
        })
    }
}

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Recommendation list size when a request omits `limit`
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Multiplier applied to genre terms when building feature vectors.
    /// Must be greater than 1 so exact genre overlap outweighs overview text.
    #[serde(default = "default_genre_boost")]
    pub genre_boost: f32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_limit() -> usize {
    12
}

fn default_genre_boost() -> f32 {
    2.0
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config =
            envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.genre_boost.is_finite() || self.genre_boost <= 1.0 {
            anyhow::bail!(
                "GENRE_BOOST must be a finite value greater than 1 (got {})",
                self.genre_boost
            );
        }
        if self.default_limit == 0 {
            anyhow::bail!("DEFAULT_LIMIT must be at least 1");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_limit: default_limit(),
            genre_boost: default_genre_boost(),
        }
    }
}

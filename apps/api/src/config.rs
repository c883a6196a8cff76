use anyhow::{ensure, Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LINE_WIDTH: usize = 80;
const DEFAULT_DAILY_WORD_LIMIT: u64 = 80_000;
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on values that do not parse or are zero.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Target width, in characters, of every justified line.
    pub line_width: usize,
    /// Words each token may submit per UTC day.
    pub daily_word_limit: u64,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            line_width: DEFAULT_LINE_WIDTH,
            daily_word_limit: DEFAULT_DAILY_WORD_LIMIT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let config = Config {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            line_width: parse_var(&lookup, "LINE_WIDTH", defaults.line_width)?,
            daily_word_limit: parse_var(&lookup, "DAILY_WORD_LIMIT", defaults.daily_word_limit)?,
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        };

        ensure!(config.line_width > 0, "LINE_WIDTH must be at least 1");
        ensure!(config.daily_word_limit > 0, "DAILY_WORD_LIMIT must be at least 1");
        ensure!(config.max_body_bytes > 0, "MAX_BODY_BYTES must be at least 1");

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

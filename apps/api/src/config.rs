use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::matching::policy::{GapPolicy, MatchingConfig, ScoringPolicy};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub fetch_timeout_ms: u64,
    pub default_limit: usize,
    pub max_limit: usize,
    pub default_min_score: f64,
    pub underleveled_max_value: f64,
    pub underleveled_min_importance: f64,
    pub preferred_in_denominator: bool,
    pub reject_degenerate: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            fetch_timeout_ms: env_or("MATCH_FETCH_TIMEOUT_MS", 5_000)?,
            default_limit: env_or("MATCH_DEFAULT_LIMIT", 50)?,
            max_limit: env_or("MATCH_MAX_LIMIT", 500)?,
            default_min_score: env_or("MATCH_DEFAULT_MIN_SCORE", 0.3)?,
            underleveled_max_value: env_or("MATCH_UNDERLEVELED_MAX_VALUE", 0.5)?,
            underleveled_min_importance: env_or("MATCH_UNDERLEVELED_MIN_IMPORTANCE", 0.5)?,
            preferred_in_denominator: env_or("MATCH_PREFERRED_IN_DENOMINATOR", true)?,
            reject_degenerate: env_or("MATCH_REJECT_DEGENERATE", false)?,
        };
        config.check()?;
        Ok(config)
    }

    /// Engine configuration handed to the orchestrator at construction.
    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            scoring: ScoringPolicy {
                preferred_in_denominator: self.preferred_in_denominator,
            },
            gap: GapPolicy {
                max_skill_value: self.underleveled_max_value,
                min_importance: self.underleveled_min_importance,
            },
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            default_limit: self.default_limit,
            max_limit: self.max_limit,
            default_min_score: self.default_min_score,
            reject_degenerate: self.reject_degenerate,
        }
    }

    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.default_limit >= 1 && self.default_limit <= self.max_limit,
            "MATCH_DEFAULT_LIMIT must be between 1 and MATCH_MAX_LIMIT ({})",
            self.max_limit
        );
        anyhow::ensure!(
            self.default_min_score.is_finite() && self.default_min_score >= 0.0,
            "MATCH_DEFAULT_MIN_SCORE must be a non-negative number"
        );
        anyhow::ensure!(
            self.underleveled_max_value.is_finite() && self.underleveled_max_value > 0.0,
            "MATCH_UNDERLEVELED_MAX_VALUE must be positive"
        );
        anyhow::ensure!(
            self.underleveled_min_importance > 0.0 && self.underleveled_min_importance <= 1.0,
            "MATCH_UNDERLEVELED_MIN_IMPORTANCE must be in (0, 1]"
        );
        anyhow::ensure!(self.fetch_timeout_ms > 0, "MATCH_FETCH_TIMEOUT_MS must be > 0");
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

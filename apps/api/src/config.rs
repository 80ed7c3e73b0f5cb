use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; values that fail to parse abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_resume_size_mb: usize,
    pub max_candidates: usize,
    pub email: EmailConfig,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub enabled: bool,
    /// Log the composed message instead of delivering it.
    pub simulation_mode: bool,
    pub sender: String,
    pub recipient: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_resume_size_mb: parse_or(&lookup, "MAX_RESUME_SIZE_MB", 10)?,
            max_candidates: parse_or(&lookup, "MAX_CANDIDATES", 100)?,
            email: EmailConfig {
                enabled: parse_or(&lookup, "EMAIL_NOTIFICATIONS", false)?,
                simulation_mode: parse_or(&lookup, "EMAIL_SIMULATION_MODE", true)?,
                sender: lookup("EMAIL_SENDER")
                    .unwrap_or_else(|| "screening-agent@localhost".to_string()),
                recipient: lookup("EMAIL_RECIPIENT")
                    .unwrap_or_else(|| "hr-team@localhost".to_string()),
            },
        })
    }

    pub fn max_resume_bytes(&self) -> usize {
        self.max_resume_size_mb.saturating_mul(1024 * 1024)
    }

    /// Upper bound for a whole request body: every document at the size limit,
    /// plus 1 MiB for the job description and multipart framing.
    pub fn max_request_bytes(&self) -> usize {
        self.max_resume_bytes()
            .saturating_mul(self.max_candidates)
            .saturating_add(1024 * 1024)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

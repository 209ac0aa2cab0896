use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("missing environment variable {0}")]
pub struct MissingVar(pub &'static str);

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub coordinator_username: String,
    pub coordinator_password: String,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `"OD Automation System <od@example.edu>"`.
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, MissingVar> {
        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_owned()),
            database_url: var("DATABASE_URL")?,
            coordinator_username: var("COORDINATOR_USERNAME")?,
            coordinator_password: var("COORDINATOR_PASSWORD")?,
            smtp: SmtpConfig {
                host: var("SMTP_HOST")?,
                username: var("SMTP_USERNAME")?,
                password: var("SMTP_PASSWORD")?,
                from: var("SMTP_FROM")?,
            },
        })
    }
}

fn var(name: &'static str) -> Result<String, MissingVar> {
    env::var(name).map_err(|_| MissingVar(name))
}

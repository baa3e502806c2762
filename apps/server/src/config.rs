use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use rust_decimal::Decimal;
use wallet_ai::DEFAULT_CHAT_MODEL;
use wallet_core::constants::DEFAULT_MONTHLY_GOAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub default_monthly_goal: Decimal,
    pub log_format: LogFormat,
    pub openrouter_api_key: Option<String>,
    pub chat_model: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen = get("WALLET_LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into());
        let listen_addr = SocketAddr::from_str(&listen)
            .with_context(|| format!("Invalid WALLET_LISTEN_ADDR '{}'", listen))?;

        let db_path = get("WALLET_DB_PATH").unwrap_or_else(|| "./db/wallet.db".into());

        let cors_allow = get("WALLET_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_ms = match get("WALLET_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid WALLET_REQUEST_TIMEOUT_MS '{}'", raw))?,
            None => 30_000,
        };

        let default_monthly_goal = match get("WALLET_DEFAULT_MONTHLY_GOAL") {
            Some(raw) => {
                let goal = Decimal::from_str(raw.trim())
                    .with_context(|| format!("Invalid WALLET_DEFAULT_MONTHLY_GOAL '{}'", raw))?;
                anyhow::ensure!(
                    goal > Decimal::ZERO,
                    "WALLET_DEFAULT_MONTHLY_GOAL must be positive"
                );
                goal
            }
            None => DEFAULT_MONTHLY_GOAL,
        };

        let log_format = match get("WALLET_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            default_monthly_goal,
            log_format,
            openrouter_api_key: get("OPENROUTER_API_KEY").map(|k| k.trim().to_string()),
            chat_model: get("WALLET_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.into()),
        })
    }
}

// Runtime configuration for the ingestion pipeline:
// - Upstream GraphQL endpoint, network and API key list
// - Database connection string
// - Crawl page size/offset and time window
// - Cycle budget, inter-cycle period, retry policy

use chrono::{DateTime, Utc};
use dotenv::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BITQUERY_API_KEYS must contain at least one key")]
    NoApiKeys,

    #[error("invalid {name}: {value}")]
    InvalidTimestamp { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub endpoint_url: String,
    pub network: String,
    pub api_keys: Vec<String>,
    pub page_limit: i64,
    pub page_offset: i64,
    pub from_time: DateTime<Utc>,
    pub till_time: DateTime<Utc>,
    pub iterations: u32,
    pub cycle_period: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ledger.db".to_string());
        let endpoint_url = env::var("BITQUERY_URL")
            .unwrap_or_else(|_| "https://graphql.bitquery.io".to_string());
        let network = env::var("NETWORK").unwrap_or_else(|_| "bitcoin".to_string());

        let api_keys: Vec<String> = env::var("BITQUERY_API_KEYS")
            .unwrap_or_default()
            .split(',')
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();
        if api_keys.is_empty() {
            return Err(ConfigError::NoApiKeys);
        }

        let page_limit = env::var("PAGE_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);
        let page_offset = env::var("PAGE_OFFSET")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .unwrap_or(0);

        let from_time = parse_bound("FROM_TIME", "2025-01-02T00:00:00Z")?;
        let till_time = parse_bound("TILL_TIME", "2025-01-10T23:59:59Z")?;

        let iterations = env::var("ITERATIONS")
            .unwrap_or_else(|_| "61".to_string())
            .parse()
            .unwrap_or(61);
        let cycle_period = env::var("CYCLE_PERIOD_SECS")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(600));
        let max_attempts = env::var("MAX_ATTEMPTS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let retry_delay = env::var("RETRY_DELAY_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            database_url,
            endpoint_url,
            network,
            api_keys,
            page_limit,
            page_offset,
            from_time,
            till_time,
            iterations,
            cycle_period,
            max_attempts,
            retry_delay,
            http_timeout,
        })
    }
}

fn parse_bound(name: &'static str, default: &str) -> Result<DateTime<Utc>, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    DateTime::parse_from_rfc3339(&value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| ConfigError::InvalidTimestamp { name, value })
}

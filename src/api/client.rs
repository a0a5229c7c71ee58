use crate::api::credentials::CredentialRotator;
use crate::config::Config;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("all API credentials exhausted")]
    CredentialsExhausted,

    #[error("no response from upstream after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}

/// Delay observed between attempts. Flat regardless of the attempt number.
pub fn backoff_delay(_attempt: u32, base: Duration) -> Duration {
    base
}

/// Upstream query client, and the owner of all mutable pipeline state:
/// the credential rotator and the successful-request counter.
///
/// One logical query is up to `max_attempts` HTTP attempts. Quota rejections
/// rotate the credential; every other failure is logged and retried after a
/// fixed delay.
pub struct ApiClient {
    http: reqwest::Client,
    endpoint_url: String,
    rotator: CredentialRotator,
    max_attempts: u32,
    retry_delay: Duration,
    request_count: u64,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        info!(endpoint = %config.endpoint_url, keys = config.api_keys.len(),
              "initializing API client");

        Ok(Self {
            http,
            endpoint_url: config.endpoint_url.clone(),
            rotator: CredentialRotator::new(config.api_keys.clone()),
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay,
            request_count: 0,
        })
    }

    /// Total queries that completed with a success status.
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Execute one GraphQL query with bounded retries.
    ///
    /// Returns the parsed response body on success. `CredentialsExhausted`
    /// means a quota rejection arrived with no key left to rotate to and the
    /// loop aborted without burning the remaining attempts.
    pub async fn execute(&mut self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let body = json!({ "query": query, "variables": variables });

        for attempt in 1..=self.max_attempts {
            let response = self
                .http
                .post(&self.endpoint_url)
                .header("X-API-KEY", self.rotator.current())
                .json(&body)
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => match resp.json::<Value>().await {
                    Ok(parsed) => {
                        self.request_count += 1;
                        debug!(attempt, "query succeeded");
                        return Ok(parsed);
                    }
                    Err(e) => {
                        error!(attempt, error = %e, "failed to parse response body");
                    }
                },
                Ok(resp) if resp.status() == StatusCode::PAYMENT_REQUIRED => {
                    warn!(attempt, "request quota exhausted, rotating API key");
                    if !self.rotator.advance() {
                        return Err(ApiError::CredentialsExhausted);
                    }
                }
                Ok(resp) => {
                    let status = resp.status();
                    let text = resp.text().await.unwrap_or_default();
                    error!(attempt, %status, body = %text, "request failed");
                }
                Err(e) => {
                    error!(attempt, error = %e, "connection error");
                }
            }

            if attempt < self.max_attempts {
                let delay = backoff_delay(attempt, self.retry_delay);
                info!(attempt, delay_secs = delay.as_secs(), "attempt failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        error!(attempts = self.max_attempts, "maximum attempts exhausted");
        Err(ApiError::AttemptsExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: &str, keys: &[&str], max_attempts: u32) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            endpoint_url: endpoint.to_string(),
            network: "bitcoin".to_string(),
            api_keys: keys.iter().map(|k| k.to_string()).collect(),
            page_limit: 100,
            page_offset: 0,
            from_time: Utc::now(),
            till_time: Utc::now(),
            iterations: 1,
            cycle_period: Duration::ZERO,
            max_attempts,
            // Zero delay keeps the retry tests fast; the schedule itself is
            // covered by the backoff_delay test.
            retry_delay: Duration::ZERO,
            http_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn backoff_delay_is_flat() {
        let base = Duration::from_secs(5);
        assert_eq!(backoff_delay(1, base), base);
        assert_eq!(backoff_delay(9, base), base);
    }

    #[tokio::test]
    async fn returns_body_and_counts_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-API-KEY", "key-a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
            .mount(&server)
            .await;

        let mut client = ApiClient::new(&test_config(&server.uri(), &["key-a"], 10)).unwrap();
        let body = client.execute("query {}", json!({})).await.unwrap();

        assert_eq!(body["data"]["ok"], json!(true));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_up_to_the_budget() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let mut client = ApiClient::new(&test_config(&server.uri(), &["key-a"], 3)).unwrap();
        let err = client.execute("query {}", json!({})).await.unwrap_err();

        assert!(matches!(err, ApiError::AttemptsExhausted { attempts: 3 }));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn rotates_key_on_quota_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-API-KEY", "key-a"))
            .respond_with(ResponseTemplate::new(402))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("X-API-KEY", "key-b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let mut client = ApiClient::new(&test_config(&server.uri(), &["key-a", "key-b"], 10)).unwrap();
        let body = client.execute("query {}", json!({})).await.unwrap();

        assert_eq!(body["data"], json!({}));
    }

    #[tokio::test]
    async fn exhausting_every_key_is_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(402))
            // One rejection per key: the rotation happens key_count - 1
            // times, then the loop aborts without retrying further.
            .expect(3)
            .mount(&server)
            .await;

        let config = test_config(&server.uri(), &["key-a", "key-b", "key-c"], 10);
        let mut client = ApiClient::new(&config).unwrap();
        let err = client.execute("query {}", json!({})).await.unwrap_err();

        assert!(matches!(err, ApiError::CredentialsExhausted));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn unparseable_success_body_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(2)
            .mount(&server)
            .await;

        let mut client = ApiClient::new(&test_config(&server.uri(), &["key-a"], 2)).unwrap();
        let err = client.execute("query {}", json!({})).await.unwrap_err();

        assert!(matches!(err, ApiError::AttemptsExhausted { attempts: 2 }));
    }
}

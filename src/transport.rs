//! Retrying HTTP transport shared by the Datadis and InfluxDB clients.
//!
//! Every request goes through [`RetryingClient::execute`], which replays the
//! buffered request when the previous attempt failed before producing a
//! response or came back with a transient server error.

use crate::config::HttpConfig;
use crate::error::TransportError;
use reqwest::{Client as HttpClient, Method, Request, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::sleep;

/// Statuses worth another attempt. Everything else, 4xx included, is final.
const RETRYABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Retry budget and backoff schedule.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each following one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt + 1`, i.e. `base * 2^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Whether an attempt's outcome is transient.
pub fn should_retry(outcome: &Result<Response, reqwest::Error>) -> bool {
    match outcome {
        Err(_) => true,
        Ok(response) => RETRYABLE_STATUSES.contains(&response.status()),
    }
}

#[derive(Debug, Clone)]
pub struct RetryingClient {
    http_client: HttpClient,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let http_client = HttpClient::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_policy(
            http_client,
            RetryPolicy {
                max_retries: config.max_retries,
                ..RetryPolicy::default()
            },
        ))
    }

    pub fn with_policy(http_client: HttpClient, policy: RetryPolicy) -> Self {
        Self {
            http_client,
            policy,
        }
    }

    /// Starts a request on the underlying client. Send it with [`Self::execute`].
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client.request(method, url)
    }

    /// Sends `request`, retrying transient failures with exponential backoff.
    ///
    /// Once the budget is spent the last outcome is returned as is: the final
    /// 5xx response if the server answered, otherwise the last transport error.
    pub async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let mut attempt = 0;
        loop {
            let replay = request
                .try_clone()
                .ok_or(TransportError::UnbufferedBody)?;
            let outcome = self.http_client.execute(replay).await;

            if attempt >= self.policy.max_retries || !should_retry(&outcome) {
                return Ok(outcome?);
            }

            match outcome {
                Ok(response) => {
                    let status = response.status();
                    // release the pooled connection before reattempting
                    if let Err(err) = response.bytes().await {
                        tracing::debug!(error = %err, "Failed to drain response body");
                    }
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.policy.max_retries,
                        method = %request.method(),
                        url = %request.url(),
                        status = %status,
                        "Retrying request"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.policy.max_retries,
                        method = %request.method(),
                        url = %request.url(),
                        error = %err,
                        "Retrying request"
                    );
                }
            }

            sleep(self.policy.backoff(attempt)).await;
            attempt += 1;
        }
    }
}

//! Configuration utilities for testing.
//!
//! This module provides test configuration builders and helpers for creating
//! mock configurations used throughout the test suite.

use super::fixtures::constants;
use crate::config::{DatadisConfig, HttpConfig, InfluxConfig};
use crate::transport::{RetryPolicy, RetryingClient};
use std::time::Duration;

/// Builder for creating test Datadis configurations.
#[derive(Debug)]
pub struct TestDatadisConfigBuilder {
    url: String,
    username: String,
    password: String,
    cups: String,
    distributor_code: String,
}

impl TestDatadisConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://test.local".to_string(),
            username: "test_user".to_string(),
            password: "test_password".to_string(),
            cups: constants::CUPS.to_string(),
            distributor_code: constants::DISTRIBUTOR_CODE.to_string(),
        }
    }

    /// Sets the provider base URL for the test configuration.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the distributor code for the test configuration.
    pub fn with_distributor_code(mut self, code: impl Into<String>) -> Self {
        self.distributor_code = code.into();
        self
    }

    /// Builds the Datadis configuration.
    pub fn build(self) -> DatadisConfig {
        DatadisConfig {
            url: self.url,
            username: self.username,
            password: self.password,
            cups: self.cups,
            distributor_code: self.distributor_code,
        }
    }
}

/// Builder for creating test InfluxDB configurations.
#[derive(Debug)]
pub struct TestInfluxConfigBuilder {
    url: String,
    org: String,
    token: String,
    bucket: String,
}

impl TestInfluxConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            org: "test-org".to_string(),
            token: "test-token".to_string(),
            bucket: "test-bucket".to_string(),
        }
    }

    /// Sets the URL for the test configuration.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the bucket for the test configuration.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Builds the InfluxDB configuration.
    pub fn build(self) -> InfluxConfig {
        InfluxConfig {
            url: self.url,
            org: self.org,
            token: self.token,
            bucket: self.bucket,
        }
    }
}

/// Creates a Datadis configuration pointing at a mock server.
pub fn test_datadis_config_with_url(url: impl Into<String>) -> DatadisConfig {
    TestDatadisConfigBuilder::new().with_url(url).build()
}

/// Creates a default test InfluxDB configuration.
pub fn test_influx_config() -> InfluxConfig {
    TestInfluxConfigBuilder::new().build()
}

/// Creates a test InfluxDB configuration with a custom URL.
pub fn test_influx_config_with_url(url: impl Into<String>) -> InfluxConfig {
    TestInfluxConfigBuilder::new().with_url(url).build()
}

/// HTTP settings matching the production defaults.
pub fn test_http_config() -> HttpConfig {
    HttpConfig {
        timeout_sec: 30,
        max_retries: 3,
        user_agent: "Mozilla/5.0".to_string(),
    }
}

/// Transport with the production retry budget but millisecond backoff.
pub fn test_transport() -> RetryingClient {
    let config = test_http_config();
    let http_client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    RetryingClient::with_policy(
        http_client,
        RetryPolicy {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(5),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datadis_config_builder() {
        let config = TestDatadisConfigBuilder::new()
            .with_url("http://datadis.local")
            .with_distributor_code("5")
            .build();

        assert_eq!(config.url, "http://datadis.local");
        assert_eq!(config.username, "test_user");
        assert_eq!(config.cups, constants::CUPS);
        assert_eq!(config.distributor_code, "5");
    }

    #[test]
    fn test_influx_config_builder() {
        let config = TestInfluxConfigBuilder::new()
            .with_url("http://influx.local")
            .with_bucket("my-bucket")
            .build();

        assert_eq!(config.url, "http://influx.local");
        assert_eq!(config.org, "test-org");
        assert_eq!(config.bucket, "my-bucket");
    }
}

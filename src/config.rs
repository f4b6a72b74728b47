use crate::error::ConfigError;
use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

/// Level the subscriber starts with. A configuration that failed to load
/// falls back to INFO.
pub(crate) fn startup_log_level(loaded: &Result<AppConfig>) -> tracing::Level {
    loaded
        .as_ref()
        .map(AppConfig::log_level)
        .unwrap_or(tracing::Level::INFO)
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_timeout_sec() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct HttpConfig {
    // bounds connect and the whole request, per attempt
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_sec == 0 {
            return Err(ConfigError::invalid(
                "HTTP_TIMEOUT_SEC",
                "must be greater than zero",
            ));
        }
        require("HTTP_USER_AGENT", &self.user_agent)
    }
}

pub fn load_http_config() -> Result<HttpConfig> {
    let config = match envy::prefixed("HTTP_").from_env::<HttpConfig>() {
        Ok(config) => config,
        Err(err) => return Err(anyhow!("Failed to load HttpConfig: {}", err)),
    };
    match config.validate() {
        Ok(()) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load HttpConfig: {}", err)),
    }
}

fn default_datadis_url() -> String {
    "https://datadis.es".to_string()
}

#[derive(Deserialize)]
pub struct DatadisConfig {
    #[serde(default = "default_datadis_url")]
    pub url: String,
    pub username: String,
    pub password: String,
    pub cups: String,
    pub distributor_code: String,
}

impl DatadisConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("DATADIS_URL", &self.url)?;
        require("DATADIS_USERNAME", &self.username)?;
        require("DATADIS_PASSWORD", &self.password)?;
        require("DATADIS_CUPS", &self.cups)?;
        require("DATADIS_DISTRIBUTOR_CODE", &self.distributor_code)
    }
}

// Credentials stay out of logs.
impl fmt::Debug for DatadisConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DatadisConfig")
            .field("url", &self.url)
            .field("username", &"<redacted>")
            .field("password", &"<redacted>")
            .field("cups", &self.cups)
            .field("distributor_code", &self.distributor_code)
            .finish()
    }
}

pub(crate) fn load_datadis_config() -> Result<DatadisConfig> {
    let config = match envy::prefixed("DATADIS_").from_env::<DatadisConfig>() {
        Ok(config) => config,
        Err(err) => return Err(anyhow!("Failed to load DatadisConfig: {}", err)),
    };
    match config.validate() {
        Ok(()) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load DatadisConfig: {}", err)),
    }
}

#[derive(Deserialize)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

impl InfluxConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("INFLUXDB_URL", &self.url)?;
        require("INFLUXDB_TOKEN", &self.token)?;
        require("INFLUXDB_ORG", &self.org)?;
        require("INFLUXDB_BUCKET", &self.bucket)
    }
}

impl fmt::Debug for InfluxConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("InfluxConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("org", &self.org)
            .field("bucket", &self.bucket)
            .finish()
    }
}

pub fn load_influx_config() -> Result<InfluxConfig> {
    let config = match envy::prefixed("INFLUXDB_").from_env::<InfluxConfig>() {
        Ok(config) => config,
        Err(err) => return Err(anyhow!("Failed to load InfluxConfig: {}", err)),
    };
    match config.validate() {
        Ok(()) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load InfluxConfig: {}", err)),
    }
}

fn require(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::missing(name))
    } else {
        Ok(())
    }
}

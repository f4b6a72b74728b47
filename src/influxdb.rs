use crate::config::InfluxConfig;
use crate::error::StorageError;
use crate::model::LineSink;
use crate::transport::RetryingClient;
use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::io::Write;

pub struct Client {
    transport: RetryingClient,
    config: InfluxConfig,
}

impl Client {
    pub(crate) fn new(config: InfluxConfig, transport: RetryingClient) -> Self {
        Self { transport, config }
    }

    fn write_url(&self) -> String {
        format!("{}/api/v2/write", self.config.url.trim_end_matches('/'))
    }
}

/// Gzips the batch as one block, one newline-terminated line per entry.
pub fn compress(lines: &[String]) -> Result<Vec<u8>, std::io::Error> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    for line in lines {
        encoder.write_all(line.as_bytes())?;
        encoder.write_all(b"\n")?;
    }
    encoder.finish()
}

#[async_trait]
impl LineSink for Client {
    async fn write(&self, lines: &[String]) -> Result<(), StorageError> {
        if lines.is_empty() {
            return Err(StorageError::EmptyBatch);
        }
        let body = compress(lines)?;
        tracing::debug!(lines = lines.len(), bytes = body.len(), "Compressed batch");

        let request = self
            .transport
            .request(Method::POST, &self.write_url())
            .query(&[
                ("precision", "s"),
                ("org", self.config.org.as_str()),
                ("bucket", self.config.bucket.as_str()),
            ])
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Token {}", self.config.token))
            .header(CONTENT_ENCODING, "gzip")
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .build()
            .map_err(|err| StorageError::Transport(err.into()))?;

        let response = self.transport.execute(request).await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response
                .text()
                .await
                .map_err(|err| StorageError::Transport(err.into()))?;
            return Err(StorageError::rejected(status, body));
        }
        Ok(())
    }
}

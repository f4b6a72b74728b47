use crate::error::{StorageError, TransformError};
use async_trait::async_trait;

use super::LinePoint;

/// Trait for provider records that become one line-protocol point each.
pub trait LineBuilder {
    /// Converts the record into a point tagged with the metering point `cups`.
    ///
    /// # Returns
    /// - `Ok(LinePoint)` if the record's date and time parse
    /// - `Err` if the record cannot be placed on the time axis
    fn to_point(&self, cups: &str) -> Result<LinePoint, TransformError>;
}

/// Destination for a finished batch of line-protocol lines.
#[async_trait]
pub trait LineSink: Send + Sync {
    /// Writes the whole batch in one request. An empty batch is an error.
    async fn write(&self, lines: &[String]) -> Result<(), StorageError>;
}

use crate::datadis::{ConsumptionRecord, PowerRecord};
use crate::error::TransformError;
use std::fmt;

use super::traits::LineBuilder;
use super::types::{Measurement, Period};
use super::utilities::parse_timestamp;

/// A single line-protocol point with second precision.
///
/// Renders as `<measurement>,cups=<id>,period=<code> <field>=<value> <seconds>`
/// with the value fixed to three decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub measurement: Measurement,
    pub cups: String,
    pub period: String,
    pub value: f64,
    /// Unix epoch seconds
    pub timestamp: i64,
}

impl fmt::Display for LinePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},cups={},period={} {}={:.3} {}",
            self.measurement,
            escape_tag(&self.cups),
            escape_tag(&self.period),
            self.measurement.field(),
            self.value,
            self.timestamp
        )
    }
}

fn escape_tag(value: &str) -> String {
    value
        .replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}

impl LineBuilder for ConsumptionRecord {
    fn to_point(&self, cups: &str) -> Result<LinePoint, TransformError> {
        Ok(LinePoint {
            measurement: Measurement::Consumption,
            cups: cups.to_string(),
            period: Period::from_label(&self.period).to_string(),
            value: self.measure_magnitude_active,
            timestamp: parse_timestamp(&self.date, &self.hour)?,
        })
    }
}

/// Power periods are already numeric and are written as received.
impl LineBuilder for PowerRecord {
    fn to_point(&self, cups: &str) -> Result<LinePoint, TransformError> {
        Ok(LinePoint {
            measurement: Measurement::MaxPower,
            cups: cups.to_string(),
            period: self.period.clone(),
            value: self.max_power,
            timestamp: parse_timestamp(&self.date, &self.time)?,
        })
    }
}

use crate::error::TransformError;
use chrono::NaiveDateTime;

use super::traits::LineBuilder;

/// Layout of the provider's `date` and `hour`/`time` fields joined by a space.
const DATE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Parses a provider date and time into Unix epoch seconds.
///
/// Datadis labels the last hour of a day "24:00"; it is read as "00:00" of the
/// same date. The wall-clock value is taken at UTC offset zero.
pub fn parse_timestamp(date: &str, time: &str) -> Result<i64, TransformError> {
    let time = if time == "24:00" { "00:00" } else { time };
    let text = format!("{} {}", date, time);
    NaiveDateTime::parse_from_str(&text, DATE_TIME_FORMAT)
        .map(|datetime| datetime.and_utc().timestamp())
        .map_err(|err| TransformError::datetime_parse(text, err))
}

/// Renders every record as one line, in order. The first bad record fails the batch.
pub fn build_lines<T: LineBuilder>(cups: &str, records: &[T]) -> Result<Vec<String>, TransformError> {
    records
        .iter()
        .map(|record| record.to_point(cups).map(|point| point.to_string()))
        .collect()
}

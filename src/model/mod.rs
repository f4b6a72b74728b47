//! Model definitions for Datadis readings and InfluxDB line-protocol output.
//!
//! This module turns provider records into line-protocol lines and defines the
//! sink trait the finished batch is handed to.

pub mod metrics;
pub mod traits;
pub mod types;
pub mod utilities;

// Re-export commonly used items at the module level
pub use metrics::LinePoint;
pub use traits::{LineBuilder, LineSink};
pub use types::{Distributor, Measurement, Period};
pub use utilities::{build_lines, parse_timestamp};

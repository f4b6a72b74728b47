//! Test fixtures and common test data.
//!
//! This module provides common constants, dates and Datadis response bodies
//! used across the test suite.

/// Common test data constants.
pub mod constants {
    /// Metering point used by every test configuration.
    pub const CUPS: &str = "ES0031406912345678JN0F";

    /// E-distribución, the distributor every test configuration targets.
    pub const DISTRIBUTOR_CODE: &str = "2";

    /// Token returned by the mocked login endpoint.
    pub const TOKEN: &str = "test-token";
}

/// Test date generators.
pub mod dates {
    use chrono::NaiveDate;

    /// The day runs are pinned to in tests.
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }
}

/// Datadis JSON response bodies.
pub mod bodies {
    use serde_json::{json, Value};

    pub fn distributor_error(distributor_code: &str, code: &str, description: &str) -> Value {
        json!({
            "distributorCode": distributor_code,
            "distributorName": "TEST DISTRIBUTOR",
            "errorCode": code,
            "errorDescription": description
        })
    }

    pub fn supplies(point_types: &[u32]) -> Value {
        supplies_with_errors(point_types, &[])
    }

    pub fn supplies_with_errors(point_types: &[u32], errors: &[Value]) -> Value {
        let supplies: Vec<Value> = point_types
            .iter()
            .map(|point_type| {
                json!({
                    "address": "CALLE FALSA 123",
                    "cups": super::constants::CUPS,
                    "distributor": "E-DISTRIBUCION",
                    "distributorCode": super::constants::DISTRIBUTOR_CODE,
                    "pointType": point_type
                })
            })
            .collect();
        json!({ "supplies": supplies, "distributorError": errors })
    }

    pub fn contract(province: &str, tariff: &str, self_consumption: Option<&str>) -> Value {
        json!({
            "response": [{
                "cups": super::constants::CUPS,
                "provinciaCode": province,
                "tarifaAccesoCode": tariff,
                "tipoAutoConsumo": self_consumption
            }]
        })
    }

    /// Records as `(kWh, date, hour, period label)`.
    pub fn consumption(records: &[(f64, &str, &str, &str)]) -> Value {
        let list: Vec<Value> = records
            .iter()
            .map(|(value, date, hour, period)| {
                json!({
                    "cups": super::constants::CUPS,
                    "date": date,
                    "hour": hour,
                    "measureMagnitudeActive": value,
                    "obtainMethod": "Real",
                    "period": period
                })
            })
            .collect();
        json!({ "response": { "timeCurveList": list } })
    }

    pub fn max_power(records: &[(&str, f64, &str, &str)]) -> Value {
        max_power_with_errors(records, &[])
    }

    /// Records as `(period, kW, date, time)`.
    pub fn max_power_with_errors(records: &[(&str, f64, &str, &str)], errors: &[Value]) -> Value {
        let list: Vec<Value> = records
            .iter()
            .map(|(period, value, date, time)| {
                json!({
                    "cups": super::constants::CUPS,
                    "date": date,
                    "time": time,
                    "maximoPotenciaDemandada": value,
                    "period": period
                })
            })
            .collect();
        json!({ "maxPower": list, "distributorError": errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_shape() {
        let supplies = bodies::supplies(&[5, 4]);
        assert_eq!(supplies["supplies"].as_array().unwrap().len(), 2);
        assert_eq!(supplies["supplies"][0]["pointType"], 5);

        let contract = bodies::contract("08", "2.0TD", None);
        assert!(contract["response"][0]["tipoAutoConsumo"].is_null());

        let consumption = bodies::consumption(&[(1.234, "2024/05/01", "13:00", "PUNTA")]);
        assert_eq!(
            consumption["response"]["timeCurveList"][0]["measureMagnitudeActive"],
            1.234
        );
    }
}

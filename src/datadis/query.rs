//! Request payloads and date windows for Datadis data queries.

use super::api::{Contract, Supply};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde_derive::Serialize;

/// Day format used in Datadis request bodies.
const DAY_FORMAT: &str = "%Y/%m/%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRequest {
    pub cups: Vec<String>,
    pub distributor: String,
}

impl ContractRequest {
    pub fn new(cups: &str, distributor_code: &str) -> Self {
        Self {
            cups: vec![cups.to_string()],
            distributor: distributor_code.to_string(),
        }
    }
}

/// Body of the hourly consumption query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRequest {
    pub fecha_inicial: String,
    pub fecha_final: String,
    pub cups: Vec<String>,
    pub distributor: String,
    pub fraccion: u8,
    pub has_auto_consumo: bool,
    pub province_code: String,
    pub tarifa_code: String,
    pub tipo_punto_medida: u32,
    pub tipo_auto_consumo: Option<String>,
}

impl ConsumptionRequest {
    /// Builds the query for the month up to `today` from the phase-one results.
    pub fn new(
        cups: &str,
        distributor_code: &str,
        today: NaiveDate,
        supply: &Supply,
        contract: &Contract,
    ) -> Self {
        let (start, end) = consumption_window(today);
        Self {
            fecha_inicial: start,
            fecha_final: end,
            cups: vec![cups.to_string()],
            distributor: distributor_code.to_string(),
            fraccion: 0,
            has_auto_consumo: false,
            province_code: contract.provincia_code.clone(),
            tarifa_code: contract.tarifa_acceso_code.clone(),
            tipo_punto_medida: supply.point_type,
            tipo_auto_consumo: contract.tipo_auto_consumo.clone(),
        }
    }
}

/// Query parameters of the maximum power request.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxPowerQuery {
    pub cups: String,
    pub distributor_code: String,
    pub start_date: String,
    pub end_date: String,
}

impl MaxPowerQuery {
    /// Covers the calendar year `today` falls in.
    pub fn new(cups: &str, distributor_code: &str, today: NaiveDate) -> Self {
        let (start_date, end_date) = power_window(today);
        Self {
            cups: cups.to_string(),
            distributor_code: distributor_code.to_string(),
            start_date,
            end_date,
        }
    }

    pub fn to_params(&self) -> [(&'static str, &str); 4] {
        [
            ("cups", self.cups.as_str()),
            ("distributorCode", self.distributor_code.as_str()),
            ("startDate", self.start_date.as_str()),
            ("endDate", self.end_date.as_str()),
        ]
    }
}

/// One calendar month back from `today` through `today`, both inclusive.
///
/// A day missing from the previous month rolls over into the next one, so
/// March 31 starts on March 2 in a leap year.
pub fn consumption_window(today: NaiveDate) -> (String, String) {
    let start = today
        .with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(1)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(today.day0()))))
        .unwrap_or(today);
    (
        start.format(DAY_FORMAT).to_string(),
        today.format(DAY_FORMAT).to_string(),
    )
}

/// January through December of the current year, in `YYYY/MM` notation.
pub fn power_window(today: NaiveDate) -> (String, String) {
    (
        format!("{:04}/01", today.year()),
        format!("{:04}/12", today.year()),
    )
}

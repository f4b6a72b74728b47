//! Datadis wire types and endpoint catalogue.
//!
//! Field names follow the provider's JSON contract. Only the attributes the
//! exporter consumes are modelled; everything else in a payload is ignored.

use crate::error::ProviderError;
use crate::model::Distributor;
use serde_derive::Deserialize;
use std::fmt;

/// Remote operations used during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Supplies,
    Contract,
    Consumption,
    MaxPower,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/nikola-auth/tokens/login",
            Endpoint::Supplies => "/api-private/api/get-supplies-v2",
            Endpoint::Contract => "/api-private/supply-data/contractual-data",
            Endpoint::Consumption => "/api-private/supply-data/v2/time-curve-data/hours",
            Endpoint::MaxPower => "/api-private/api/get-max-power-v2",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Login => write!(f, "login"),
            Endpoint::Supplies => write!(f, "supplies"),
            Endpoint::Contract => write!(f, "contract"),
            Endpoint::Consumption => write!(f, "consumption"),
            Endpoint::MaxPower => write!(f, "max power"),
        }
    }
}

/// Error entry a distributor attaches to an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorError {
    #[serde(default)]
    pub distributor_code: Option<String>,
    #[serde(default)]
    pub distributor_name: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl DistributorError {
    pub fn distributor(&self) -> Option<Distributor> {
        self.distributor_code.as_deref().map(Distributor::from_code)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    pub point_type: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppliesResponse {
    #[serde(default)]
    pub supplies: Vec<Supply>,
    #[serde(default)]
    pub distributor_error: Vec<DistributorError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub provincia_code: String,
    pub tarifa_acceso_code: String,
    // null means no self-consumption and is forwarded as null
    #[serde(default)]
    pub tipo_auto_consumo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContractResponse {
    #[serde(default)]
    pub response: Vec<Contract>,
}

/// One hourly consumption reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRecord {
    pub measure_magnitude_active: f64,
    pub date: String,
    pub hour: String,
    #[serde(default)]
    pub period: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCurve {
    #[serde(default)]
    pub time_curve_list: Vec<ConsumptionRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ConsumptionResponse {
    #[serde(default)]
    pub response: TimeCurve,
}

/// One maximum demanded power reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PowerRecord {
    #[serde(default)]
    pub period: String,
    #[serde(rename = "maximoPotenciaDemandada")]
    pub max_power: f64,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerResponse {
    #[serde(rename = "maxPower", default)]
    pub max_power: Vec<PowerRecord>,
    #[serde(default)]
    pub distributor_error: Vec<DistributorError>,
}

/// Takes the entry a single-point account is expected to return.
///
/// Datadis answers with lists even when one entry is expected. An empty list
/// is an error. Extra entries are ignored with a warning since accounts with
/// several supply points are not handled.
pub fn first_entry<T>(endpoint: Endpoint, entries: Vec<T>) -> Result<T, ProviderError> {
    if entries.len() > 1 {
        tracing::warn!(
            endpoint = %endpoint,
            count = entries.len(),
            "Response holds more than one entry, using the first"
        );
    }
    entries
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyList { endpoint })
}

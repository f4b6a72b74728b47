mod api;
mod client;
mod query;

pub use api::{first_entry, ConsumptionRecord, Contract, Endpoint, PowerRecord, Supply};
pub use client::{Client, Session};
pub use query::{ConsumptionRequest, MaxPowerQuery};

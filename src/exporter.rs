//! Acquisition orchestrator.
//!
//! A run logs in, then fetches in two phases separated by join barriers:
//!
//! 1. supplies and contract, concurrently;
//! 2. hourly consumption and maximum power, concurrently. The consumption query
//!    needs the point type, province and tariff found in phase one.
//!
//! Each phase-two task converts its own records and returns an owned list of
//! lines; the lists are concatenated once both finish and handed to the sink.
//! Any failure ends the run with the error of the stage that failed.

use crate::datadis::{self, first_entry, ConsumptionRequest, Endpoint, MaxPowerQuery, Session};
use crate::error::Result;
use crate::model::{build_lines, LineSink};
use chrono::NaiveDate;

/// Phase-one results the consumption query depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyContext {
    pub supply: datadis::Supply,
    pub contract: datadis::Contract,
}

pub struct Exporter {
    client: datadis::Client,
    sink: Box<dyn LineSink>,
}

impl Exporter {
    pub fn new(client: datadis::Client, sink: Box<dyn LineSink>) -> Self {
        Self { client, sink }
    }

    /// Performs one complete export for the day `today` and returns the number
    /// of lines written.
    pub async fn run(&self, today: NaiveDate) -> Result<usize> {
        tracing::info!(
            cups = %self.client.cups(),
            distributor = %self.client.distributor(),
            "Starting export"
        );

        let session = self.client.login().await?;
        tracing::info!("Logged in to Datadis");

        let context = self.acquire_context(&session).await?;
        tracing::info!(
            point_type = context.supply.point_type,
            province = %context.contract.provincia_code,
            tariff = %context.contract.tarifa_acceso_code,
            "Fetched supply and contract"
        );

        let lines = self.acquire_lines(&session, &context, today).await?;
        for line in &lines {
            tracing::debug!("{}", line);
        }

        self.sink.write(&lines).await?;
        tracing::info!(lines = lines.len(), "Successfully wrote lines to InfluxDB");
        Ok(lines.len())
    }

    /// Phase one: supplies and contract, joined before anything else starts.
    async fn acquire_context(&self, session: &Session) -> Result<SupplyContext> {
        let (supplies, contracts) = tokio::try_join!(
            self.client.supplies(session),
            self.client.contracts(session),
        )?;
        Ok(SupplyContext {
            supply: first_entry(Endpoint::Supplies, supplies)?,
            contract: first_entry(Endpoint::Contract, contracts)?,
        })
    }

    /// Phase two: consumption and maximum power, each transformed by its own task.
    /// Consumption lines come first in the returned batch.
    async fn acquire_lines(
        &self,
        session: &Session,
        context: &SupplyContext,
        today: NaiveDate,
    ) -> Result<Vec<String>> {
        let (consumption, power) = tokio::try_join!(
            self.consumption_lines(session, context, today),
            self.max_power_lines(session, today),
        )?;
        tracing::info!(
            consumption = consumption.len(),
            max_power = power.len(),
            "Transformed readings"
        );
        Ok(consumption.into_iter().chain(power).collect())
    }

    async fn consumption_lines(
        &self,
        session: &Session,
        context: &SupplyContext,
        today: NaiveDate,
    ) -> Result<Vec<String>> {
        let payload = ConsumptionRequest::new(
            self.client.cups(),
            self.client.distributor().code(),
            today,
            &context.supply,
            &context.contract,
        );
        let records = self.client.consumption(session, &payload).await?;
        Ok(build_lines(self.client.cups(), &records)?)
    }

    async fn max_power_lines(&self, session: &Session, today: NaiveDate) -> Result<Vec<String>> {
        let query = MaxPowerQuery::new(self.client.cups(), self.client.distributor().code(), today);
        let records = self.client.max_power(session, &query).await?;
        Ok(build_lines(self.client.cups(), &records)?)
    }
}

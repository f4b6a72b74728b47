use super::api::{
    ConsumptionRecord, ConsumptionResponse, Contract, ContractResponse, DistributorError, Endpoint,
    PowerRecord, PowerResponse, SuppliesResponse, Supply,
};
use super::query::{ConsumptionRequest, ContractRequest, MaxPowerQuery};
use crate::config;
use crate::error::ProviderError;
use crate::model::Distributor;
use crate::transport::RetryingClient;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;

/// Bearer credentials for the current run.
#[derive(Clone)]
pub struct Session {
    authorization: String,
}

impl Session {
    fn new(token: &str) -> Self {
        Self {
            authorization: format!("Bearer {}", token),
        }
    }

    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Session { .. }")
    }
}

pub struct Client {
    transport: RetryingClient,
    config: config::DatadisConfig,
    distributor: Distributor,
}

impl Client {
    pub fn new(config: config::DatadisConfig, transport: RetryingClient) -> Self {
        let distributor = Distributor::from_code(&config.distributor_code);
        Self {
            transport,
            config,
            distributor,
        }
    }

    pub fn cups(&self) -> &str {
        &self.config.cups
    }

    pub fn distributor(&self) -> &Distributor {
        &self.distributor
    }

    /// Exchanges the configured credentials for a session token.
    ///
    /// The login endpoint answers with the raw token as plain text.
    pub async fn login(&self) -> Result<Session, ProviderError> {
        let request = self
            .transport
            .request(Method::POST, &self.url(Endpoint::Login))
            .header(ACCEPT, "application/json")
            .form(&[
                ("username", self.config.username.as_str()),
                ("password", self.config.password.as_str()),
                ("origin", "'WEB'"),
            ]);
        let body = self.send(Endpoint::Login, request).await?;
        Ok(Session::new(body.trim()))
    }

    pub async fn supplies(&self, session: &Session) -> Result<Vec<Supply>, ProviderError> {
        let request = self.authorized(Method::GET, Endpoint::Supplies, session);
        let body = self.send(Endpoint::Supplies, request).await?;
        let response: SuppliesResponse = decode(Endpoint::Supplies, &body)?;
        self.check_distributor_errors(Endpoint::Supplies, &response.distributor_error)?;
        Ok(response.supplies)
    }

    pub async fn contracts(&self, session: &Session) -> Result<Vec<Contract>, ProviderError> {
        let payload = ContractRequest::new(&self.config.cups, &self.config.distributor_code);
        let request = self
            .authorized(Method::POST, Endpoint::Contract, session)
            .json(&payload);
        let body = self.send(Endpoint::Contract, request).await?;
        let response: ContractResponse = decode(Endpoint::Contract, &body)?;
        Ok(response.response)
    }

    pub async fn consumption(
        &self,
        session: &Session,
        payload: &ConsumptionRequest,
    ) -> Result<Vec<ConsumptionRecord>, ProviderError> {
        let request = self
            .authorized(Method::POST, Endpoint::Consumption, session)
            .json(payload);
        let body = self.send(Endpoint::Consumption, request).await?;
        let response: ConsumptionResponse = decode(Endpoint::Consumption, &body)?;
        Ok(response.response.time_curve_list)
    }

    pub async fn max_power(
        &self,
        session: &Session,
        query: &MaxPowerQuery,
    ) -> Result<Vec<PowerRecord>, ProviderError> {
        let request = self
            .authorized(Method::GET, Endpoint::MaxPower, session)
            .query(&query.to_params());
        let body = self.send(Endpoint::MaxPower, request).await?;
        let response: PowerResponse = decode(Endpoint::MaxPower, &body)?;
        self.check_distributor_errors(Endpoint::MaxPower, &response.distributor_error)?;
        Ok(response.max_power)
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), endpoint.path())
    }

    fn authorized(&self, method: Method, endpoint: Endpoint, session: &Session) -> RequestBuilder {
        self.transport
            .request(method, &self.url(endpoint))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, session.authorization())
    }

    /// Sends the request through the retrying transport and returns the body of a 200.
    async fn send(&self, endpoint: Endpoint, request: RequestBuilder) -> Result<String, ProviderError> {
        let request = request
            .build()
            .map_err(|err| ProviderError::transport(endpoint, err))?;
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|err| ProviderError::transport(endpoint, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::transport(endpoint, err))?;
        if status != StatusCode::OK {
            return Err(ProviderError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(endpoint = %endpoint, bytes = body.len(), "Received response");
        Ok(body)
    }

    /// Fails when the configured distributor reported an error. Entries from other
    /// distributors on the same account are logged and ignored.
    fn check_distributor_errors(
        &self,
        endpoint: Endpoint,
        errors: &[DistributorError],
    ) -> Result<(), ProviderError> {
        for entry in errors {
            let code = entry.error_code.clone().unwrap_or_default();
            let description = entry.error_description.clone().unwrap_or_default();
            if entry.distributor().as_ref() == Some(&self.distributor) {
                return Err(ProviderError::Distributor {
                    endpoint,
                    distributor: self.distributor.to_string(),
                    code,
                    description,
                });
            }
            tracing::warn!(
                endpoint = %endpoint,
                distributor = entry.distributor_name.as_deref().unwrap_or_default(),
                code = %code,
                description = %description,
                "Ignoring error reported by another distributor"
            );
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|err| ProviderError::decode(endpoint, err))
}

use crate::core::{AddressLookup, ConfigProvider, LookupOutcome};
use crate::domain::model::ApiResponse;
use crate::utils::error::{LookupError, Result};
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the zipcloud-style search endpoint.
#[derive(Debug, Clone)]
pub struct AddressLookupClient {
    client: Client,
    endpoint: String,
}

impl AddressLookupClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// 逾時由傳輸層決定，核心本身不設逾時
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        match config.timeout_seconds() {
            Some(secs) => Self::with_timeout(config.api_endpoint(), Duration::from_secs(secs)),
            None => Ok(Self::new(config.api_endpoint())),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, postal_code: &str) -> std::result::Result<ApiResponse, LookupError> {
        tracing::debug!("Making API request to: {} (zipcode={})", self.endpoint, postal_code);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("zipcode", postal_code)])
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        Ok(ApiResponse::from_slice(&body)?)
    }
}

/// Maps a decoded payload to an outcome. A non-200 service status is treated as a
/// communication failure before the results are looked at.
pub fn interpret_response(postal_code: &str, response: ApiResponse) -> LookupOutcome {
    if !response.is_service_ok() {
        return LookupOutcome::CommunicationFailure {
            message: "No data received from the API".to_string(),
            cause: Some(LookupError::ServiceStatus {
                status: response.status,
                message: response.message,
            }),
        };
    }

    match response.results {
        Some(group) if !group.is_empty() => LookupOutcome::Success(group),
        _ => LookupOutcome::NotFound(postal_code.to_string()),
    }
}

#[async_trait::async_trait]
impl AddressLookup for AddressLookupClient {
    async fn lookup(&self, postal_code: &str) -> LookupOutcome {
        let outcome = match self.fetch(postal_code).await {
            Ok(response) => interpret_response(postal_code, response),
            Err(err) => LookupOutcome::CommunicationFailure {
                message: format!("Failed to communicate with the API: {}", err),
                cause: Some(err),
            },
        };

        match &outcome {
            LookupOutcome::Success(group) => {
                tracing::info!("✅ {} → {} address(es)", postal_code, group.len());
            }
            LookupOutcome::NotFound(code) => {
                tracing::info!("🔍 No address found for postal code {}", code);
            }
            LookupOutcome::CommunicationFailure { message, .. } => {
                tracing::warn!("❌ Lookup for {} failed: {}", postal_code, message);
            }
        }

        outcome
    }
}

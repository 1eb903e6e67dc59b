//! HTTP client implementation

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use gateway_core::models::{Gateway, Peripheral, PeripheralUid};

use crate::error::{GatewayClientError, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Gateway registry REST API client
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: Url,
}

impl GatewayClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the server (e.g., "http://localhost:8080")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Build `/api/v1/<segments>`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayClientError::ParseError(format!("{} cannot be a base URL", self.base_url))
            })?
            .clear()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    // =========================================================================
    // Health Check
    // =========================================================================

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    // =========================================================================
    // Gateway Operations
    // =========================================================================

    /// List all gateways with their peripherals
    #[instrument(skip(self))]
    pub async fn list_gateways(&self) -> Result<Vec<Gateway>> {
        let url = self.endpoint(&["gateways"])?;
        debug!("Listing gateways from {}", url);

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn get_gateway(&self, serial_number: &str) -> Result<Gateway> {
        let url = self.endpoint(&["gateways", serial_number])?;

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Create a gateway, together with any peripherals it carries
    #[instrument(skip(self, gateway), fields(serial_number = %gateway.serial_number))]
    pub async fn create_gateway(&self, gateway: &Gateway) -> Result<Gateway> {
        let url = self.endpoint(&["gateways"])?;

        let response = self.client.post(url).json(gateway).send().await?;
        self.handle_response(response).await
    }

    /// Replace a gateway's name and address
    #[instrument(skip(self, details))]
    pub async fn update_gateway(&self, serial_number: &str, details: &Gateway) -> Result<Gateway> {
        let url = self.endpoint(&["gateways", serial_number])?;

        let response = self.client.put(url).json(details).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete_gateway(&self, serial_number: &str) -> Result<()> {
        let url = self.endpoint(&["gateways", serial_number])?;

        let response = self.client.delete(url).send().await?;
        self.handle_empty(response).await
    }

    /// List peripherals owned by a gateway
    #[instrument(skip(self))]
    pub async fn list_gateway_peripherals(&self, serial_number: &str) -> Result<Vec<Peripheral>> {
        let url = self.endpoint(&["gateways", serial_number, "peripherals"])?;

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Create a new peripheral owned by the gateway
    #[instrument(skip(self, peripheral), fields(uid = peripheral.uid))]
    pub async fn attach_peripheral(
        &self,
        serial_number: &str,
        peripheral: &Peripheral,
    ) -> Result<Peripheral> {
        let url = self.endpoint(&["gateways", serial_number, "peripherals"])?;

        let response = self.client.post(url).json(peripheral).send().await?;
        self.handle_response(response).await
    }

    /// Move an existing peripheral under the gateway
    #[instrument(skip(self))]
    pub async fn associate_peripheral(&self, serial_number: &str, uid: PeripheralUid) -> Result<()> {
        let uid = uid.to_string();
        let url = self.endpoint(&["gateways", serial_number, "peripherals", &uid])?;

        let response = self.client.put(url).send().await?;
        self.handle_empty(response).await
    }

    /// Delete a peripheral through the gateway that owns it
    #[instrument(skip(self))]
    pub async fn remove_peripheral(&self, serial_number: &str, uid: PeripheralUid) -> Result<()> {
        let uid = uid.to_string();
        let url = self.endpoint(&["gateways", serial_number, "peripherals", &uid])?;

        let response = self.client.delete(url).send().await?;
        self.handle_empty(response).await
    }

    // =========================================================================
    // Peripheral Operations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_peripherals(&self) -> Result<Vec<Peripheral>> {
        let url = self.endpoint(&["peripherals"])?;

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// List peripherals that do (`true`) or do not (`false`) belong to a gateway
    #[instrument(skip(self))]
    pub async fn list_peripherals_by_association(&self, associated: bool) -> Result<Vec<Peripheral>> {
        let flag = associated.to_string();
        let url = self.endpoint(&["peripherals", "associates", &flag])?;

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn get_peripheral(&self, uid: PeripheralUid) -> Result<Peripheral> {
        let uid = uid.to_string();
        let url = self.endpoint(&["peripherals", &uid])?;

        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Create an unassigned peripheral
    #[instrument(skip(self, peripheral), fields(uid = peripheral.uid))]
    pub async fn create_peripheral(&self, peripheral: &Peripheral) -> Result<Peripheral> {
        let url = self.endpoint(&["peripherals"])?;

        let response = self.client.post(url).json(peripheral).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self, details))]
    pub async fn update_peripheral(
        &self,
        uid: PeripheralUid,
        details: &Peripheral,
    ) -> Result<Peripheral> {
        let uid = uid.to_string();
        let url = self.endpoint(&["peripherals", &uid])?;

        let response = self.client.put(url).json(details).send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete_peripheral(&self, uid: PeripheralUid) -> Result<()> {
        let uid = uid.to_string();
        let url = self.endpoint(&["peripherals", &uid])?;

        let response = self.client.delete(url).send().await?;
        self.handle_empty(response).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Handle response and deserialize JSON body
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| GatewayClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    /// Handle response whose success carries no body
    async fn handle_empty(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    /// Extract error from failed response
    async fn extract_error(&self, response: reqwest::Response) -> GatewayClientError {
        let status = response.status();
        self.extract_error_from_status(response, status).await
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> GatewayClientError {
        // Try to parse error response body
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => format!("HTTP {}", status),
        };

        match status {
            StatusCode::NOT_FOUND => GatewayClientError::NotFound(message),
            StatusCode::CONFLICT => GatewayClientError::Conflict(message),
            StatusCode::NOT_ACCEPTABLE => GatewayClientError::NotAcceptable(message),
            StatusCode::FAILED_DEPENDENCY => GatewayClientError::FailedDependency(message),
            _ => GatewayClientError::server_error(status.as_u16(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:8080");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = GatewayClient::new("not a url");
        assert!(client.is_err());
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = GatewayClient::new("http://localhost:8080/ignored/path").unwrap();

        let url = client.endpoint(&["gateways", "GW 1/A", "peripherals", "7"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/gateways/GW%201%2FA/peripherals/7"
        );
    }

    #[test]
    fn test_endpoint_rejects_non_base_url() {
        let client = GatewayClient::new("mailto:ops@example.com").unwrap();
        assert!(matches!(
            client.endpoint(&["gateways"]),
            Err(GatewayClientError::ParseError(_))
        ));
    }
}

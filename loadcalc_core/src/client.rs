//! # Calculation Client
//!
//! One JSON `POST` per submission to the calculation service. There is no
//! timeout, retry or cancellation: the call resolves when the service (or
//! the network) gives a final answer.

use std::future::Future;

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::errors::{LoadCalcError, LoadCalcResult, GENERIC_SERVICE_ERROR};
use crate::request::CalculationRequest;
use crate::result::CalculationResult;

/// Anything that can turn a request into a result.
pub trait CalculationService {
    fn calculate(&self, request: &CalculationRequest) -> impl Future<Output = LoadCalcResult<CalculationResult>>;
}

/// HTTP implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCalculationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCalculationClient {
    pub fn new(config: &ClientConfig) -> LoadCalcResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LoadCalcError::config("client", format!("Failed to create HTTP client: {}", e)))?;
        Ok(HttpCalculationClient {
            client,
            endpoint: config.endpoint.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CalculationService for HttpCalculationClient {
    async fn calculate(&self, request: &CalculationRequest) -> LoadCalcResult<CalculationResult> {
        log::info!("Submitting {} unit(s) to {}", request.num_units(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| LoadCalcError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LoadCalcError::transport(e.to_string()))?;

        if !status.is_success() {
            let message = rejection_message(&body);
            log::warn!("Calculation service returned {}: {}", status, message);
            return Err(LoadCalcError::service_rejected(status.as_u16(), message));
        }

        decode_result(&body)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Message to show for a non-success response body.
///
/// Uses the body's `error` string when there is a non-empty one, the generic
/// message otherwise (including bodies that are not JSON at all).
pub fn rejection_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(message) }) if !message.is_empty() => message,
        _ => GENERIC_SERVICE_ERROR.to_string(),
    }
}

/// Decode a success body
pub fn decode_result(body: &[u8]) -> LoadCalcResult<CalculationResult> {
    serde_json::from_slice(body).map_err(|e| LoadCalcError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_uses_error_field_verbatim() {
        assert_eq!(rejection_message(br#"{"error": "X"}"#), "X");
        assert_eq!(
            rejection_message(br#"{"error": "No input data provided"}"#),
            "No input data provided"
        );
    }

    #[test]
    fn test_rejection_without_error_field_falls_back() {
        assert_eq!(rejection_message(br#"{"message": "No valid units provided."}"#), GENERIC_SERVICE_ERROR);
        assert_eq!(rejection_message(br#"{"error": ""}"#), GENERIC_SERVICE_ERROR);
        assert_eq!(rejection_message(b"<html>502 Bad Gateway</html>"), GENERIC_SERVICE_ERROR);
        assert_eq!(rejection_message(b""), GENERIC_SERVICE_ERROR);
    }

    #[test]
    fn test_decode_failure_is_decode_error() {
        let err = decode_result(br#"{"Total Amps": 10}"#).unwrap_err();
        assert_eq!(err.error_code(), "DECODE");
        assert!(decode_result(br#"{"Total Calculated Load (Watts)": 1, "Total Amps": 2}"#).is_ok());
    }

    #[test]
    fn test_client_rejects_bad_endpoint() {
        let config = ClientConfig::default().with_endpoint("");
        assert!(HttpCalculationClient::new(&config).is_err());
        let client = HttpCalculationClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint(), crate::config::DEFAULT_ENDPOINT);
    }
}

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use tracing::{info, warn};

use crate::error::SubmitError;
use super::types::{PredictionRequest, PredictionResult};
use super::Predictor;

/// Multipart field carrying the polarity flag.
pub const FIELD_INVERT: &str = "invert";
/// Multipart field carrying the PNG.
pub const FIELD_IMAGE: &str = "image";
pub const IMAGE_FILENAME: &str = "digit.png";

/// Blocking HTTP client for the remote digit classifier.
pub struct PredictionClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl PredictionClient {
    /// Creates a client posting to `endpoint`. No request timeout is set;
    /// the OS network stack decides when a dead connection gives up.
    pub fn new(endpoint: &str) -> Result<Self, SubmitError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        Ok(Self { endpoint: endpoint.to_owned(), client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(request: &PredictionRequest) -> Result<Form, SubmitError> {
        let image = Part::bytes(request.png.clone())
            .file_name(IMAGE_FILENAME)
            .mime_str("image/png")
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        Ok(Form::new()
            .text(FIELD_INVERT, request.polarity.as_flag())
            .part(FIELD_IMAGE, image))
    }
}

impl Predictor for PredictionClient {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form(request)?)
            .send()
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "prediction request failed");
                SubmitError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(endpoint = %self.endpoint, status = status.as_u16(), %body, "classifier rejected request");
            return Err(SubmitError::Network(format!("HTTP {}", status.as_u16())));
        }

        let result: PredictionResult = response.json().map_err(|e| {
            if e.is_decode() {
                SubmitError::Parse(e.to_string())
            } else {
                SubmitError::Network(e.to_string())
            }
        })?;

        info!(prediction = result.prediction, accuracy = result.accuracy,
              process_time = %result.process_time, "classifier responded");
        Ok(result)
    }
}

pub mod http;
pub mod types;

pub use http::PredictionClient;
pub use types::{PredictionRequest, PredictionResult};

use crate::error::SubmitError;

/// Anything that can classify a normalized digit.
pub trait Predictor {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, SubmitError>;
}

use serde::{Deserialize, Serialize};

use crate::polarity::Polarity;

/// What gets posted to the classifier for one submission.
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    /// 28×28 PNG.
    pub png: Vec<u8>,
    pub polarity: Polarity,
}

/// Classifier response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub process_time: String,
    pub prediction: i64,
    pub accuracy: f64,
}

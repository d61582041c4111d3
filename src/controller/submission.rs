use tracing::info;

use crate::client::{PredictionRequest, PredictionResult, Predictor};
use crate::error::SubmitError;
use crate::normalize::normalize;
use crate::polarity::{detect, Polarity, PolarityChoice};

/// A user-supplied image, as picked.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        SourceImage { name: name.into(), bytes }
    }
}

/// Snapshot of the form taken when a submission starts. Running it needs
/// no access to the controller.
#[derive(Debug, Clone)]
pub struct Submission {
    pub source: SourceImage,
    pub choice: PolarityChoice,
    /// Sequence number handed out by the controller; the highest one is
    /// the submission the form is waiting on.
    pub generation: u64,
}

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: PredictionResult,
    pub polarity: Polarity,
}

impl Submission {
    /// Normalize, pick polarity, classify. Stops at the first failure.
    pub fn run(&self, predictor: &dyn Predictor) -> Result<Outcome, SubmitError> {
        let normalized = normalize(&self.source.bytes)?;

        let polarity = match self.choice {
            PolarityChoice::Auto { .. } => detect(&normalized.raster),
            PolarityChoice::Manual(p) => p,
        };
        info!(file = %self.source.name, auto = self.choice.is_auto(),
              invert = polarity.as_flag(), "submitting digit");

        let request = PredictionRequest { png: normalized.png, polarity };
        let result = predictor.predict(&request)?;
        Ok(Outcome { result, polarity })
    }
}

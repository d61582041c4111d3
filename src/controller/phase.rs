use crate::client::PredictionResult;

/// Submission lifecycle of the upload form.
///
/// ```text
/// Idle ──submit──> Submitting ──ok──> Success
///   ^                  │                 │
///   │                  └──err──> Failed  │
///   └──── file selected / resubmit ──────┘
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Success(PredictionResult),
    /// User-facing message.
    Failed(String),
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            SubmitPhase::Success(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

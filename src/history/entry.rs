use serde::{Deserialize, Serialize};

use crate::client::PredictionResult;
use crate::polarity::Polarity;

/// One stored prediction.
///
/// On disk: `{"process_time":..,"prediction":..,"accuracy":..,"invert":"false","ts":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub result: PredictionResult,
    /// Polarity that was sent with the request.
    pub invert: Polarity,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub ts: i64,
}

impl HistoryEntry {
    /// Stamps a result with the current wall-clock time.
    pub fn now(result: PredictionResult, invert: Polarity) -> Self {
        HistoryEntry { result, invert, ts: chrono::Utc::now().timestamp_millis() }
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS` UTC, if representable.
    pub fn timestamp_label(&self) -> Option<String> {
        chrono::DateTime::from_timestamp_millis(self.ts)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod normalize;
pub mod polarity;

// Convenience re-exports
pub use client::{PredictionClient, PredictionRequest, PredictionResult, Predictor};
pub use config::Config;
pub use controller::{FormController, SourceImage, SubmitPhase};
pub use error::{ConfigError, SubmitError};
pub use history::{HistoryEntry, HistoryStore};
pub use normalize::{normalize, Normalized};
pub use polarity::{Polarity, PolarityChoice};

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber; `RUST_LOG` wins over the built-in filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

use tracing::{debug, error};

use crate::client::{PredictionResult, Predictor};
use crate::error::SubmitError;
use crate::history::{HistoryEntry, HistoryStore};
use crate::polarity::{Polarity, PolarityChoice};
use super::phase::SubmitPhase;
use super::submission::{Outcome, SourceImage, Submission};

/// State behind the upload form.
///
/// A submission is split in three so callers can release their locks
/// while the slow part runs:
/// `begin_submit` (state check + snapshot) → `Submission::run` →
/// `finish` (state update + history append).
///
/// Submissions may overlap. Each one is numbered and only the most recent
/// drives the displayed phase, so one that never finishes does not block
/// the next.
#[derive(Debug)]
pub struct FormController {
    file: Option<SourceImage>,
    polarity: PolarityChoice,
    phase: SubmitPhase,
    history: HistoryStore,
    generation: u64,
}

impl FormController {
    pub fn new(history: HistoryStore) -> Self {
        FormController {
            file: None,
            polarity: PolarityChoice::default(),
            phase: SubmitPhase::Idle,
            history,
            generation: 0,
        }
    }

    pub fn file(&self) -> Option<&SourceImage> {
        self.file.as_ref()
    }

    pub fn polarity(&self) -> PolarityChoice {
        self.polarity
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Replaces the chosen file. A finished result or error is cleared;
    /// an in-flight submission is left alone.
    pub fn select_file(&mut self, source: SourceImage) {
        self.file = Some(source);
        if !self.phase.is_submitting() {
            self.phase = SubmitPhase::Idle;
        }
    }

    pub fn set_auto_detect(&mut self, auto: bool) {
        self.polarity = self.polarity.with_auto(auto);
    }

    pub fn set_manual_polarity(&mut self, polarity: Polarity) {
        self.polarity = self.polarity.with_manual(polarity);
    }

    /// Starts a submission, superseding any still in flight.
    ///
    /// Fails with `Validation` when no file is chosen: the error is shown on
    /// the form and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        let Some(source) = self.file.clone() else {
            self.phase = SubmitPhase::Failed(SubmitError::Validation.to_string());
            return Err(SubmitError::Validation);
        };

        self.generation += 1;
        self.phase = SubmitPhase::Submitting;
        Ok(Submission { source, choice: self.polarity, generation: self.generation })
    }

    /// Applies the outcome of `Submission::run`.
    ///
    /// Success is recorded in history; a history write failure is logged
    /// but does not hide the prediction. Failures never touch history.
    /// Outcomes of superseded submissions are recorded but leave the phase
    /// to the latest one.
    pub fn finish(
        &mut self,
        submission: &Submission,
        outcome: Result<Outcome, SubmitError>,
    ) -> Result<PredictionResult, SubmitError> {
        let current = submission.generation == self.generation;
        if !current {
            debug!(generation = submission.generation, latest = self.generation,
                   "outcome of a superseded submission");
        }

        match outcome {
            Ok(Outcome { result, polarity }) => {
                if let Err(e) = self.history.append(HistoryEntry::now(result.clone(), polarity)) {
                    error!(path = %self.history.path().display(), error = ?e, "could not record prediction");
                }
                if current {
                    self.phase = SubmitPhase::Success(result.clone());
                }
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, detail = e.detail().unwrap_or(""), "submission failed");
                if current {
                    self.phase = SubmitPhase::Failed(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Runs a whole submission while holding `&mut self`.
    pub fn submit(&mut self, predictor: &dyn Predictor) -> Result<PredictionResult, SubmitError> {
        let submission = self.begin_submit()?;
        let outcome = submission.run(predictor);
        self.finish(&submission, outcome)
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ferrite_digits::{FormController, Predictor};

/// Classifier handle shared by every request thread.
pub type SharedPredictor = Arc<dyn Predictor + Send + Sync>;

pub struct StudioState {
    /// Upload form state machine; owns the history log.
    pub form: FormController,
    pub predictor: SharedPredictor,
    /// One-shot notice for the next page render.
    pub flash: Option<String>,
}

impl StudioState {
    pub fn new(form: FormController, predictor: SharedPredictor) -> Self {
        StudioState { form, predictor, flash: None }
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

/// Locks the state. A panic in another request thread leaves the data
/// usable, so poisoning is ignored.
pub fn lock(state: &SharedState) -> MutexGuard<'_, StudioState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub mod form;
pub mod phase;
pub mod submission;

pub use form::FormController;
pub use phase::SubmitPhase;
pub use submission::{Outcome, SourceImage, Submission};

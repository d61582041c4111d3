pub mod choice;
pub mod heuristic;

pub use choice::{Polarity, PolarityChoice};
pub use heuristic::detect;

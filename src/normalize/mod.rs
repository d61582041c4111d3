pub mod contrast;
pub mod normalizer;
pub mod placement;

pub use contrast::{luminance, stretch_contrast};
pub use normalizer::{encode_png, normalize, Normalized};
pub use placement::{placement, Placement, CANVAS_SIZE, TARGET_SIZE};

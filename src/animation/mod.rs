pub mod interpolation;
pub mod transitions;

// Re-export commonly used types and functions for convenience
pub use interpolation::{EasingFunction, RangeMap};
pub use transitions::{CameraTransition, TransitionState};

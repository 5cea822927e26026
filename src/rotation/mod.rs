pub mod controller;

pub use controller::{RotationController, SpinState};

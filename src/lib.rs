//! # spinglobe
//!
//! An auto-rotating globe that carries listing markers and restyles them as
//! the camera moves.
//!
//! The map engine is abstracted behind [`CameraHost`], timers behind
//! [`Scheduler`] and marker DOM nodes behind [`MarkerElement`], so the same
//! [`Globe`] component drives a browser `mapboxgl.Map` (feature `wasm`) or the
//! in-process [`SimulatedCamera`] used by tests and the desktop preview.

pub mod animation;
pub mod core;
pub mod data;
pub mod globe;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rotation;
pub mod runtime;
pub mod traits;
#[cfg(feature = "wasm")]
pub mod web;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    camera::{CameraState, SimulatedCamera},
    config::{AssetConfig, CameraOptions, GlobeOptions, GlobeProfile},
    geo::LatLng,
    viewport::zoom_for_width,
};

pub use animation::interpolation::{EasingFunction, RangeMap};

pub use data::{
    assets::{AssetRoot, MarkerMarkup},
    feature::Feature,
    source::{load_features, DataSource, HttpSource, StaticSource},
};

pub use globe::Globe;

pub use input::events::{CameraEvent, InteractionSource};

pub use layers::{
    marker::{Marker, MarkerElement, MarkerStyle, MemoryElement},
    styler::MarkerStyler,
};

pub use rotation::controller::{RotationController, SpinState};

pub use runtime::{ManualScheduler, Scheduler, TimerId};

pub use traits::{CameraHost, EaseRequest};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, GlobeError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum GlobeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing style target: {0}")]
    MissingStyleTarget(&'static str),

    #[error("Host error: {0}")]
    Host(String),
}

/// Error type alias for convenience
pub type Error = GlobeError;

/// Install `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

//! Prelude module for common spinglobe types and traits
//!
//! `use spinglobe::prelude::*;` brings in everything needed to mount a globe
//! over a camera host and feed it events.

pub use crate::core::{
    camera::{CameraState, SimulatedCamera},
    config::{AssetConfig, CameraOptions, GlobeOptions, GlobeProfile},
    geo::LatLng,
    viewport::zoom_for_width,
};

pub use crate::animation::{
    interpolation::{EasingFunction, RangeMap},
    transitions::{CameraTransition, TransitionState},
};

pub use crate::data::{
    assets::{AssetRoot, MarkerMarkup},
    feature::Feature,
    source::{load_features, DataSource, HttpSource, StaticSource},
};

pub use crate::globe::Globe;

pub use crate::input::events::{CameraEvent, InteractionSource};

pub use crate::layers::{
    marker::{Marker, MarkerElement, MarkerStyle, MemoryElement},
    styler::MarkerStyler,
};

pub use crate::rotation::controller::{RotationController, SpinState};

pub use crate::runtime::{ManualScheduler, Scheduler, TimerId};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::tokio_impl::TokioScheduler;

pub use crate::traits::{CameraHost, EaseRequest};

pub use crate::{Error as GlobeError, Result};

pub use std::time::Duration;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

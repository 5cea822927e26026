//! Capability traits shared by the globe and its engine implementations
//!
//! The real mapping library and the in-process simulation both implement
//! [`CameraHost`]; interpolation helpers implement [`Lerp`].

use crate::animation::interpolation::EasingFunction;
use crate::core::geo::LatLng;
use std::time::Duration;

/// A request to animate the camera center to a new coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EaseRequest {
    pub center: LatLng,
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl EaseRequest {
    pub fn new(center: LatLng, duration: Duration) -> Self {
        Self {
            center,
            duration,
            easing: EasingFunction::Linear,
        }
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }
}

/// Camera capabilities the globe needs from a map engine
///
/// Event delivery runs the other way: the engine pushes
/// [`CameraEvent`](crate::input::events::CameraEvent)s into
/// [`Globe::handle_event`](crate::globe::Globe::handle_event). An engine must
/// report the completion of every [`ease_to`](Self::ease_to) as a `MoveEnd`.
pub trait CameraHost {
    /// Current camera center
    fn center(&self) -> LatLng;

    /// Start an eased transition of the camera center
    fn ease_to(&mut self, request: EaseRequest);

    /// Jump to a zoom level without animation
    fn set_zoom(&mut self, zoom: f64);

    /// Great-circle distance in kilometers
    fn distance_km(&self, from: LatLng, to: LatLng) -> f64 {
        from.distance_to(&to) / 1000.0
    }
}

impl<H: CameraHost + ?Sized> CameraHost for &mut H {
    fn center(&self) -> LatLng {
        (**self).center()
    }

    fn ease_to(&mut self, request: EaseRequest) {
        (**self).ease_to(request)
    }

    fn set_zoom(&mut self, zoom: f64) {
        (**self).set_zoom(zoom)
    }

    fn distance_km(&self, from: LatLng, to: LatLng) -> f64 {
        (**self).distance_km(from, to)
    }
}

/// Unified interpolation trait
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for LatLng {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        LatLng::new(self.lat.lerp(&other.lat, t), self.lng.lerp(&other.lng, t))
    }
}

//! In-process camera host
//!
//! [`SimulatedCamera`] stands in for the browser map engine: eases advance on
//! explicit frame deltas and the events a real engine would fire are queued
//! for the caller to drain into the globe.

use crate::animation::transitions::CameraTransition;
use crate::core::config::CameraOptions;
use crate::core::geo::LatLng;
use crate::input::events::{CameraEvent, InteractionSource};
use crate::traits::{CameraHost, EaseRequest};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Center, zoom and pitch of the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub center: LatLng,
    pub zoom: f64,
    pub pitch: f64,
}

impl CameraState {
    pub fn new(center: LatLng, zoom: f64, pitch: f64) -> Self {
        Self {
            center,
            zoom,
            pitch,
        }
    }
}

pub struct SimulatedCamera {
    state: CameraState,
    min_zoom: f64,
    max_zoom: f64,
    transition: Option<CameraTransition>,
    events: VecDeque<CameraEvent>,
}

impl SimulatedCamera {
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            min_zoom: 0.0,
            max_zoom: 22.0,
            transition: None,
            events: VecDeque::new(),
        }
    }

    /// Camera at the configured initial center, pitch and zoom bounds
    pub fn from_options(options: &CameraOptions, zoom: f64) -> Self {
        let mut camera = Self::new(CameraState::new(
            options.initial_center(),
            options.clamp_zoom(zoom),
            options.pitch,
        ));
        camera.min_zoom = options.min_zoom;
        camera.max_zoom = options.max_zoom;
        camera
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_easing(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    /// Advance the active ease by `delta`, queueing `Move` and, on landing, `MoveEnd`
    pub fn update(&mut self, delta: Duration) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        self.state.center = transition.update(delta);
        self.events.push_back(CameraEvent::Move);

        if transition.is_complete() {
            self.state.center = self.state.center.wrapped();
            self.transition = None;
            self.events.push_back(CameraEvent::MoveEnd);
        }
    }

    /// Jump the center without animation, as a user drag does
    pub fn pan_by(&mut self, delta_lng: f64, delta_lat: f64) {
        self.transition = None;
        self.state.center = LatLng::new(
            LatLng::clamp_lat(self.state.center.lat + delta_lat),
            LatLng::wrap_lng(self.state.center.lng + delta_lng),
        );
        self.events.push_back(CameraEvent::Move);
    }

    /// Queue a pointer or touch interaction the way the engine would report it
    pub fn push_interaction(&mut self, source: InteractionSource) {
        if source.is_start() {
            self.events.push_back(CameraEvent::InteractionStart(source));
            // Grabbing the globe stops whatever ease is running.
            if self.transition.take().is_some() {
                self.events.push_back(CameraEvent::MoveEnd);
            }
        } else {
            self.events.push_back(CameraEvent::InteractionEnd(source));
        }
    }

    pub fn resize(&mut self, width: f64) {
        self.events.push_back(CameraEvent::Resize { width });
    }

    /// Take every queued event in emission order
    pub fn drain_events(&mut self) -> Vec<CameraEvent> {
        self.events.drain(..).collect()
    }
}

impl CameraHost for SimulatedCamera {
    fn center(&self) -> LatLng {
        self.state.center
    }

    fn ease_to(&mut self, request: EaseRequest) {
        // A new ease replaces the running one without a MoveEnd.
        self.transition = Some(CameraTransition::new(self.state.center, request));
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.state.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_emits_moves_then_move_end() {
        let mut camera = SimulatedCamera::new(CameraState::new(LatLng::default(), 2.0, 0.0));
        camera.ease_to(EaseRequest::new(
            LatLng::new(0.0, 3.0),
            Duration::from_millis(1000),
        ));

        camera.update(Duration::from_millis(400));
        assert_eq!(camera.drain_events(), vec![CameraEvent::Move]);

        camera.update(Duration::from_millis(600));
        assert_eq!(
            camera.drain_events(),
            vec![CameraEvent::Move, CameraEvent::MoveEnd]
        );
        assert_eq!(camera.center(), LatLng::new(0.0, 3.0));
        assert!(!camera.is_easing());
    }

    #[test]
    fn idle_update_emits_nothing() {
        let mut camera = SimulatedCamera::new(CameraState::new(LatLng::default(), 2.0, 0.0));
        camera.update(Duration::from_secs(5));
        assert!(camera.drain_events().is_empty());
    }

    #[test]
    fn center_wraps_after_crossing_antimeridian() {
        let mut camera =
            SimulatedCamera::new(CameraState::new(LatLng::new(10.0, 179.0), 2.0, 0.0));
        camera.ease_to(EaseRequest::new(
            LatLng::new(10.0, 182.0),
            Duration::from_millis(1000),
        ));
        camera.update(Duration::from_millis(1000));
        assert!((camera.center().lng + 178.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_respects_bounds() {
        let mut camera = SimulatedCamera::from_options(&CameraOptions::default(), 1.25);
        assert_eq!(camera.state().zoom, 2.5);
        camera.set_zoom(9.0);
        assert_eq!(camera.state().zoom, 4.8);
    }

    #[test]
    fn grabbing_interrupts_the_running_ease() {
        let mut camera = SimulatedCamera::new(CameraState::new(LatLng::default(), 2.0, 0.0));
        camera.ease_to(EaseRequest::new(
            LatLng::new(0.0, 3.0),
            Duration::from_millis(1000),
        ));
        camera.push_interaction(InteractionSource::PointerDown);
        assert!(!camera.is_easing());
        assert_eq!(
            camera.drain_events(),
            vec![
                CameraEvent::InteractionStart(InteractionSource::PointerDown),
                CameraEvent::MoveEnd
            ]
        );
    }
}

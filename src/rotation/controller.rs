use crate::core::config::GlobeOptions;
use crate::input::events::CameraEvent;
use crate::runtime::{Scheduler, TimerId};
use crate::traits::{CameraHost, EaseRequest};
use std::time::Duration;

/// Whether the globe is turning on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    Spinning,
    /// The user is interacting, or has just stopped and the idle delay is running
    Paused,
}

/// Auto-rotation state machine
///
/// Each spin is a single eased step of the camera longitude. The engine
/// reports the end of that ease as `MoveEnd`, which triggers the next step,
/// so rotation is paced by transition completion rather than by a free-running
/// loop. No step is issued while [`SpinState::Paused`].
#[derive(Debug, Clone)]
pub struct RotationController {
    state: SpinState,
    resume_timer: Option<TimerId>,
    enabled: bool,
    step_degrees: f64,
    step_duration: Duration,
    idle_resume: Duration,
    steps: u64,
}

impl RotationController {
    pub fn new(options: &GlobeOptions) -> Self {
        Self {
            state: SpinState::Spinning,
            resume_timer: None,
            enabled: options.spin_enabled,
            step_degrees: options.degrees_per_step(),
            step_duration: options.spin_step(),
            idle_resume: options.idle_resume(),
            steps: 0,
        }
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_interacting(&self) -> bool {
        self.state == SpinState::Paused
    }

    /// Resume timer waiting to fire, if any
    pub fn pending_resume(&self) -> Option<TimerId> {
        self.resume_timer
    }

    /// Number of spin steps issued so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }

    /// Issue the first spin step
    pub fn start<H: CameraHost>(&mut self, host: &mut H) {
        self.spin(host);
    }

    /// Route a camera event; `Move` and `Resize` are not the controller's concern
    pub fn handle_event<H, S>(&mut self, event: &CameraEvent, host: &mut H, scheduler: &mut S)
    where
        H: CameraHost,
        S: Scheduler,
    {
        match event {
            CameraEvent::InteractionStart(_) => self.interaction_start(scheduler),
            CameraEvent::InteractionEnd(_) => self.interaction_end(scheduler),
            CameraEvent::MoveEnd => self.on_move_end(host),
            CameraEvent::Move | CameraEvent::Resize { .. } => {}
        }
    }

    pub fn interaction_start<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.state != SpinState::Paused {
            log::debug!("rotation paused by interaction");
        }
        self.state = SpinState::Paused;
        self.cancel_resume(scheduler);
    }

    /// Re-arm the idle timer; only the most recent end signal counts
    pub fn interaction_end<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.cancel_resume(scheduler);
        let id = scheduler.set_timeout(self.idle_resume);
        log::debug!(
            "rotation resumes in {} ms unless interrupted ({:?})",
            self.idle_resume.as_millis(),
            id
        );
        self.resume_timer = Some(id);
    }

    /// Handle a fired timer; returns whether it was the pending resume timer
    pub fn on_timer<H: CameraHost>(&mut self, id: TimerId, host: &mut H) -> bool {
        if self.resume_timer != Some(id) {
            log::trace!("ignoring stale timer {:?}", id);
            return false;
        }

        self.resume_timer = None;
        self.state = SpinState::Spinning;
        log::debug!("rotation resumed after idle delay");
        self.spin(host);
        true
    }

    /// A transition came to rest; chain the next step unless the user holds the globe
    pub fn on_move_end<H: CameraHost>(&mut self, host: &mut H) {
        if self.state == SpinState::Spinning {
            self.spin(host);
        }
    }

    fn spin<H: CameraHost>(&mut self, host: &mut H) -> bool {
        if !self.enabled || self.state == SpinState::Paused {
            return false;
        }

        let mut center = host.center();
        center.lng += self.step_degrees;
        host.ease_to(EaseRequest::new(center, self.step_duration));
        self.steps += 1;
        true
    }

    fn cancel_resume<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.resume_timer.take() {
            scheduler.clear_timeout(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::{CameraState, SimulatedCamera};
    use crate::core::geo::LatLng;
    use crate::runtime::ManualScheduler;

    fn camera() -> SimulatedCamera {
        SimulatedCamera::new(CameraState::new(LatLng::new(0.0, 0.0), 2.0, 70.0))
    }

    #[test]
    fn starts_spinning_and_eases_three_degrees() {
        let mut host = camera();
        let mut rotation = RotationController::new(&GlobeOptions::default());
        assert_eq!(rotation.state(), SpinState::Spinning);

        rotation.start(&mut host);
        let transition = host.transition().unwrap();
        assert_eq!(transition.target(), LatLng::new(0.0, 3.0));
        assert_eq!(transition.remaining(), Duration::from_millis(1000));
        assert_eq!(rotation.steps(), 1);
    }

    #[test]
    fn start_signal_pauses_and_cancels_resume() {
        let mut host = camera();
        let mut scheduler = ManualScheduler::new();
        let mut rotation = RotationController::new(&GlobeOptions::default());

        rotation.interaction_end(&mut scheduler);
        let pending = rotation.pending_resume().unwrap();
        rotation.interaction_start(&mut scheduler);

        assert!(rotation.is_interacting());
        assert_eq!(rotation.pending_resume(), None);
        assert!(!scheduler.is_pending(pending));

        rotation.on_move_end(&mut host);
        assert!(!host.is_easing());
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut host = camera();
        let mut scheduler = ManualScheduler::new();
        let mut rotation = RotationController::new(&GlobeOptions::default());

        rotation.interaction_start(&mut scheduler);
        rotation.interaction_end(&mut scheduler);
        let first = rotation.pending_resume().unwrap();
        rotation.interaction_end(&mut scheduler);

        assert!(!rotation.on_timer(first, &mut host));
        assert!(rotation.is_interacting());
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn disabled_spin_tracks_interaction_only() {
        let mut host = camera();
        let mut scheduler = ManualScheduler::new();
        let options = GlobeOptions {
            spin_enabled: false,
            ..GlobeOptions::default()
        };
        let mut rotation = RotationController::new(&options);

        rotation.start(&mut host);
        assert!(!host.is_easing());

        rotation.interaction_start(&mut scheduler);
        rotation.interaction_end(&mut scheduler);
        let fired = scheduler.advance(Duration::from_millis(3000));
        assert!(rotation.on_timer(fired[0], &mut host));
        assert_eq!(rotation.state(), SpinState::Spinning);
        assert!(!host.is_easing());
        assert_eq!(rotation.steps(), 0);
    }
}

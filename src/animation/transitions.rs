use crate::animation::interpolation::EasingFunction;
use crate::core::geo::LatLng;
use crate::traits::{EaseRequest, Lerp};
use std::time::Duration;

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Running,
    Completed,
}

/// An eased move of the camera center, advanced by explicit frame deltas
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    from: LatLng,
    to: LatLng,
    duration: Duration,
    easing: EasingFunction,
    elapsed: Duration,
    state: TransitionState,
}

impl CameraTransition {
    pub fn new(from: LatLng, request: EaseRequest) -> Self {
        Self {
            from,
            to: request.center,
            duration: request.duration,
            easing: request.easing,
            elapsed: Duration::ZERO,
            state: TransitionState::Running,
        }
    }

    /// Advance by `delta` and return the interpolated center
    pub fn update(&mut self, delta: Duration) -> LatLng {
        if self.state == TransitionState::Completed {
            return self.to;
        }

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = TransitionState::Completed;
            return self.to;
        }

        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    /// Linear progress in [0, 1]; a zero-length transition is always complete
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Time left before the transition lands on its target
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == TransitionState::Completed
    }

    pub fn target(&self) -> LatLng {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_transition_hits_midpoint_and_target() {
        let request = EaseRequest::new(LatLng::new(0.0, 3.0), Duration::from_millis(1000));
        let mut transition = CameraTransition::new(LatLng::new(0.0, 0.0), request);

        let mid = transition.update(Duration::from_millis(500));
        assert!((mid.lng - 1.5).abs() < 1e-9);
        assert_eq!(transition.state(), TransitionState::Running);
        assert_eq!(transition.remaining(), Duration::from_millis(500));

        let end = transition.update(Duration::from_millis(600));
        assert_eq!(end, LatLng::new(0.0, 3.0));
        assert!(transition.is_complete());
        assert_eq!(transition.progress(), 1.0);
    }

    #[test]
    fn zero_duration_completes_on_first_update() {
        let request = EaseRequest::new(LatLng::new(10.0, 10.0), Duration::ZERO);
        let mut transition = CameraTransition::new(LatLng::default(), request);
        assert_eq!(transition.update(Duration::ZERO), LatLng::new(10.0, 10.0));
        assert!(transition.is_complete());
    }
}

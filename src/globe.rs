//! The globe component
//!
//! A [`Globe`] is the single owner of the rotation state, the placed markers
//! and the engine handles for one map view. Everything reaches it as a
//! [`CameraEvent`] or a fired [`TimerId`]; nothing it does blocks.

use crate::{
    core::{camera::SimulatedCamera, config::GlobeOptions, viewport::zoom_for_width},
    data::feature::Feature,
    input::events::CameraEvent,
    layers::{marker::MarkerElement, styler::MarkerStyler},
    rotation::controller::RotationController,
    runtime::{ManualScheduler, Scheduler, TimerId},
    traits::CameraHost,
    Result,
};
use std::time::Duration;

pub struct Globe<H, S, E> {
    host: H,
    scheduler: S,
    rotation: RotationController,
    styler: MarkerStyler<E>,
    options: GlobeOptions,
}

impl<H, S, E> Globe<H, S, E>
where
    H: CameraHost,
    S: Scheduler,
    E: MarkerElement,
{
    pub fn new(host: H, scheduler: S, options: GlobeOptions) -> Self {
        Self {
            rotation: RotationController::new(&options),
            styler: MarkerStyler::new(options.clone()),
            host,
            scheduler,
            options,
        }
    }

    /// Build a globe inside `container`; without a container this is a no-op
    pub fn mount<C, F>(
        container: Option<C>,
        options: GlobeOptions,
        build: F,
    ) -> Result<Option<Self>>
    where
        F: FnOnce(C, &GlobeOptions) -> Result<(H, S)>,
    {
        let Some(container) = container else {
            log::debug!("no globe container, skipping initialization");
            return Ok(None);
        };
        options.validate()?;
        let (host, scheduler) = build(container, &options)?;
        Ok(Some(Self::new(host, scheduler, options)))
    }

    /// Apply the viewport zoom and issue the first spin step
    pub fn start(&mut self, viewport_width: f64) {
        self.host.set_zoom(zoom_for_width(viewport_width, &self.options));
        self.rotation.start(&mut self.host);
    }

    /// Route an engine event to rotation, styling or zoom
    pub fn handle_event(&mut self, event: &CameraEvent) {
        match event {
            CameraEvent::Move => self.styler.update(&self.host),
            CameraEvent::Resize { width } => {
                let zoom = zoom_for_width(*width, &self.options);
                log::debug!("viewport {}px wide, zoom {:.3}", width, zoom);
                self.host.set_zoom(zoom);
            }
            _ => self
                .rotation
                .handle_event(event, &mut self.host, &mut self.scheduler),
        }
    }

    /// Deliver a fired timer
    pub fn on_timer(&mut self, id: TimerId) {
        self.rotation.on_timer(id, &mut self.host);
    }

    /// Place one marker per feature and style them for the current camera
    ///
    /// `create` asks the engine for a style target anchored at the feature;
    /// features it declines, or with invalid coordinates, are skipped.
    /// Returns the number of markers placed.
    pub fn place_markers<I, F>(&mut self, features: I, mut create: F) -> usize
    where
        I: IntoIterator<Item = Feature>,
        F: FnMut(&mut H, &Feature) -> Option<E>,
    {
        let mut placed = 0;
        for feature in features {
            if let Err(e) = feature.validate() {
                log::warn!("skipping feature: {}", e);
                continue;
            }
            let Some(element) = create(&mut self.host, &feature) else {
                log::warn!("engine declined marker for {}", feature.image);
                continue;
            };
            match self.styler.add(feature, element) {
                Ok(()) => placed += 1,
                Err(e) => log::warn!("skipping feature: {}", e),
            }
        }

        log::info!("placed {} markers", placed);
        self.styler.update(&self.host);
        placed
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn styler(&self) -> &MarkerStyler<E> {
        &self.styler
    }

    pub fn options(&self) -> &GlobeOptions {
        &self.options
    }
}

impl<E: MarkerElement> Globe<SimulatedCamera, ManualScheduler, E> {
    /// Run the simulated engine for one frame of `delta`
    ///
    /// Camera events from the frame are handled first, then any timers that
    /// came due.
    pub fn advance(&mut self, delta: Duration) {
        self.host.update(delta);
        self.dispatch_queued();

        for id in self.scheduler.advance(delta) {
            self.on_timer(id);
        }
    }

    /// Handle every event the simulated camera has queued
    pub fn dispatch_queued(&mut self) {
        for event in self.host.drain_events() {
            self.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::CameraState;
    use crate::core::geo::LatLng;
    use crate::layers::marker::MemoryElement;

    fn simulated(options: GlobeOptions) -> Globe<SimulatedCamera, ManualScheduler, MemoryElement> {
        let host = SimulatedCamera::new(CameraState::new(LatLng::new(0.0, 0.0), 2.0, 70.0));
        Globe::new(host, ManualScheduler::new(), options)
    }

    #[test]
    fn mount_without_container_is_a_no_op() {
        let globe: Option<Globe<SimulatedCamera, ManualScheduler, MemoryElement>> =
            Globe::mount(None::<()>, GlobeOptions::default(), |_, _| unreachable!()).unwrap();
        assert!(globe.is_none());
    }

    #[test]
    fn mount_with_container_builds_from_options() {
        let globe: Option<Globe<SimulatedCamera, ManualScheduler, MemoryElement>> =
            Globe::mount(Some(1280.0), GlobeOptions::default(), |width, options| {
                Ok((
                    SimulatedCamera::from_options(&options.camera, zoom_for_width(width, options)),
                    ManualScheduler::new(),
                ))
            })
            .unwrap();
        let globe = globe.unwrap();
        assert_eq!(globe.host().center(), LatLng::new(56.43, -96.4));
    }

    #[test]
    fn mount_rejects_invalid_options() {
        let options = GlobeOptions {
            revolution_seconds: -1.0,
            ..GlobeOptions::default()
        };
        let result: Result<Option<Globe<SimulatedCamera, ManualScheduler, MemoryElement>>> =
            Globe::mount(Some(()), options, |_, _| {
                let state = CameraState::new(LatLng::default(), 2.0, 0.0);
                Ok((SimulatedCamera::new(state), ManualScheduler::new()))
            });
        assert!(result.is_err());
    }

    #[test]
    fn resize_sets_zoom() {
        let mut globe = simulated(GlobeOptions::default());
        globe.handle_event(&CameraEvent::Resize { width: 1120.0 });
        assert!((globe.host().state().zoom - 2.375).abs() < 1e-12);
    }

    #[test]
    fn declined_and_invalid_features_are_skipped() {
        let mut globe = simulated(GlobeOptions::default());
        let features = vec![
            Feature::new("/a.jpg", "fr", "", "", 2.0, 48.0),
            Feature::new("/b.jpg", "fr", "", "", 2.0, 148.0),
            Feature::new("/skip.jpg", "fr", "", "", 3.0, 45.0),
        ];
        let placed = globe.place_markers(features, |_, feature| {
            (feature.image != "/skip.jpg").then(MemoryElement::new)
        });
        assert_eq!(placed, 1);
        assert_eq!(globe.styler().len(), 1);
        assert!(globe.styler().markers()[0].element().opacity.is_some());
    }
}

use crate::{
    core::{config::GlobeOptions, geo::LatLng},
    data::feature::Feature,
    layers::marker::{Marker, MarkerElement, MarkerStyle},
    traits::CameraHost,
    Result,
};

/// Owns the placed markers and restyles them from the camera center
///
/// Restyling is a pure recomputation: running it any number of times with the
/// same camera leaves every element in the same state.
pub struct MarkerStyler<E> {
    markers: Vec<Marker<E>>,
    options: GlobeOptions,
}

impl<E: MarkerElement> MarkerStyler<E> {
    pub fn new(options: GlobeOptions) -> Self {
        Self {
            markers: Vec::new(),
            options,
        }
    }

    /// Add a marker and apply its latitude stacking order
    ///
    /// Features outside the valid coordinate range are rejected.
    pub fn add(&mut self, feature: Feature, element: E) -> Result<()> {
        feature.validate()?;
        let mut marker = Marker::new(feature, element, &self.options);
        let z_index = marker.z_index();
        apply("z-index", marker.element_mut().set_z_index(z_index));
        self.markers.push(marker);
        Ok(())
    }

    pub fn markers(&self) -> &[Marker<E>] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Recompute and apply every marker's style for the host's current center
    pub fn update<H: CameraHost + ?Sized>(&mut self, host: &H) {
        if self.markers.is_empty() {
            return;
        }

        let center = host.center();
        for marker in &mut self.markers {
            let style = style_for(host, center, marker.position(), &self.options);

            let element = marker.element_mut();
            apply("blur", element.set_blur(style.blur_px));
            apply("opacity", element.set_opacity(style.opacity));
            apply("scale", element.set_scale(style.scale));
        }
    }
}

/// Style of a marker at `position` with the camera at `center`
fn style_for<H: CameraHost + ?Sized>(
    host: &H,
    center: LatLng,
    position: LatLng,
    options: &GlobeOptions,
) -> MarkerStyle {
    MarkerStyle::compute(
        host.distance_km(center, position),
        center.lng_separation(&position),
        options,
    )
}

fn apply(property: &str, result: Result<()>) {
    if let Err(e) = result {
        log::warn!("skipping marker {}: {}", property, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::{CameraState, SimulatedCamera};
    use crate::layers::marker::MemoryElement;
    use crate::GlobeError;

    fn feature(lng: f64, lat: f64) -> Feature {
        Feature::new("/listing.jpg", "fr", "$100", "Cabin", lng, lat)
    }

    fn host_at(lng: f64, lat: f64) -> SimulatedCamera {
        SimulatedCamera::new(CameraState::new(LatLng::new(lat, lng), 2.0, 0.0))
    }

    #[test]
    fn update_is_idempotent() {
        let mut styler = MarkerStyler::new(GlobeOptions::default());
        styler.add(feature(10.0, 20.0), MemoryElement::new()).unwrap();
        styler.add(feature(-40.0, 50.0), MemoryElement::new()).unwrap();

        let host = host_at(0.0, 30.0);
        styler.update(&host);
        let first: Vec<MemoryElement> = styler.markers().iter().map(|m| m.element().clone()).collect();
        styler.update(&host);
        styler.update(&host);
        let again: Vec<MemoryElement> = styler.markers().iter().map(|m| m.element().clone()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn missing_target_skips_only_that_mutation() {
        let mut styler = MarkerStyler::new(GlobeOptions::default());
        styler
            .add(feature(0.0, 0.0), MemoryElement::without_wrap())
            .unwrap();
        styler.update(&host_at(0.0, 0.0));

        let element = styler.markers()[0].element();
        assert_eq!(element.blur_px, None);
        assert_eq!(element.opacity, None);
        assert_eq!(element.scale, Some(1.0));
        assert_eq!(element.z_index, Some(1000));
    }

    #[test]
    fn rejects_out_of_range_features() {
        let mut styler = MarkerStyler::new(GlobeOptions::default());
        let result = styler.add(feature(200.0, 0.0), MemoryElement::new());
        assert!(matches!(result, Err(GlobeError::InvalidCoordinates(_))));
        assert!(styler.is_empty());
    }

    #[test]
    fn empty_styler_does_nothing() {
        let mut styler: MarkerStyler<MemoryElement> = MarkerStyler::new(GlobeOptions::default());
        styler.update(&host_at(0.0, 0.0));
        assert_eq!(styler.len(), 0);
    }

    #[test]
    fn far_side_markers_are_hidden() {
        let mut styler = MarkerStyler::new(GlobeOptions::default());
        styler.add(feature(61.0, 0.0), MemoryElement::new()).unwrap();
        styler.add(feature(59.0, 0.0), MemoryElement::new()).unwrap();
        styler.update(&host_at(0.0, 0.0));

        assert_eq!(styler.markers()[0].element().opacity, Some(0.0));
        assert_eq!(styler.markers()[1].element().opacity, Some(1.0));
    }
}

use crate::{
    core::{config::GlobeOptions, geo::LatLng},
    data::feature::Feature,
    GlobeError, Result,
};
use serde::{Deserialize, Serialize};

/// Style target of a placed marker
///
/// Each setter is independent: an element missing one of its style targets
/// returns [`GlobeError::MissingStyleTarget`] for that setter only.
pub trait MarkerElement {
    /// Blur radius in pixels applied to the marker body
    fn set_blur(&mut self, radius_px: f64) -> Result<()>;

    /// Opacity of the marker body
    fn set_opacity(&mut self, opacity: f64) -> Result<()>;

    /// Visual scale of the listing card
    fn set_scale(&mut self, scale: f64) -> Result<()>;

    /// Stacking order of the whole marker
    fn set_z_index(&mut self, z_index: i32) -> Result<()>;
}

/// Distance-derived visual state of a marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub distance_km: f64,
    pub blur_px: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl MarkerStyle {
    /// Style for a marker at `distance_km` from the camera and `lng_separation`
    /// degrees of longitude away from it
    pub fn compute(distance_km: f64, lng_separation: f64, options: &GlobeOptions) -> Self {
        let clamp = options.clamp_interpolation;
        Self {
            distance_km,
            blur_px: options.blur_range.map(distance_km, clamp),
            opacity: if lng_separation > options.longitude_cutoff_deg {
                0.0
            } else {
                1.0
            },
            scale: options.scale_range.map(distance_km, clamp),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity == 0.0
    }
}

/// CSS declarations a DOM style target writes, as `(property, value)`
pub mod css {
    pub fn blur(radius_px: f64) -> (&'static str, String) {
        ("filter", format!("blur({}px)", radius_px))
    }

    pub fn opacity(opacity: f64) -> (&'static str, String) {
        ("opacity", opacity.to_string())
    }

    /// The standalone `scale` property, so stylesheet transforms survive
    pub fn scale(scale: f64) -> (&'static str, String) {
        ("scale", scale.to_string())
    }

    pub fn z_index(z_index: i32) -> (&'static str, String) {
        ("z-index", z_index.to_string())
    }
}

/// Stacking order for a marker at `lat`, nearer the equator in front
pub fn z_index_for_latitude(lat: f64, options: &GlobeOptions) -> i32 {
    options
        .z_index_range
        .map(lat, options.clamp_interpolation)
        .floor() as i32
}

/// A placed feature paired with its style target
pub struct Marker<E> {
    feature: Feature,
    position: LatLng,
    z_index: i32,
    element: E,
}

impl<E: MarkerElement> Marker<E> {
    pub fn new(feature: Feature, element: E, options: &GlobeOptions) -> Self {
        let position = feature.position();
        Self {
            z_index: z_index_for_latitude(position.lat, options),
            feature,
            position,
            element,
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }
}

/// In-memory style target, for headless use and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryElement {
    pub blur_px: Option<f64>,
    pub opacity: Option<f64>,
    pub scale: Option<f64>,
    pub z_index: Option<i32>,
    has_wrap: bool,
    has_card: bool,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self {
            has_wrap: true,
            has_card: true,
            ..Self::default()
        }
    }

    /// Element whose `.wrap` target (blur and opacity) is absent
    pub fn without_wrap() -> Self {
        Self {
            has_wrap: false,
            ..Self::new()
        }
    }

    /// Element whose `.card` target (scale) is absent
    pub fn without_card() -> Self {
        Self {
            has_card: false,
            ..Self::new()
        }
    }
}

impl MarkerElement for MemoryElement {
    fn set_blur(&mut self, radius_px: f64) -> Result<()> {
        if !self.has_wrap {
            return Err(GlobeError::MissingStyleTarget(".wrap"));
        }
        self.blur_px = Some(radius_px);
        Ok(())
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<()> {
        if !self.has_wrap {
            return Err(GlobeError::MissingStyleTarget(".wrap"));
        }
        self.opacity = Some(opacity);
        Ok(())
    }

    fn set_scale(&mut self, scale: f64) -> Result<()> {
        if !self.has_card {
            return Err(GlobeError::MissingStyleTarget(".card"));
        }
        self.scale = Some(scale);
        Ok(())
    }

    fn set_z_index(&mut self, z_index: i32) -> Result<()> {
        self.z_index = Some(z_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_saturates_when_clamped() {
        let options = GlobeOptions::default();
        for d in [0.0, 1500.0, 3000.0] {
            assert_eq!(MarkerStyle::compute(d, 0.0, &options).blur_px, 0.0);
        }
        for d in [10_000.0, 12_000.0, 20_000.0] {
            assert_eq!(MarkerStyle::compute(d, 0.0, &options).blur_px, 10.0);
        }
        let mid = MarkerStyle::compute(6500.0, 0.0, &options);
        assert!((mid.blur_px - 5.0).abs() < 1e-12);
        assert!((mid.scale - 0.675).abs() < 1e-12);
    }

    #[test]
    fn unclamped_styles_extrapolate() {
        let options = GlobeOptions {
            clamp_interpolation: false,
            ..GlobeOptions::default()
        };
        let far = MarkerStyle::compute(17_000.0, 0.0, &options);
        assert!((far.blur_px - 20.0).abs() < 1e-9);
        assert!((far.scale - 0.15).abs() < 1e-9);
        assert!((MarkerStyle::compute(0.0, 0.0, &options).blur_px + 30.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn opacity_cuts_off_past_sixty_degrees() {
        let options = GlobeOptions::default();
        assert!(MarkerStyle::compute(0.0, 61.0, &options).is_hidden());
        assert_eq!(MarkerStyle::compute(0.0, 59.0, &options).opacity, 1.0);
        assert_eq!(MarkerStyle::compute(0.0, 60.0, &options).opacity, 1.0);
    }

    #[test]
    fn z_index_never_increases_with_latitude() {
        let options = GlobeOptions::default();
        let mut previous = i32::MAX;
        for step in 0..=180 {
            let z = z_index_for_latitude(step as f64 * 0.5, &options);
            assert!(z <= previous);
            previous = z;
        }
        assert_eq!(z_index_for_latitude(0.0, &options), 1000);
        assert_eq!(z_index_for_latitude(90.0, &options), 0);
        assert_eq!(z_index_for_latitude(45.5, &options), 494);
    }

    #[test]
    fn css_declarations() {
        assert_eq!(css::blur(2.5), ("filter", "blur(2.5px)".to_string()));
        assert_eq!(css::blur(0.0), ("filter", "blur(0px)".to_string()));
        assert_eq!(css::opacity(0.0), ("opacity", "0".to_string()));
        assert_eq!(css::scale(0.75), ("scale", "0.75".to_string()));
        assert_eq!(css::z_index(494), ("z-index", "494".to_string()));
    }

    #[test]
    fn memory_element_reports_missing_targets() {
        let mut element = MemoryElement::without_wrap();
        assert!(matches!(
            element.set_blur(1.0),
            Err(GlobeError::MissingStyleTarget(".wrap"))
        ));
        element.set_scale(0.8).unwrap();
        assert_eq!(element.scale, Some(0.8));
    }
}

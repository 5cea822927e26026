use crate::core::config::GlobeOptions;

/// Zoom level for a viewport `width` in CSS pixels
///
/// Always clamped, so phones and ultra-wide screens stay within the designed
/// extremes whatever `clamp_interpolation` says about marker styling.
pub fn zoom_for_width(width: f64, options: &GlobeOptions) -> f64 {
    options.zoom_range.map(width, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_follows_viewport_width() {
        let options = GlobeOptions::default();
        assert_eq!(zoom_for_width(320.0, &options), 1.25);
        assert_eq!(zoom_for_width(1920.0, &options), 3.5);
        assert!((zoom_for_width(1120.0, &options) - 2.375).abs() < 1e-12);
    }

    #[test]
    fn zoom_is_clamped_outside_the_band() {
        let options = GlobeOptions {
            clamp_interpolation: false,
            ..GlobeOptions::default()
        };
        assert_eq!(zoom_for_width(100.0, &options), 1.25);
        assert_eq!(zoom_for_width(3840.0, &options), 3.5);
    }
}

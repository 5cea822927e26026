//! Configuration for the globe's rotation, marker styling and camera
//!
//! Options resolve from a [`GlobeProfile`] preset or deserialize from JSON,
//! with every field falling back to the shipped default.

use crate::animation::interpolation::RangeMap;
use crate::constants::*;
use crate::{GlobeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum GlobeProfile {
    /// Shipped behavior: spinning, clamped styling
    Standard,
    /// Unclamped styling, as the first iterations of the widget shipped
    Legacy,
    /// Markers styled, rotation disabled
    Still,
    Custom(GlobeOptions),
}

impl GlobeProfile {
    pub fn resolve(&self) -> GlobeOptions {
        match self {
            Self::Standard => GlobeOptions::default(),
            Self::Legacy => GlobeOptions {
                clamp_interpolation: false,
                ..GlobeOptions::default()
            },
            Self::Still => GlobeOptions {
                spin_enabled: false,
                ..GlobeOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for GlobeProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeOptions {
    pub spin_enabled: bool,
    pub revolution_seconds: f64,
    pub idle_resume_ms: u64,
    pub spin_step_ms: u64,
    pub blur_range: RangeMap,
    pub scale_range: RangeMap,
    pub z_index_range: RangeMap,
    pub longitude_cutoff_deg: f64,
    pub zoom_range: RangeMap,
    pub clamp_interpolation: bool,
    pub camera: CameraOptions,
    pub assets: AssetConfig,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            spin_enabled: true,
            revolution_seconds: SECONDS_PER_REVOLUTION,
            idle_resume_ms: IDLE_RESUME_MS,
            spin_step_ms: SPIN_STEP_MS,
            blur_range: RangeMap::new(BLUR_DISTANCE_KM, BLUR_RADIUS_PX),
            scale_range: RangeMap::new(SCALE_DISTANCE_KM, SCALE_FACTOR),
            z_index_range: RangeMap::new(Z_INDEX_LATITUDE, Z_INDEX_ORDER),
            longitude_cutoff_deg: LONGITUDE_CUTOFF_DEG,
            zoom_range: RangeMap::new(VIEWPORT_WIDTH_PX, VIEWPORT_ZOOM),
            clamp_interpolation: true,
            camera: CameraOptions::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl GlobeOptions {
    /// Parse options from JSON and validate them
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.revolution_seconds.is_finite() && self.revolution_seconds > 0.0) {
            return Err(GlobeError::InvalidConfig(format!(
                "revolutionSeconds must be positive, got {}",
                self.revolution_seconds
            )));
        }
        if self.spin_step_ms == 0 {
            return Err(GlobeError::InvalidConfig(
                "spinStepMs must be non-zero".to_string(),
            ));
        }
        for (name, range) in [
            ("blurRange", &self.blur_range),
            ("scaleRange", &self.scale_range),
            ("zIndexRange", &self.z_index_range),
            ("zoomRange", &self.zoom_range),
        ] {
            if range.is_degenerate() {
                return Err(GlobeError::InvalidConfig(format!(
                    "{name} has an empty input band [{}, {}]",
                    range.in_min, range.in_max
                )));
            }
        }
        if self.longitude_cutoff_deg.is_nan() || self.longitude_cutoff_deg < 0.0 {
            return Err(GlobeError::InvalidConfig(format!(
                "longitudeCutoffDeg must be non-negative, got {}",
                self.longitude_cutoff_deg
            )));
        }
        self.camera.validate()
    }

    /// Degrees of longitude covered by one spin step
    pub fn degrees_per_step(&self) -> f64 {
        let step_seconds = self.spin_step_ms as f64 / 1000.0;
        360.0 / self.revolution_seconds * step_seconds
    }

    pub fn spin_step(&self) -> Duration {
        Duration::from_millis(self.spin_step_ms)
    }

    pub fn idle_resume(&self) -> Duration {
        Duration::from_millis(self.idle_resume_ms)
    }
}

/// Camera and gesture settings handed to the map engine at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraOptions {
    pub style_url: String,
    pub projection: String,
    /// `[lng, lat]`
    pub center: [f64; 2],
    pub pitch: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub scroll_zoom: bool,
    pub box_zoom: bool,
    pub double_click_zoom: bool,
    pub drag_rotate: bool,
    pub touch_pitch: bool,
    pub compact_attribution: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            style_url: DEFAULT_STYLE_URL.to_string(),
            projection: "globe".to_string(),
            center: [INITIAL_CENTER.0, INITIAL_CENTER.1],
            pitch: INITIAL_PITCH,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            scroll_zoom: false,
            box_zoom: false,
            double_click_zoom: false,
            drag_rotate: false,
            touch_pitch: false,
            compact_attribution: true,
        }
    }
}

impl CameraOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(GlobeError::InvalidConfig(format!(
                "minZoom {} exceeds maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        let [lng, lat] = self.center;
        if !crate::core::geo::LatLng::from_lng_lat(lng, lat).is_valid() {
            return Err(GlobeError::InvalidCoordinates(format!(
                "camera center [{lng}, {lat}]"
            )));
        }
        Ok(())
    }

    pub fn initial_center(&self) -> crate::core::geo::LatLng {
        crate::core::geo::LatLng::from_lng_lat(self.center[0], self.center[1])
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// Where marker images, flags and listing data are served from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetConfig {
    pub asset_root: String,
    pub data_path: String,
    pub access_token: Option<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: String::new(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            access_token: None,
        }
    }
}

impl AssetConfig {
    /// Read `SPINGLOBE_ASSET_ROOT`, `SPINGLOBE_DATA_PATH` and
    /// `MAPBOX_ACCESS_TOKEN`, keeping defaults for unset variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(root) = std::env::var("SPINGLOBE_ASSET_ROOT") {
            config.asset_root = root;
        }
        if let Ok(path) = std::env::var("SPINGLOBE_DATA_PATH") {
            config.data_path = path;
        }
        config.access_token = std::env::var("MAPBOX_ACCESS_TOKEN").ok();
        config
    }

    pub fn asset_root(&self) -> crate::data::assets::AssetRoot {
        crate::data::assets::AssetRoot::new(&self.asset_root)
    }

    /// URL of the listing data file
    pub fn data_url(&self) -> String {
        self.asset_root().join(&self.data_path)
    }

    /// Absolute data URL, with a relative asset root resolved against `base`
    ///
    /// In a browser `base` is the page URL, so `/assets` and the empty root
    /// point at the page's own origin.
    pub fn resolve_data_url(&self, base: &str) -> Result<String> {
        let invalid = |e: String| {
            GlobeError::InvalidConfig(format!("data url against {}: {}", base, e))
        };
        let base_url = reqwest::Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        let url = base_url
            .join(&self.data_url())
            .map_err(|e| invalid(e.to_string()))?;
        Ok(url.to_string())
    }
}

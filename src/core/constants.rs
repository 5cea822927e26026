//! Core constants matching the globe widget's shipped defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Seconds for one full revolution of the globe.
pub const SECONDS_PER_REVOLUTION: f64 = 120.0;

/// Idle time after the last interaction before spinning resumes.
pub const IDLE_RESUME_MS: u64 = 3000;

/// Duration of each chained spin transition.
pub const SPIN_STEP_MS: u64 = 1000;

/// Markers whose longitude differs from the camera by more than this are hidden.
pub const LONGITUDE_CUTOFF_DEG: f64 = 60.0;

/// Distance band (km) over which markers go from sharp to fully blurred.
pub const BLUR_DISTANCE_KM: (f64, f64) = (3000.0, 10000.0);

/// Blur radius band in pixels.
pub const BLUR_RADIUS_PX: (f64, f64) = (0.0, 10.0);

/// Distance band (km) over which markers shrink.
pub const SCALE_DISTANCE_KM: (f64, f64) = (0.0, 10000.0);

/// Visual scale band, nearest first.
pub const SCALE_FACTOR: (f64, f64) = (1.0, 0.5);

/// Latitude band used for stacking order.
pub const Z_INDEX_LATITUDE: (f64, f64) = (0.0, 90.0);

/// Stacking order band, equator first.
pub const Z_INDEX_ORDER: (f64, f64) = (1000.0, 0.0);

/// Viewport width band in CSS pixels.
pub const VIEWPORT_WIDTH_PX: (f64, f64) = (320.0, 1920.0);

/// Zoom band matched to the viewport width band.
pub const VIEWPORT_ZOOM: (f64, f64) = (1.25, 3.5);

/// Initial camera center as `(lng, lat)`.
pub const INITIAL_CENTER: (f64, f64) = (-96.4, 56.43);

/// Initial camera pitch in degrees.
pub const INITIAL_PITCH: f64 = 70.0;

pub const MIN_ZOOM: f64 = 2.5;
pub const MAX_ZOOM: f64 = 4.8;

/// Basemap style used by the browser bootstrap.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/rhome/cm1z8z3e300sg01pbeyd966ey";

/// Listing data file, relative to the asset root.
pub const DEFAULT_DATA_PATH: &str = "data.json";

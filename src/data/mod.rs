pub mod assets;
pub mod feature;
pub mod source;

pub use assets::{AssetRoot, MarkerMarkup};
pub use feature::Feature;
pub use source::{load_features, DataSource, HttpSource, StaticSource};

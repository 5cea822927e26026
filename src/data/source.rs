use crate::core::config::AssetConfig;
use crate::data::feature::Feature;
use crate::{GlobeError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;

/// Shared HTTP client; building it once keeps the connection pool alive
/// across reloads.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Anything that can produce the listing features
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DataSource {
    async fn fetch(&self) -> Result<Vec<Feature>>;
}

/// Features bundled with the application
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    features: Vec<Feature>,
}

impl StaticSource {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(Feature::list_from_json(json)?))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DataSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Feature>> {
        Ok(self.features.clone())
    }
}

/// One-shot GET of a JSON feature array
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Source for `{asset_root}/{data_path}`
    pub fn from_assets(assets: &AssetConfig) -> Self {
        Self::new(assets.data_url())
    }

    /// Source for the asset data file, resolved against the page at `base`
    pub fn from_assets_at(assets: &AssetConfig, base: &str) -> Result<Self> {
        Ok(Self::new(assets.resolve_data_url(base)?))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Feature>> {
        let started = instant::Instant::now();
        let response = HTTP_CLIENT.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GlobeError::HttpStatus(status.as_u16()));
        }

        let features: Vec<Feature> = response.json().await?;
        log::info!(
            "fetched {} features from {} in {:?}",
            features.len(),
            self.url,
            started.elapsed()
        );
        Ok(features)
    }
}

/// Fetch features, logging any failure and yielding `None` so the globe keeps
/// spinning without markers
pub async fn load_features<S: DataSource + ?Sized>(source: &S) -> Option<Vec<Feature>> {
    match source.fetch().await {
        Ok(features) => Some(features),
        Err(e) => {
            log::error!("failed to load features: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_returns_its_features() {
        let source = StaticSource::from_json(
            r#"[{"image": "/a.jpg", "country": "pt", "price": "€90", "type": "Flat", "lng": -9.14, "lat": 38.72}]"#,
        )
        .unwrap();
        let features = futures::executor::block_on(load_features(&source)).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].country, "pt");
    }

    #[test]
    fn http_source_uses_asset_root() {
        let assets = AssetConfig {
            asset_root: "https://cdn.example.com".to_string(),
            ..AssetConfig::default()
        };
        assert_eq!(
            HttpSource::from_assets(&assets).url(),
            "https://cdn.example.com/data.json"
        );
    }

    #[test]
    fn http_source_resolves_relative_root() {
        let assets = AssetConfig {
            asset_root: "/assets".to_string(),
            ..AssetConfig::default()
        };
        let source = HttpSource::from_assets_at(&assets, "http://localhost:5173/").unwrap();
        assert_eq!(source.url(), "http://localhost:5173/assets/data.json");
    }

    #[tokio::test]
    async fn unreachable_source_yields_none() {
        // Port 9 (discard) on loopback refuses connections.
        let source = HttpSource::new("http://127.0.0.1:9/data.json");
        assert!(load_features(&source).await.is_none());
    }
}

use crate::core::geo::LatLng;
use crate::{GlobeError, Result};
use serde::{Deserialize, Serialize};

/// A listing shown on the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Image path relative to the asset root
    pub image: String,
    /// Country code naming the flag asset
    pub country: String,
    pub price: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lng: f64,
    pub lat: f64,
}

impl Feature {
    pub fn new(
        image: impl Into<String>,
        country: impl Into<String>,
        price: impl Into<String>,
        kind: impl Into<String>,
        lng: f64,
        lat: f64,
    ) -> Self {
        Self {
            url: None,
            image: image.into(),
            country: country.into(),
            price: price.into(),
            kind: kind.into(),
            lng,
            lat,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::from_lng_lat(self.lng, self.lat)
    }

    pub fn validate(&self) -> Result<()> {
        if self.position().is_valid() {
            Ok(())
        } else {
            Err(GlobeError::InvalidCoordinates(format!(
                "feature {} at [{}, {}]",
                self.image, self.lng, self.lat
            )))
        }
    }

    /// Parse a JSON array of features
    pub fn list_from_json(json: &str) -> Result<Vec<Feature>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_records() {
        let json = r#"[
            {"image": "/a.jpg", "country": "jp", "price": "¥9000", "type": "Ryokan", "lng": 135.77, "lat": 35.01},
            {"url": "https://example.com/l/2", "image": "/b.jpg", "country": "is", "price": "$240", "type": "Cabin", "lng": -21.9, "lat": 64.1}
        ]"#;
        let features = Feature::list_from_json(json).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].kind, "Ryokan");
        assert_eq!(features[0].url, None);
        assert_eq!(features[1].url.as_deref(), Some("https://example.com/l/2"));
        assert_eq!(features[1].position(), LatLng::new(64.1, -21.9));
    }

    #[test]
    fn missing_field_is_an_error() {
        let json = r#"[{"image": "/a.jpg", "country": "jp", "lng": 1.0, "lat": 2.0}]"#;
        assert!(matches!(
            Feature::list_from_json(json),
            Err(GlobeError::Serialization(_))
        ));
    }

    #[test]
    fn validates_coordinates() {
        assert!(Feature::new("/a.jpg", "fr", "", "", 2.35, 48.85).validate().is_ok());
        assert!(Feature::new("/a.jpg", "fr", "", "", 2.35, 91.0).validate().is_err());
    }
}

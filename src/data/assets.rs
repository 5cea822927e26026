//! Asset URLs and marker markup
//!
//! Marker images live at `{root}/{image}` and flags at
//! `{root}/flags/{country}.svg`. An unknown country code produces a broken
//! flag image, nothing worse.

use crate::data::feature::Feature;

/// Base URL every asset path is joined onto
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetRoot {
    root: String,
}

impl AssetRoot {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// Join a relative path onto the root with exactly one slash between
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    pub fn image_url(&self, feature: &Feature) -> String {
        self.join(&feature.image)
    }

    pub fn flag_url(&self, feature: &Feature) -> String {
        self.join(&format!("flags/{}.svg", feature.country))
    }
}

/// DOM description of a marker: the outer element and its inner HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMarkup {
    /// `a` when the listing links somewhere, otherwise `div`
    pub tag: &'static str,
    pub href: Option<String>,
    pub class_name: &'static str,
    pub inner_html: String,
}

impl MarkerMarkup {
    pub const CLASS_NAME: &'static str = "marker";

    /// Map engines anchor the marker at this edge of the element
    pub const ANCHOR: &'static str = "bottom";

    pub fn for_feature(feature: &Feature, assets: &AssetRoot) -> Self {
        let inner_html = format!(
            r#"<div class="wrap"><div class="scale"><div class="card"><img src="{image}" alt="" /><div class="details"><span>{price}</span><span>{kind}</span></div></div></div><div class="flag"><img src="{flag}" alt="" /></div></div>"#,
            image = escape_html(&assets.image_url(feature)),
            price = escape_html(&feature.price),
            kind = escape_html(&feature.kind),
            flag = escape_html(&assets.flag_url(feature)),
        );

        Self {
            tag: if feature.url.is_some() { "a" } else { "div" },
            href: feature.url.clone(),
            class_name: Self::CLASS_NAME,
            inner_html,
        }
    }

    /// Links open in a new tab
    pub fn target(&self) -> Option<&'static str> {
        self.href.as_ref().map(|_| "_blank")
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cabin() -> Feature {
        Feature::new("/listings/cabin.jpg", "no", "$180", "Cabin", 10.7, 59.9)
    }

    #[test]
    fn joins_with_a_single_slash() {
        let root = AssetRoot::new("https://cdn.example.com/globe/");
        assert_eq!(
            root.image_url(&cabin()),
            "https://cdn.example.com/globe/listings/cabin.jpg"
        );
        assert_eq!(
            root.flag_url(&cabin()),
            "https://cdn.example.com/globe/flags/no.svg"
        );
        assert_eq!(AssetRoot::new("").join("data.json"), "/data.json");
    }

    #[test]
    fn plain_listing_renders_div() {
        let markup = MarkerMarkup::for_feature(&cabin(), &AssetRoot::new("/assets"));
        assert_eq!(markup.tag, "div");
        assert_eq!(markup.href, None);
        assert_eq!(markup.target(), None);
        assert!(markup.inner_html.contains(r#"<img src="/assets/listings/cabin.jpg" alt="" />"#));
        assert!(markup.inner_html.contains(r#"<img src="/assets/flags/no.svg" alt="" />"#));
        for class in ["wrap", "scale", "card", "details", "flag"] {
            assert!(markup.inner_html.contains(&format!(r#"class="{class}""#)));
        }
    }

    #[test]
    fn linked_listing_renders_anchor() {
        let feature = cabin().with_url("https://example.com/l/7");
        let markup = MarkerMarkup::for_feature(&feature, &AssetRoot::new("/assets"));
        assert_eq!(markup.tag, "a");
        assert_eq!(markup.href.as_deref(), Some("https://example.com/l/7"));
        assert_eq!(markup.target(), Some("_blank"));
    }

    #[test]
    fn escapes_listing_text() {
        let mut feature = cabin();
        feature.price = "<b>$1</b>".to_string();
        feature.kind = "Tom & Jerry's \"house\"".to_string();
        let markup = MarkerMarkup::for_feature(&feature, &AssetRoot::new("/assets"));
        assert!(markup.inner_html.contains("&lt;b&gt;$1&lt;/b&gt;"));
        assert!(markup.inner_html.contains("Tom &amp; Jerry&#39;s &quot;house&quot;"));
        assert!(!markup.inner_html.contains("<b>"));
    }
}

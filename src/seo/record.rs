//! Page metadata record.
//!
//! Serializes to the camelCase shape head renderers and JS frameworks
//! expect (`openGraph.siteName`, `robots.googleBot["max-snippet"]`, ...).
//! Fallback records only carry `title` and `description`; everything else
//! is skipped when absent.

use serde::Serialize;

/// `max-image-preview` value: full-size previews allowed.
const LARGE_IMAGE_PREVIEW: &str = "large";

/// SEO and social-sharing fields for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<Robots>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<Twitter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternates: Option<Alternates>,
}

impl MetadataRecord {
    /// Record with only title and description.
    pub fn fallback(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Canonical URL, if any.
    pub fn canonical(&self) -> Option<&str> {
        self.alternates.as_ref().map(|a| a.canonical.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// Crawler directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub google_bot: GoogleBot,
}

impl Robots {
    /// Indexable, followable, no preview limits.
    pub fn open() -> Self {
        Self {
            index: true,
            follow: true,
            google_bot: GoogleBot {
                index: true,
                follow: true,
                max_video_preview: -1,
                max_image_preview: LARGE_IMAGE_PREVIEW,
                max_snippet: -1,
            },
        }
    }
}

/// Googlebot-specific directives; `-1` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    #[serde(rename = "max-video-preview")]
    pub max_video_preview: i32,
    #[serde(rename = "max-image-preview")]
    pub max_image_preview: &'static str,
    #[serde(rename = "max-snippet")]
    pub max_snippet: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub images: Vec<OgImage>,
    pub site_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Twitter {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub creator: String,
    pub site: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternates {
    pub canonical: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fallback_serializes_two_fields() {
        let record = MetadataRecord::fallback("T", "D");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"title": "T", "description": "D"}));
        assert!(record.canonical().is_none());
    }

    #[test]
    fn test_robots_wire_names() {
        let value = serde_json::to_value(Robots::open()).unwrap();
        assert_eq!(
            value,
            json!({
                "index": true,
                "follow": true,
                "googleBot": {
                    "index": true,
                    "follow": true,
                    "max-video-preview": -1,
                    "max-image-preview": "large",
                    "max-snippet": -1
                }
            })
        );
    }

    #[test]
    fn test_open_graph_wire_names() {
        let og = OpenGraph {
            title: "T".into(),
            description: "D".into(),
            kind: "article".into(),
            url: "https://example.com/blog/t".into(),
            published_time: None,
            authors: vec!["A".into()],
            tags: vec![],
            images: vec![],
            site_name: "Example".into(),
        };
        let value = serde_json::to_value(og).unwrap();
        assert_eq!(value["type"], "article");
        assert_eq!(value["siteName"], "Example");
        assert!(value.get("publishedTime").is_none());
    }
}

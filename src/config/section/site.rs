//! `[site]` section configuration.
//!
//! The site-wide values every page's metadata is built from.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.com"
//! name = "Example"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Canonical base URL and display name of the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site URL without trailing slash (e.g., "https://example.com").
    /// Canonical URLs are built by appending the route to it verbatim.
    pub url: Option<String>,

    /// Site name, used for `og:site_name`.
    pub name: String,
}

impl SiteInfoConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const NAME: FieldPath = FieldPath::new("site.name");

    /// Base URL, empty when not configured.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// Drop trailing slashes so `url + "/blog/" + slug` never doubles them.
    pub fn normalize(&mut self) {
        if let Some(url) = self.url.as_mut() {
            let trimmed = url.trim_end_matches('/').len();
            url.truncate(trimmed);
        }
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be set
    /// - `url` must be a valid http(s) URL with a host
    /// - `name` should not be empty (warning)
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match &self.url {
            None => diag.error_with_hint(
                Self::URL,
                "site URL is required to build canonical URLs",
                format!("set {}, e.g.: \"https://example.com\"", Self::URL),
            ),
            Some(url_str) => match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            Self::URL,
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            Self::URL,
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {}", e),
                    "use format like https://example.com",
                ),
            },
        }

        if self.name.trim().is_empty() {
            diag.warn(Self::NAME, "site name is empty, og:site_name will be blank");
        }
    }
}

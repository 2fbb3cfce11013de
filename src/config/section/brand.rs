//! `[brand]` section configuration.
//!
//! Fixed values stamped onto every post's metadata.
//!
//! # Example
//!
//! ```toml
//! [brand]
//! name = "Magic UI"
//! twitter = "@dillionverma"
//! keywords = ["Blog", "Artikel", "Teknologi", "Trading", "Forex", "Crypto", "Money"]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Keywords appended after a post's own title and tags.
pub const DEFAULT_KEYWORDS: [&str; 7] = [
    "Blog",
    "Artikel",
    "Teknologi",
    "Trading",
    "Forex",
    "Crypto",
    "Money",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Publisher, and author when a post names none.
    pub name: String,

    /// Twitter handle for `twitter:creator` and `twitter:site`.
    pub twitter: String,

    /// Keywords appended to every post, in order.
    pub keywords: Vec<String>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "Magic UI".into(),
            twitter: "@dillionverma".into(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl BrandConfig {
    pub const TWITTER: FieldPath = FieldPath::new("brand.twitter");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.twitter.is_empty() && !self.twitter.starts_with('@') {
            diag.warn(
                Self::TWITTER,
                format!("handle '{}' does not start with '@'", self.twitter),
            );
        }
    }
}

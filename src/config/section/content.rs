//! `[content]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [content]
//! dir = "content/blog"   # Post directory, relative to blogmeta.toml
//! base = "/blog"         # Route prefix of post URLs
//! drafts = false         # Resolve posts marked `draft = true`
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory of `.md`/`.mdx` posts.
    pub dir: PathBuf,

    /// Route prefix, normalized to `/segment` form.
    pub base: String,

    /// Whether draft posts resolve like published ones.
    pub drafts: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "content/blog".into(),
            base: "/blog".into(),
            drafts: false,
        }
    }
}

impl ContentConfig {
    pub const DIR: FieldPath = FieldPath::new("content.dir");

    /// Resolve `dir` against the project root and tidy up `base`.
    pub fn normalize(&mut self, root: &Path) {
        self.dir = root.join(&self.dir);
        self.base = normalize_base(&self.base);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.dir.is_dir() {
            diag.error_with_hint(
                Self::DIR,
                format!("content directory `{}` does not exist", self.dir.display()),
                "create it or point `content.dir` at your posts",
            );
        }
    }
}

/// `blog/` -> `/blog`, `/` -> `` (posts at the site root).
fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

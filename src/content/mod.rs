//! Post content lookup.
//!
//! The resolver only sees the [`ContentSource`] trait: one query from a
//! path (list of segments) to a [`ContentRecord`] or "not found". How posts
//! are stored is the source's business.
//!
//! | Module        | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `frontmatter` | YAML-style / TOML front matter parsing           |
//! | `markdown`    | `MarkdownSource` over a directory of `.md/.mdx`  |
//! | `summary`     | Description fallback from the post body          |

mod frontmatter;
mod markdown;
mod summary;

pub use frontmatter::FrontMatter;
pub use markdown::{ContentEntry, MarkdownSource};

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// One blog post as the content source sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub author: Option<String>,
    /// Publication timestamp, verbatim.
    pub date: Option<String>,
    /// Preview image URL.
    pub thumbnail: Option<String>,
    pub draft: bool,
}

/// Errors raised while reading or parsing a post.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no front matter")]
    MissingFrontmatter(PathBuf),

    #[error("invalid front matter in `{path}`: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("`{0}` has no title")]
    MissingTitle(PathBuf),
}

/// Lookup capability the metadata resolver depends on.
///
/// `Ok(None)` is a normal miss; `Err` is reserved for content that exists
/// but cannot be read or understood.
pub trait ContentSource: Send + Sync {
    fn lookup(&self, path: &[&str]) -> Result<Option<ContentRecord>, ContentError>;
}

// ============================================================================
// Test Helpers
// ============================================================================

/// In-memory source keyed by the joined path.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: rustc_hash::FxHashMap<String, ContentRecord>,
}

#[cfg(test)]
impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, slug: &str, record: ContentRecord) -> Self {
        self.pages.insert(slug.to_string(), record);
        self
    }
}

#[cfg(test)]
impl ContentSource for MemorySource {
    fn lookup(&self, path: &[&str]) -> Result<Option<ContentRecord>, ContentError> {
        Ok(self.pages.get(&path.join("/")).cloned())
    }
}

/// Source whose every lookup fails, counting calls.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingSource {
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ContentSource for FailingSource {
    fn lookup(&self, path: &[&str]) -> Result<Option<ContentRecord>, ContentError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(ContentError::MissingTitle(PathBuf::from(path.join("/"))))
    }
}

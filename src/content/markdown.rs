//! `ContentSource` over a directory of Markdown/MDX posts.
//!
//! ```text
//! content/blog/
//! ├── forex-basics.md          → ["forex-basics"]
//! ├── crypto-101.mdx           → ["crypto-101"]
//! └── trading-plan/
//!     └── index.md             → ["trading-plan"]
//! ```
//!
//! Files are read on every lookup, so edits show up without a restart.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::summary::{MAX_SUMMARY_CHARS, first_paragraph};
use super::{ContentError, ContentRecord, ContentSource, FrontMatter};
use crate::config::ContentConfig;
use crate::debug;

/// Recognized post extensions, in lookup priority order.
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// File name standing for its parent directory.
const INDEX_STEM: &str = "index";

/// A post file found by [`MarkdownSource::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// Lookup path of the post.
    pub segments: Vec<String>,
    /// Absolute file path.
    pub path: PathBuf,
}

impl ContentEntry {
    /// Segments joined with `/`, as used in URLs.
    pub fn slug(&self) -> String {
        self.segments.join("/")
    }
}

/// Posts stored as files under one directory.
#[derive(Debug, Clone)]
pub struct MarkdownSource {
    dir: PathBuf,
    include_drafts: bool,
}

impl MarkdownSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            include_drafts: false,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(&config.dir).with_drafts(config.drafts)
    }

    /// Whether `draft = true` posts resolve.
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map lookup segments to an existing post file.
    ///
    /// Segments that could escape the directory or name hidden files
    /// never match.
    fn locate(&self, segments: &[&str]) -> Option<PathBuf> {
        if segments.is_empty() || !segments.iter().all(|s| is_plain_segment(s)) {
            return None;
        }

        let base = segments.iter().fold(self.dir.clone(), |acc, s| acc.join(s));
        let index = base.join(INDEX_STEM);

        [&base, &index]
            .into_iter()
            .flat_map(|stem| EXTENSIONS.iter().map(move |ext| with_suffix(stem, ext)))
            .find(|candidate| candidate.is_file())
    }

    /// Read and parse one post file.
    pub fn load(&self, path: &Path) -> Result<ContentRecord, ContentError> {
        let source =
            fs::read_to_string(path).map_err(|e| ContentError::Io(path.to_path_buf(), e))?;

        let (meta, body) = FrontMatter::extract(&source)
            .map_err(|e| ContentError::Frontmatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .ok_or_else(|| ContentError::MissingFrontmatter(path.to_path_buf()))?;

        let title = meta
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ContentError::MissingTitle(path.to_path_buf()))?;

        let description = match meta.description {
            Some(description) => description,
            None => first_paragraph(body, MAX_SUMMARY_CHARS).unwrap_or_default(),
        };

        Ok(ContentRecord {
            title,
            description,
            tags: meta.tags,
            author: meta.author,
            date: meta.date,
            thumbnail: meta.thumbnail,
            draft: meta.draft,
        })
    }

    /// Every post file under the directory, sorted by path.
    ///
    /// Drafts are listed too; whether they resolve is up to `lookup`.
    pub fn entries(&self) -> Vec<ContentEntry> {
        WalkDir::new(&self.dir)
            .sort(true)
            .skip_hidden(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.path();
                let segments = segments_for(&self.dir, &path)?;
                Some(ContentEntry { segments, path })
            })
            .collect()
    }
}

impl ContentSource for MarkdownSource {
    fn lookup(&self, path: &[&str]) -> Result<Option<ContentRecord>, ContentError> {
        let Some(file) = self.locate(path) else {
            return Ok(None);
        };

        let record = self.load(&file)?;
        if record.draft && !self.include_drafts {
            debug!("content"; "skipping draft {}", file.display());
            return Ok(None);
        }

        Ok(Some(record))
    }
}

/// A segment that names a single visible path component.
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('.')
        && !segment.contains(['/', '\\', '\0'])
}

/// `dir/post` + `md` -> `dir/post.md` (keeps dots already in the stem).
fn with_suffix(stem: &Path, ext: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Lookup segments for a post file, `None` for non-post files.
fn segments_for(dir: &Path, path: &Path) -> Option<Vec<String>> {
    let ext = path.extension()?.to_str()?;
    if !EXTENSIONS.contains(&ext) {
        return None;
    }

    let relative = path.strip_prefix(dir).ok()?.with_extension("");
    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_str().map(String::from))
        .collect::<Option<_>>()?;

    if segments.iter().any(|s| s.starts_with('.')) {
        return None;
    }

    if segments.last().is_some_and(|s| s == INDEX_STEM) {
        segments.pop();
    }

    (!segments.is_empty()).then_some(segments)
}

//! Slug → post → metadata, with a fails-soft boundary.
//!
//! ```text
//! RouteParams ──await──► slug? ──lookup──► ContentRecord ──derive──► MetadataRecord
//!                          │ empty            │ miss
//!                          └──────────────────┴──► not-found fallback
//!          any error ─────────────────────────────► log once, generic fallback
//! ```
//!
//! `MetadataResolver::resolve` never fails: a missing post or a broken one
//! still yields a record the page can render with.

use std::convert::Infallible;
use std::error::Error;
use std::future::{self, Future};
use std::sync::Arc;

use thiserror::Error;

use super::record::{
    Alternates, Author, MetadataRecord, OgImage, OpenGraph, Robots, Twitter,
};
use crate::config::SiteConfig;
use crate::content::{ContentError, ContentRecord, ContentSource};
use crate::log;

/// Returned for an empty slug or a post that does not exist.
pub const NOT_FOUND_TITLE: &str = "Artikel tidak ditemukan";
pub const NOT_FOUND_DESCRIPTION: &str = "Postingan blog yang diminta tidak dapat ditemukan.";

/// Returned when resolution failed with an error.
pub const ERROR_TITLE: &str = "Blog Not Found";
pub const ERROR_DESCRIPTION: &str = "The requested blog post could not be found.";

const OG_TYPE: &str = "article";
const OG_IMAGE_ROUTE: &str = "opengraph-image";
const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;
const TWITTER_CARD: &str = "summary_large_image";

// ============================================================================
// Inputs and outcomes
// ============================================================================

/// Route parameters of a post page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub slug: Option<String>,
}

impl RouteParams {
    #[cfg(test)]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
        }
    }

    /// Slug if present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to extract route parameters")]
    Params(#[source] Box<dyn Error + Send + Sync>),

    #[error("content lookup failed")]
    Content(#[from] ContentError),
}

/// Which branch produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
    Failed,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not-found",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub outcome: Outcome,
    pub record: MetadataRecord,
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Where the resolver reports errors it swallows.
pub trait DiagnosticSink: Send + Sync {
    fn error(&self, message: &str, error: &dyn Error);
}

/// Reports through `log!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn error(&self, message: &str, error: &dyn Error) {
        log!("error"; "{}: {}", message, error_chain(error));
    }
}

/// `outer: inner: root` for an error and its sources.
pub fn error_chain(error: &dyn Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

// ============================================================================
// Resolver
// ============================================================================

/// Builds page metadata for blog posts.
pub struct MetadataResolver<S> {
    source: S,
    config: Arc<SiteConfig>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: ContentSource> MetadataResolver<S> {
    pub fn new(source: S, config: Arc<SiteConfig>) -> Self {
        Self {
            source,
            config,
            sink: Arc::new(LogSink),
        }
    }

    /// Replace the default `LogSink`.
    #[cfg(test)]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve metadata once the route parameters arrive.
    pub async fn resolve<F, E>(&self, params: F) -> MetadataRecord
    where
        F: Future<Output = Result<RouteParams, E>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.resolve_page(params).await.record
    }

    /// Like [`resolve`](Self::resolve), also telling which branch was taken.
    pub async fn resolve_page<F, E>(&self, params: F) -> Resolved
    where
        F: Future<Output = Result<RouteParams, E>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        match self.try_resolve(params).await {
            Ok(Some(record)) => Resolved {
                outcome: Outcome::Found,
                record,
            },
            Ok(None) => Resolved {
                outcome: Outcome::NotFound,
                record: not_found(),
            },
            Err(e) => {
                self.sink.error("error generating metadata", &e);
                Resolved {
                    outcome: Outcome::Failed,
                    record: generic_fallback(),
                }
            }
        }
    }

    /// Resolve with parameters that are already known.
    pub async fn resolve_slug(&self, slug: Option<&str>) -> Resolved {
        let params = RouteParams {
            slug: slug.map(String::from),
        };
        self.resolve_page(future::ready(Ok::<_, Infallible>(params)))
            .await
    }

    async fn try_resolve<F, E>(&self, params: F) -> Result<Option<MetadataRecord>, ResolveError>
    where
        F: Future<Output = Result<RouteParams, E>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let params = params.await.map_err(|e| ResolveError::Params(e.into()))?;

        let Some(slug) = params.slug() else {
            return Ok(None);
        };

        let page = self.source.lookup(&[slug])?;
        Ok(page.map(|page| derive_metadata(&page, slug, &self.config)))
    }
}

/// Record for an empty slug or a missing post.
pub fn not_found() -> MetadataRecord {
    MetadataRecord::fallback(NOT_FOUND_TITLE, NOT_FOUND_DESCRIPTION)
}

/// Record for a failed resolution.
pub fn generic_fallback() -> MetadataRecord {
    MetadataRecord::fallback(ERROR_TITLE, ERROR_DESCRIPTION)
}

/// `<site.url><content.base>/<slug>`
pub fn canonical_url(config: &SiteConfig, slug: &str) -> String {
    format!("{}{}/{}", config.site.base_url(), config.content.base, slug)
}

/// Map a found post to its full metadata.
pub fn derive_metadata(page: &ContentRecord, slug: &str, config: &SiteConfig) -> MetadataRecord {
    let brand = &config.brand;
    let author = non_empty(page.author.as_deref()).unwrap_or(&brand.name);

    let url = canonical_url(config, slug);
    let image = match non_empty(page.thumbnail.as_deref()) {
        Some(thumbnail) => thumbnail.to_string(),
        None => format!("{url}/{OG_IMAGE_ROUTE}"),
    };

    let keywords = std::iter::once(&page.title)
        .chain(&page.tags)
        .chain(&brand.keywords)
        .cloned()
        .collect();

    MetadataRecord {
        title: page.title.clone(),
        description: page.description.clone(),
        keywords,
        authors: vec![Author {
            name: author.to_string(),
            url: config.site.base_url().to_string(),
        }],
        creator: Some(author.to_string()),
        publisher: Some(brand.name.clone()),
        robots: Some(Robots::open()),
        open_graph: Some(OpenGraph {
            title: page.title.clone(),
            description: page.description.clone(),
            kind: OG_TYPE.to_string(),
            url: url.clone(),
            published_time: page.date.clone(),
            authors: vec![author.to_string()],
            tags: page.tags.clone(),
            images: vec![OgImage {
                url: image.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: page.title.clone(),
            }],
            site_name: config.site.name.clone(),
        }),
        twitter: Some(Twitter {
            card: TWITTER_CARD.to_string(),
            title: page.title.clone(),
            description: page.description.clone(),
            images: vec![image],
            creator: brand.twitter.clone(),
            site: brand.twitter.clone(),
        }),
        alternates: Some(Alternates { canonical: url }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::{FailingSource, MemorySource};
    use parking_lot::Mutex;
    use std::sync::atomic::Ordering;

    /// Sink that keeps every reported message.
    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.messages.lock().len()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn error(&self, message: &str, error: &dyn Error) {
            self.messages
                .lock()
                .push(format!("{message}: {}", error_chain(error)));
        }
    }

    fn forex() -> ContentRecord {
        ContentRecord {
            title: "Forex Basics".into(),
            description: "Intro to forex".into(),
            tags: vec!["forex".into()],
            author: None,
            date: Some("2024-01-01".into()),
            thumbnail: None,
            draft: false,
        }
    }

    fn config() -> Arc<SiteConfig> {
        Arc::new(test_parse_config(""))
    }

    fn resolver<S: ContentSource>(source: S) -> (MetadataResolver<S>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let resolver = MetadataResolver::new(source, config()).with_sink(sink.clone());
        (resolver, sink)
    }

    fn ready(slug: Option<&str>) -> impl Future<Output = Result<RouteParams, Infallible>> {
        future::ready(Ok(RouteParams {
            slug: slug.map(String::from),
        }))
    }

    #[tokio::test]
    async fn test_found_post_title_and_canonical() {
        let (resolver, sink) = resolver(MemorySource::new().with_page("forex-basics", forex()));

        let record = resolver.resolve(ready(Some("forex-basics"))).await;

        assert_eq!(record.title, "Forex Basics");
        assert_eq!(record.description, "Intro to forex");
        assert_eq!(
            record.canonical(),
            Some("https://example.com/blog/forex-basics")
        );
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_forex_basics_scenario() {
        let (resolver, _) = resolver(MemorySource::new().with_page("forex-basics", forex()));

        let record = resolver.resolve(ready(Some("forex-basics"))).await;

        assert_eq!(
            record.authors,
            vec![Author {
                name: "Magic UI".into(),
                url: "https://example.com".into()
            }]
        );
        assert_eq!(record.creator.as_deref(), Some("Magic UI"));
        assert_eq!(record.publisher.as_deref(), Some("Magic UI"));

        let og = record.open_graph.as_ref().unwrap();
        assert_eq!(
            og.images[0].url,
            "https://example.com/blog/forex-basics/opengraph-image"
        );
        assert_eq!((og.images[0].width, og.images[0].height), (1200, 630));
        assert_eq!(og.images[0].alt, "Forex Basics");
        assert_eq!(og.kind, "article");
        assert_eq!(og.published_time.as_deref(), Some("2024-01-01"));
        assert_eq!(og.authors, vec!["Magic UI"]);
        assert_eq!(og.tags, vec!["forex"]);
        assert_eq!(og.site_name, "Example");
        assert_eq!(og.url, "https://example.com/blog/forex-basics");

        assert_eq!(
            record.keywords,
            vec![
                "Forex Basics",
                "forex",
                "Blog",
                "Artikel",
                "Teknologi",
                "Trading",
                "Forex",
                "Crypto",
                "Money"
            ]
        );
    }

    #[tokio::test]
    async fn test_twitter_card_and_robots() {
        let (resolver, _) = resolver(MemorySource::new().with_page("forex-basics", forex()));

        let record = resolver.resolve(ready(Some("forex-basics"))).await;

        let twitter = record.twitter.unwrap();
        assert_eq!(twitter.card, "summary_large_image");
        assert_eq!(twitter.title, "Forex Basics");
        assert_eq!(twitter.description, "Intro to forex");
        assert_eq!(
            twitter.images,
            vec!["https://example.com/blog/forex-basics/opengraph-image"]
        );
        assert_eq!(twitter.creator, "@dillionverma");
        assert_eq!(twitter.site, "@dillionverma");
        assert_eq!(record.robots, Some(Robots::open()));
    }

    #[tokio::test]
    async fn test_empty_or_absent_slug_is_not_found() {
        let source = FailingSource::default();
        let (resolver, sink) = resolver(source);

        for slug in [None, Some("")] {
            let resolved = resolver.resolve_slug(slug).await;
            assert_eq!(resolved.outcome, Outcome::NotFound);
            assert_eq!(resolved.record, not_found());
        }

        // Never reaches the source, never logs
        assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_empty_slug_fields() {
        let (resolver, _) = resolver(MemorySource::new());

        let record = resolver.resolve(ready(Some(""))).await;

        assert_eq!(record.title, "Artikel tidak ditemukan");
        assert_eq!(
            record.description,
            "Postingan blog yang diminta tidak dapat ditemukan."
        );
    }

    #[tokio::test]
    async fn test_lookup_miss_is_not_found() {
        let (resolver, sink) = resolver(MemorySource::new().with_page("other", forex()));

        let resolved = resolver.resolve_slug(Some("missing")).await;

        assert_eq!(resolved.outcome, Outcome::NotFound);
        assert_eq!(resolved.record, not_found());
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_source_error_logs_once_and_falls_back() {
        let (resolver, sink) = resolver(FailingSource::default());

        let resolved = resolver.resolve_slug(Some("forex-basics")).await;

        assert_eq!(resolved.outcome, Outcome::Failed);
        assert_eq!(resolved.record, generic_fallback());
        assert_eq!(resolved.record.title, "Blog Not Found");
        assert_eq!(sink.count(), 1);
        assert!(sink.messages.lock()[0].contains("content lookup failed"));
        assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_params_error_falls_back_without_lookup() {
        let (resolver, sink) = resolver(FailingSource::default());

        let params = async { Err::<RouteParams, _>(std::io::Error::other("params dropped")) };
        let record = resolver.resolve(params).await;

        assert_eq!(record, generic_fallback());
        assert_eq!(sink.count(), 1);
        assert!(sink.messages.lock()[0].contains("params dropped"));
        assert_eq!(resolver.source().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_params_delivered_later() {
        let (resolver, _) = resolver(MemorySource::new().with_page("forex-basics", forex()));

        let params = async {
            tokio::task::yield_now().await;
            Ok::<_, Infallible>(RouteParams::new("forex-basics"))
        };

        assert_eq!(resolver.resolve(params).await.title, "Forex Basics");
    }

    #[test]
    fn test_fallbacks_stay_distinguishable() {
        assert_ne!(not_found(), generic_fallback());
        assert_ne!(not_found().title, generic_fallback().title);
        assert_ne!(not_found().description, generic_fallback().description);
    }

    #[test]
    fn test_keywords_keep_order_and_duplicates() {
        let page = ContentRecord {
            title: "Forex".into(),
            tags: vec!["Blog".into(), "forex".into(), "Blog".into()],
            ..forex()
        };

        let record = derive_metadata(&page, "forex", &config());

        let expected: Vec<String> = ["Forex", "Blog", "forex", "Blog"]
            .into_iter()
            .chain(crate::config::section::DEFAULT_KEYWORDS)
            .map(String::from)
            .collect();
        assert_eq!(record.keywords, expected);
    }

    #[test]
    fn test_keywords_without_tags() {
        let page = ContentRecord {
            tags: vec![],
            ..forex()
        };

        let record = derive_metadata(&page, "forex-basics", &config());

        assert_eq!(record.keywords.len(), 8);
        assert_eq!(record.keywords[0], "Forex Basics");
        assert_eq!(record.keywords[1], "Blog");
    }

    #[test]
    fn test_author_and_thumbnail_used_when_present() {
        let page = ContentRecord {
            author: Some("Dewi".into()),
            thumbnail: Some("https://cdn.example.com/forex.png".into()),
            ..forex()
        };

        let record = derive_metadata(&page, "forex-basics", &config());

        assert_eq!(record.authors[0].name, "Dewi");
        assert_eq!(record.creator.as_deref(), Some("Dewi"));
        assert_eq!(record.publisher.as_deref(), Some("Magic UI"));
        let og = record.open_graph.unwrap();
        assert_eq!(og.authors, vec!["Dewi"]);
        assert_eq!(og.images[0].url, "https://cdn.example.com/forex.png");
        assert_eq!(
            record.twitter.unwrap().images,
            vec!["https://cdn.example.com/forex.png"]
        );
    }

    #[test]
    fn test_empty_author_and_thumbnail_use_defaults() {
        let page = ContentRecord {
            author: Some(String::new()),
            thumbnail: Some(String::new()),
            ..forex()
        };

        let record = derive_metadata(&page, "forex-basics", &config());

        assert_eq!(record.authors[0].name, "Magic UI");
        assert_eq!(
            record.open_graph.unwrap().images[0].url,
            "https://example.com/blog/forex-basics/opengraph-image"
        );
    }

    #[test]
    fn test_canonical_follows_content_base() {
        let mut config = test_parse_config("[content]\nbase = \"/posts\"");
        assert_eq!(
            canonical_url(&config, "hello"),
            "https://example.com/posts/hello"
        );

        config.content.base = String::new();
        assert_eq!(canonical_url(&config, "hello"), "https://example.com/hello");
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let err = ResolveError::Content(ContentError::MissingTitle("a.md".into()));
        assert_eq!(error_chain(&err), "content lookup failed: `a.md` has no title");
    }

    #[test]
    fn test_route_params_slug() {
        assert_eq!(RouteParams::new("a").slug(), Some("a"));
        assert_eq!(RouteParams::new("").slug(), None);
        assert_eq!(RouteParams::default().slug(), None);
    }
}

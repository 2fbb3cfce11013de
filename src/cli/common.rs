//! Helpers shared across CLI commands.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::MarkdownSource;
use crate::seo::MetadataResolver;

/// Resolver over the configured content directory.
pub fn markdown_resolver(config: &Arc<SiteConfig>) -> MetadataResolver<MarkdownSource> {
    let source = MarkdownSource::from_config(&config.content);
    MetadataResolver::new(source, Arc::clone(config))
}

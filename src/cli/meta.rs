//! `meta` and `head` commands: resolve one slug, print to stdout.

use std::convert::Infallible;
use std::future;
use std::io::{Write, stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use super::common::markdown_resolver;
use crate::config::SiteConfig;
use crate::debug;
use crate::seo::resolver::RouteParams;
use crate::seo::{MetadataRecord, render_head};

/// Print the metadata record of `slug` as JSON.
pub fn print_meta(
    config: &Arc<SiteConfig>,
    runtime: &Runtime,
    slug: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let record = resolve(config, runtime, slug);
    let json = to_json(&record, pretty)?;
    write_stdout(&json)
}

/// Print the `<head>` tags of `slug`.
pub fn print_head(config: &Arc<SiteConfig>, runtime: &Runtime, slug: Option<&str>) -> Result<()> {
    let record = resolve(config, runtime, slug);
    write_stdout(render_head(&record).trim_end())
}

fn resolve(config: &Arc<SiteConfig>, runtime: &Runtime, slug: Option<&str>) -> MetadataRecord {
    let resolver = markdown_resolver(config);
    let params = RouteParams {
        slug: slug.map(String::from),
    };
    debug!("meta"; "resolving {}", slug.unwrap_or("<none>"));
    runtime.block_on(resolver.resolve(future::ready(Ok::<_, Infallible>(params))))
}

pub fn to_json(record: &MetadataRecord, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    };
    json.context("failed to serialize metadata")
}

fn write_stdout(text: &str) -> Result<()> {
    let mut out = stdout().lock();
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::resolver::not_found;

    #[test]
    fn test_to_json_compact_and_pretty() {
        let record = not_found();
        let compact = to_json(&record, false).unwrap();
        assert_eq!(
            compact,
            r#"{"title":"Artikel tidak ditemukan","description":"Postingan blog yang diminta tidak dapat ditemukan."}"#
        );
        assert!(to_json(&record, true).unwrap().contains("\n  \"title\""));
    }

    #[test]
    fn test_resolve_reads_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("forex-basics.md"),
            "---\ntitle: Forex Basics\ndescription: Intro to forex\n---\n",
        )
        .unwrap();
        let mut config = crate::config::test_parse_config("");
        config.content.dir = dir.path().to_path_buf();
        let config = Arc::new(config);
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let record = resolve(&config, &runtime, Some("forex-basics"));
        assert_eq!(record.title, "Forex Basics");
        assert_eq!(
            record.canonical(),
            Some("https://example.com/blog/forex-basics")
        );

        assert_eq!(resolve(&config, &runtime, Some("nope")), not_found());
    }
}

//! `MetadataRecord` → `<head>` tags.
//!
//! Emitted in a fixed order: basic tags, Open Graph, then Twitter Card.
//! Fallback records produce only `<title>` and the description meta.

use std::fmt::Write;

use super::record::MetadataRecord;
use crate::utils::html::{escape, escape_attr};

/// Accumulates head elements, one per line.
struct Head {
    out: String,
}

impl Head {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn title(&mut self, text: &str) {
        writeln!(self.out, "<title>{}</title>", escape(text)).ok();
    }

    /// `<meta name=...>`
    fn name(&mut self, name: &str, content: &str) {
        writeln!(
            self.out,
            r#"<meta name="{}" content="{}">"#,
            name,
            escape_attr(content)
        )
        .ok();
    }

    /// `<meta property=...>`
    fn property(&mut self, property: &str, content: impl AsRef<str>) {
        writeln!(
            self.out,
            r#"<meta property="{}" content="{}">"#,
            property,
            escape_attr(content.as_ref())
        )
        .ok();
    }

    fn link(&mut self, rel: &str, href: &str) {
        writeln!(
            self.out,
            r#"<link rel="{}" href="{}">"#,
            rel,
            escape_attr(href)
        )
        .ok();
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Render the `<head>` fragment for a record.
pub fn render_head(record: &MetadataRecord) -> String {
    let mut head = Head::new();

    head.title(&record.title);
    head.name("description", &record.description);

    if !record.keywords.is_empty() {
        head.name("keywords", &record.keywords.join(", "));
    }
    for author in &record.authors {
        head.name("author", &author.name);
        if !author.url.is_empty() {
            head.link("author", &author.url);
        }
    }
    if let Some(creator) = &record.creator {
        head.name("creator", creator);
    }
    if let Some(publisher) = &record.publisher {
        head.name("publisher", publisher);
    }
    if let Some(robots) = &record.robots {
        head.name("robots", &directives(robots.index, robots.follow, None));
        let bot = &robots.google_bot;
        let limits = format!(
            "max-video-preview:{}, max-image-preview:{}, max-snippet:{}",
            bot.max_video_preview,
            bot.max_image_preview,
            bot.max_snippet
        );
        head.name("googlebot", &directives(bot.index, bot.follow, Some(&limits)));
    }
    if let Some(canonical) = record.canonical() {
        head.link("canonical", canonical);
    }

    if let Some(og) = &record.open_graph {
        head.property("og:title", &og.title);
        head.property("og:description", &og.description);
        head.property("og:url", &og.url);
        head.property("og:site_name", &og.site_name);
        for image in &og.images {
            head.property("og:image", &image.url);
            head.property("og:image:width", image.width.to_string());
            head.property("og:image:height", image.height.to_string());
            head.property("og:image:alt", &image.alt);
        }
        head.property("og:type", &og.kind);
        if let Some(published) = &og.published_time {
            head.property("article:published_time", published);
        }
        for author in &og.authors {
            head.property("article:author", author);
        }
        for tag in &og.tags {
            head.property("article:tag", tag);
        }
    }

    if let Some(twitter) = &record.twitter {
        head.name("twitter:card", &twitter.card);
        head.name("twitter:site", &twitter.site);
        head.name("twitter:creator", &twitter.creator);
        head.name("twitter:title", &twitter.title);
        head.name("twitter:description", &twitter.description);
        for image in &twitter.images {
            head.name("twitter:image", image);
        }
    }

    head.finish()
}

/// Minimal HTML document around the head fragment, for previews.
pub fn render_document(record: &MetadataRecord) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{}</head>\n<body></body>\n</html>\n",
        render_head(record)
    )
}

/// `index, follow` / `noindex, nofollow`, plus optional extras.
fn directives(index: bool, follow: bool, extra: Option<&str>) -> String {
    let mut out = String::from(if index { "index" } else { "noindex" });
    out.push_str(if follow { ", follow" } else { ", nofollow" });
    if let Some(extra) = extra {
        out.push_str(", ");
        out.push_str(extra);
    }
    out
}

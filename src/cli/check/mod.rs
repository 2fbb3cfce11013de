//! `check` command: resolve every post in the content directory.
//!
//! Errors are posts a visitor would see the generic fallback for.
//! Warnings are posts that resolve but are unreachable or thin.

mod report;

use std::path::Path;

use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::config::SiteConfig;
use crate::content::{ContentEntry, MarkdownSource};
use crate::logger::ProgressLine;
use crate::seo::error_chain;
use crate::seo::resolver::derive_metadata;
use crate::utils::plural_count;
use crate::{debug, log};

use report::CheckReport;

/// Check every post and fail if any would not resolve.
pub fn check_posts(config: &SiteConfig) -> Result<()> {
    let source = MarkdownSource::from_config(&config.content);
    let entries = source.entries();

    if entries.is_empty() {
        log!("check"; "no posts found in {}", source.dir().display());
        return Ok(());
    }

    log!("check"; "checking {}", plural_count(entries.len(), "post"));

    let progress = ProgressLine::new("check", &[("posts", entries.len())]);
    let report = check_entries(&source, &entries, config, |_| progress.inc("posts"));
    progress.finish();

    report.print();
    log!("check"; "{}", report);

    if report.has_errors() {
        anyhow::bail!(
            "check failed: {}",
            plural_count(report.error_count(), "broken post")
        );
    }
    Ok(())
}

/// Build the report; `on_entry` runs once per entry.
fn check_entries(
    source: &MarkdownSource,
    entries: &[ContentEntry],
    config: &SiteConfig,
    on_entry: impl Fn(&ContentEntry),
) -> CheckReport {
    let mut report = CheckReport::default();
    let mut by_slug: FxHashMap<String, Vec<&ContentEntry>> = FxHashMap::default();

    for entry in entries {
        by_slug.entry(entry.slug()).or_default().push(entry);
        check_entry(source, entry, config, &mut report);
        on_entry(entry);
    }

    let mut shadowed: Vec<_> = by_slug
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .collect();
    shadowed.sort_by(|a, b| a.0.cmp(&b.0));

    for (slug, files) in shadowed {
        let names: Vec<_> = files
            .iter()
            .map(|e| display_path(source.dir(), &e.path))
            .collect();
        for file in &files[1..] {
            report.add_error(
                display_path(source.dir(), &file.path),
                format!("slug `{slug}` is shadowed, defined by {}", names.join(", ")),
            );
        }
    }

    report
}

fn check_entry(
    source: &MarkdownSource,
    entry: &ContentEntry,
    config: &SiteConfig,
    report: &mut CheckReport,
) {
    let path = display_path(source.dir(), &entry.path);
    let record = match source.load(&entry.path) {
        Ok(record) => record,
        Err(e) => {
            report.add_error(path, error_chain(&e));
            return;
        }
    };

    if record.draft && !config.content.drafts {
        debug!("check"; "skipping draft {}", path);
        report.drafts += 1;
        return;
    }

    let slug = entry.slug();
    if entry.segments.len() > 1 {
        report.add_warning(
            path.clone(),
            format!("nested post `{slug}` is not reachable by a single slug"),
        );
    }
    if record.description.trim().is_empty() {
        report.add_warning(path.clone(), "description is empty".to_string());
    }

    let metadata = derive_metadata(&record, &slug, config);
    debug!("check"; "{} -> {}", path, metadata.canonical().unwrap_or_default());
    report.resolved += 1;
}

/// Path relative to the content dir, for display.
fn display_path(dir: &Path, path: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

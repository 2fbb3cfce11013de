//! Check report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// Issues found in one post file, keyed by display path.
type Issues = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default)]
pub struct CheckReport {
    /// Posts that fail to resolve.
    pub errors: Issues,
    /// Posts that resolve with degraded metadata.
    pub warnings: Issues,
    /// Posts resolving to full metadata.
    pub resolved: usize,
    /// Drafts skipped because drafts are disabled.
    pub drafts: usize,
}

impl CheckReport {
    pub fn add_error(&mut self, source: String, message: String) {
        self.errors.entry(source).or_default().push(message);
    }

    pub fn add_warning(&mut self, source: String, message: String) {
        self.warnings.entry(source).or_default().push(message);
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Print errors then warnings to stderr.
    pub fn print(&self) {
        print_section("errors", &self.errors, true);
        print_section("warnings", &self.warnings, false);
    }
}

fn print_section(name: &str, issues: &Issues, is_error: bool) {
    if issues.is_empty() {
        return;
    }
    eprintln!();

    let file_count = issues.len();
    let header = if is_error {
        name.red().bold().to_string()
    } else {
        name.yellow().bold().to_string()
    };
    eprintln!(
        "{} {}",
        header,
        format!("({file_count} file{})", plural_s(file_count)).dimmed()
    );

    for (path, messages) in issues {
        eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
        for message in messages {
            if is_error {
                eprintln!("{} {}", "→".red(), message);
            } else {
                eprintln!("{} {}", "→".yellow(), message);
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        if errors == 0 {
            write!(
                f,
                "{} {}",
                "all posts resolve".green(),
                format!("({} ok, {} skipped)", self.resolved, self.drafts).dimmed()
            )
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                errors.to_string().red().bold(),
                format!("error{}", plural_s(errors)).dimmed()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_group_by_file() {
        let mut report = CheckReport::default();
        report.add_error("a.md".into(), "no title".into());
        report.add_error("a.md".into(), "duplicate".into());
        report.add_warning("b.md".into(), "empty description".into());

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn test_display_summary() {
        let mut report = CheckReport {
            resolved: 3,
            drafts: 1,
            ..Default::default()
        };
        let summary = report.to_string();
        assert!(summary.contains("all posts resolve"));
        assert!(summary.contains("(3 ok, 1 skipped)"));

        report.add_error("a.md".into(), "no title".into());
        let summary = report.to_string();
        assert!(summary.contains("found"));
        assert!(summary.contains("error"));
        assert!(!summary.contains("errors"));
    }
}

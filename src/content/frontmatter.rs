//! Front matter from YAML (`---`) or TOML (`+++`) blocks.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Fields a post can declare in its front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(alias = "summary")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub author: Option<String>,
    /// Publication date, kept verbatim (TOML datetimes are printed back).
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Option<String>,
    #[serde(alias = "image")]
    pub thumbnail: Option<String>,
    pub draft: bool,
}

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// `tags: [a, b]`, a block list, or a comma-separated `tags: a, b`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Tags {
    List(Vec<String>),
    Inline(String),
}

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Option::<Tags>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Tags::List(tags)) => tags,
        Some(Tags::Inline(line)) => line
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
    };
    Ok(tags)
}

/// Accept `date = "2024-01-01"` as well as a bare TOML date.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<toml::Value> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        toml::Value::String(s) => s,
        toml::Value::Datetime(dt) => dt.to_string(),
        other => other.to_string(),
    }))
}

/// Front matter syntax of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Yaml,
    Toml,
}

impl FrontMatter {
    /// Extract front matter and return (front matter, body).
    ///
    /// `Ok(None)` means the file has no front matter block at all.
    pub fn extract(content: &str) -> Result<Option<(Self, &str)>, FrontMatterError> {
        let Some((block, body, syntax)) = detect(content) else {
            return Ok(None);
        };

        let meta = match syntax {
            _ if block.is_empty() => Self::default(),
            Syntax::Yaml => serde_yaml::from_str(block)?,
            Syntax::Toml => toml::from_str(block)?,
        };
        Ok(Some((meta, body)))
    }
}

/// Detect and split off a front matter block.
fn detect(content: &str) -> Option<(&str, &str, Syntax)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, syntax) in [("---", Syntax::Yaml), ("+++", Syntax::Toml)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && let Some(end) = rest.find(&format!("\n{fence}"))
        {
            let block = rest[..end].trim_matches(['\r', '\n']);
            let body = rest[end + 1 + fence.len()..].trim_start_matches(['\r', '\n']);
            return Some((block.trim_end(), body, syntax));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\n---\n\n# Body";
        let (meta, body) = FrontMatter::extract(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_yaml_quoted_values_and_block_list() {
        let content = "---\ntitle: \"Forex: The Basics\"\nauthor: 'Dewi'\ntags:\n  - forex\n  - \"trading\"\nimage: /img/a.png\n---\nBody";
        let (meta, _) = FrontMatter::extract(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Forex: The Basics"));
        assert_eq!(meta.author.as_deref(), Some("Dewi"));
        assert_eq!(meta.tags, vec!["forex", "trading"]);
        assert_eq!(meta.thumbnail.as_deref(), Some("/img/a.png"));
    }

    #[test]
    fn test_yaml_bracket_list_and_draft() {
        let content = "---\ntitle: T\ntags: [\"a\", b]\ndraft: true\nsummary: Short\n---\n";
        let (meta, _) = FrontMatter::extract(content).unwrap().unwrap();

        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(meta.draft);
        assert_eq!(meta.description.as_deref(), Some("Short"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\ndate = 2024-01-01\n+++\n\n# Body";
        let (meta, body) = FrontMatter::extract(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_aliases() {
        let content = "+++\ntitle = \"T\"\nsummary = \"S\"\nimage = \"/og.png\"\n+++\n";
        let (meta, _) = FrontMatter::extract(content).unwrap().unwrap();
        assert_eq!(meta.description.as_deref(), Some("S"));
        assert_eq!(meta.thumbnail.as_deref(), Some("/og.png"));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let content = "+++\ntitle = \n+++\n";
        assert!(FrontMatter::extract(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(FrontMatter::extract("# Just content").unwrap().is_none());
        assert!(FrontMatter::extract("---\nunterminated").unwrap().is_none());
    }

    #[test]
    fn test_null_tags() {
        let json = r#"{"title": "T", "tags": null}"#;
        let meta: FrontMatter = serde_json::from_str(json).unwrap();
        assert!(meta.tags.is_empty());

        let (meta, _) = FrontMatter::extract("---\ntags: ~\n---\n").unwrap().unwrap();
        assert!(meta.tags.is_empty());
    }
    #[test]
    fn test_yaml_block_scalars() {
        let content = "---\ntitle: Forex\ndescription: >-\n  Intro to forex\n  for beginners\nauthor: |-\n  Dewi\n---\n";
        let (meta, _) = FrontMatter::extract(content).unwrap().unwrap();

        assert_eq!(meta.description.as_deref(), Some("Intro to forex for beginners"));
        assert_eq!(meta.author.as_deref(), Some("Dewi"));
    }

    #[test]
    fn test_yaml_inline_comments() {
        let content = "---\n# leading comment\ntitle: Forex Basics # intro post\ntags: [forex] # one tag\n---\n";
        let (meta, _) = FrontMatter::extract(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Forex Basics"));
        assert_eq!(meta.tags, vec!["forex"]);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\n";
        assert!(matches!(
            FrontMatter::extract(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_empty_block_is_default() {
        let (meta, body) = FrontMatter::extract("---\n---\nBody").unwrap().unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "Body");
    }
}

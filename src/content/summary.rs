//! Description fallback taken from a post body.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Longest derived description, in characters.
pub const MAX_SUMMARY_CHARS: usize = 160;

/// First prose paragraph of a Markdown/MDX body as plain text.
///
/// Whitespace is collapsed and the result is cut at a word boundary.
/// MDX `import`/`export` lines and raw HTML/JSX are skipped.
pub fn first_paragraph(body: &str, max_chars: usize) -> Option<String> {
    let mut in_paragraph = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let candidate = text.trim_start();
                if !candidate.is_empty()
                    && !candidate.starts_with("import ")
                    && !candidate.starts_with("export ")
                {
                    break;
                }
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then(|| truncate_words(&collapsed, max_chars))
}

/// Cut to at most `max_chars` characters, preferring the last space.
fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut chars = text.chars();
    let cut: String = chars.by_ref().take(max_chars).collect();
    let at_boundary = chars.next().is_some_and(char::is_whitespace);
    let cut = match cut.rfind(' ') {
        _ if at_boundary => cut.as_str(),
        Some(space) if space > 0 => &cut[..space],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end_matches([',', ';', ':', '.', ' ']))
}

//! Request URL → preview route.
//!
//! ```text
//! <base>                     → Page(None)
//! <base>/<slug>              → Page(Some(slug))
//! <base>/<slug>/meta.json    → Meta(Some(slug))
//! anything else              → Unknown
//! ```

use percent_encoding::percent_decode_str;

/// File name selecting the JSON representation.
const META_FILE: &str = "meta.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// HTML document with rendered head tags.
    Page(Option<String>),
    /// Metadata record as JSON.
    Meta(Option<String>),
    Unknown,
}

/// Route a raw request URL under the content base path.
pub fn parse_route(url: &str, base: &str) -> Route {
    let Some(path) = normalize_url(url) else {
        return Route::Unknown;
    };
    let path = path.trim_end_matches('/');

    let Some(rest) = path.strip_prefix(base) else {
        return Route::Unknown;
    };
    if rest.is_empty() {
        return Route::Page(None);
    }
    let Some(rest) = rest.strip_prefix('/') else {
        // `/blogs` under base `/blog`
        return Route::Unknown;
    };

    let (slug, meta) = match rest.strip_suffix(META_FILE) {
        Some("") => (None, true),
        Some(slug) => match slug.strip_suffix('/') {
            Some(slug) => (Some(slug), true),
            None => (Some(rest), false),
        },
        None => (Some(rest), false),
    };

    let slug = slug.map(String::from);
    if meta { Route::Meta(slug) } else { Route::Page(slug) }
}

/// Strip the query string and percent-decode; `None` for invalid UTF-8.
fn normalize_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    percent_decode_str(path)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

//! Configuration section definitions.
//!
//! Each module corresponds to a section in `blogmeta.toml`:
//!
//! | Module    | TOML Section | Purpose                                  |
//! |-----------|--------------|------------------------------------------|
//! | `site`    | `[site]`     | Canonical URL and site name              |
//! | `brand`   | `[brand]`    | Default author, handles, fixed keywords  |
//! | `content` | `[content]`  | Post directory, route prefix, drafts     |
//! | `serve`   | `[serve]`    | Preview server                           |

mod brand;
mod content;
mod serve;
mod site;

pub use brand::BrandConfig;
#[cfg(test)]
pub use brand::DEFAULT_KEYWORDS;
pub use content::ContentConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;

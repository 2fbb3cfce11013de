//! Page metadata for blog posts.
//!
//! | Module     | Purpose                                            |
//! |------------|----------------------------------------------------|
//! | `record`   | `MetadataRecord` and its serialized shape          |
//! | `resolver` | Slug → metadata, with not-found/error fallbacks    |
//! | `head`     | `<head>` tag rendering                             |

pub mod head;
pub mod record;
pub mod resolver;

pub use head::{render_document, render_head};
pub use record::MetadataRecord;
pub use resolver::{MetadataResolver, Outcome, Resolved, error_chain};

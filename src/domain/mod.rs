//! Value types shared across the pipeline.

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{parse_message, Commit};
pub use tag::VersionTag;
pub use version::{SemanticVersion, VersionImpact, DEFAULT_FIRST_VERSION};

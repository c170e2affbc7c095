//! Latest version tag resolution.

use crate::domain::tag::{tag_regex, VersionTag};
use crate::domain::SemanticVersion;
use crate::error::Result;
use crate::git::RepoReader;

/// Find the highest valid version tag, optionally restricted to a mono-repo
/// scope. Returns the full tag ref name and the version it encodes.
///
/// Refs that do not match the version tag pattern are skipped. Selection is
/// by numeric `(major, minor, patch)` ordering, never lexical, so
/// `v1.10.0` beats `v1.9.0`. No matching tag is `Ok(None)` and is the
/// normal outcome for a first release.
pub fn latest_version<R: RepoReader>(
    reader: &R,
    scope: Option<&str>,
) -> Result<Option<(String, SemanticVersion)>> {
    let re = tag_regex();

    let mut best: Option<(String, SemanticVersion)> = None;

    for tag_ref in reader.tag_refs()? {
        let Some(tag) = VersionTag::parse_with(&re, &tag_ref.name) else {
            continue;
        };
        if !tag.in_scope(scope) {
            continue;
        }

        match &best {
            Some((_, version)) if *version >= tag.version => {}
            _ => best = Some((tag.name, tag.version)),
        }
    }

    Ok(best)
}

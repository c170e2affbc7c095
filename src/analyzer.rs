//! Version impact classification and aggregation.

use crate::conventional::{CommitType, ConventionalCommit};
use crate::domain::{SemanticVersion, VersionImpact};

/// The single source of truth for mapping a commit onto a version impact:
/// breaking changes are major regardless of type, features are minor,
/// everything else (fixes, chores, unknown types) is a patch.
pub fn impact_of(commit_type: CommitType, is_breaking: bool) -> VersionImpact {
    if is_breaking {
        VersionImpact::Major
    } else if commit_type == CommitType::Feat {
        VersionImpact::Minor
    } else {
        VersionImpact::Patch
    }
}

/// Combined impact of a commit set: the maximum over individual impacts.
/// An empty set has no impact.
pub fn aggregate(commits: &[ConventionalCommit]) -> VersionImpact {
    commits
        .iter()
        .map(|commit| impact_of(commit.commit_type, commit.is_breaking))
        .max()
        .unwrap_or(VersionImpact::None)
}

/// Apply the aggregated impact of `commits` to `current`.
pub fn next_version(current: SemanticVersion, commits: &[ConventionalCommit]) -> SemanticVersion {
    current.bump(aggregate(commits))
}

//! The release pipeline: resolve -> walk -> parse -> filter -> bump -> render.

use crate::conventional::ConventionalCommit;
use crate::domain::{SemanticVersion, DEFAULT_FIRST_VERSION};
use crate::error::{NextverError, Result};
use crate::git::RepoReader;
use crate::{analyzer, changelog, resolver, walker};

/// Knobs for one release computation.
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Mono-repo subdirectory: restricts both the tags considered and the
    /// commits counted to those affecting this directory.
    pub directory: Option<String>,
    /// Drop non-conventional commits instead of recording them as `other`.
    pub strict: bool,
    /// Commits whose message contains any of these substrings are excluded
    /// from versioning and from the changelog.
    pub ignore_patterns: Vec<String>,
}

/// The outcome of one release computation.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    /// The tag ref and version the computation started from, if any.
    pub previous: Option<(String, SemanticVersion)>,
    pub next_version: SemanticVersion,
    pub changelog: String,
    /// The eligible commits, in the walker's topological order.
    pub commits: Vec<ConventionalCommit>,
}

/// Compute the next version and changelog for a repository.
///
/// With no valid version tag (the first-release case) this returns the
/// default `0.1.0` and an empty changelog. With a tag but no eligible
/// commits after it, the run fails with
/// [NextverError::NoEligibleCommits].
pub fn plan_release<R: RepoReader>(reader: &R, options: &ReleaseOptions) -> Result<ReleasePlan> {
    let scope = options
        .directory
        .as_deref()
        .map(|directory| directory.trim_matches('/'));

    let Some((tag_ref, current)) = resolver::latest_version(reader, scope)? else {
        return Ok(ReleasePlan {
            previous: None,
            next_version: DEFAULT_FIRST_VERSION,
            changelog: String::new(),
            commits: Vec::new(),
        });
    };

    let from = reader.resolve_ref(&tag_ref)?;
    let range = walker::commits_in_range(reader, from, None, scope)?;

    let parsed: Vec<ConventionalCommit> =
        range.iter().map(ConventionalCommit::from_commit).collect();

    // The one cross-cutting filter stage: strict mode and ignore patterns
    // apply here, between parsing and impact/changelog, never inside the
    // parser.
    let eligible: Vec<ConventionalCommit> = parsed
        .into_iter()
        .filter(|record| record.is_conventional || !options.strict)
        .filter(|record| !record.is_ignored(&options.ignore_patterns))
        .collect();

    if eligible.is_empty() {
        return Err(NextverError::no_eligible_commits(tag_ref));
    }

    let next_version = analyzer::next_version(current, &eligible);
    let changelog = changelog::format_changelog(&eligible);

    Ok(ReleasePlan {
        previous: Some((tag_ref, current)),
        next_version,
        changelog,
        commits: eligible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{oid, MockRepository};

    /// Linear repo: c1 (tagged v0.1.0) followed by `messages`.
    fn repo_after_tag(tag: &str, messages: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        let mut parent = repo.add_commit(oid(1), "chore: initial", &[]);
        repo.add_tag(format!("refs/tags/{}", tag), parent);
        for (index, message) in messages.iter().enumerate() {
            parent = repo.add_commit(oid(10 + index as u8), message, &[parent]);
        }
        repo.set_head(parent);
        repo
    }

    #[test]
    fn test_first_release_defaults_to_0_1_0() {
        let mut repo = MockRepository::new();
        let c1 = repo.add_commit(oid(1), "feat: first", &[]);
        repo.set_head(c1);

        let plan = plan_release(&repo, &ReleaseOptions::default()).unwrap();
        assert_eq!(plan.previous, None);
        assert_eq!(plan.next_version, SemanticVersion::new(0, 1, 0));
        assert_eq!(plan.changelog, "");
        assert!(plan.commits.is_empty());
    }

    #[test]
    fn test_empty_repository_is_first_release() {
        let repo = MockRepository::new();
        let plan = plan_release(&repo, &ReleaseOptions::default()).unwrap();
        assert_eq!(plan.next_version, SemanticVersion::new(0, 1, 0));
    }

    #[test]
    fn test_feat_after_tag_bumps_minor() {
        let repo = repo_after_tag("v0.1.0", &["feat: add X"]);
        let plan = plan_release(&repo, &ReleaseOptions::default()).unwrap();

        assert_eq!(plan.next_version, SemanticVersion::new(0, 2, 0));
        assert!(plan.changelog.contains("### Features"));
        assert!(plan.changelog.contains("add X"));
        assert_eq!(
            plan.previous,
            Some(("refs/tags/v0.1.0".to_string(), SemanticVersion::new(0, 1, 0)))
        );
    }

    #[test]
    fn test_breaking_fix_bumps_major() {
        let repo = repo_after_tag("v1.0.0", &["fix!: critical bug"]);
        let plan = plan_release(&repo, &ReleaseOptions::default()).unwrap();
        assert_eq!(plan.next_version, SemanticVersion::new(2, 0, 0));
    }

    #[test]
    fn test_no_commits_after_tag_is_an_error() {
        let repo = repo_after_tag("v1.0.0", &[]);
        let err = plan_release(&repo, &ReleaseOptions::default()).unwrap_err();
        assert!(matches!(err, NextverError::NoEligibleCommits { .. }));
    }

    #[test]
    fn test_ignore_pattern_filters_before_aggregation() {
        let repo = repo_after_tag("v0.1.0", &["feat: add X", "chore: bump deps"]);
        let options = ReleaseOptions {
            ignore_patterns: vec!["chore".to_string()],
            ..Default::default()
        };
        let plan = plan_release(&repo, &options).unwrap();

        assert_eq!(plan.next_version, SemanticVersion::new(0, 2, 0));
        assert!(!plan.changelog.contains("bump deps"));
        assert_eq!(plan.commits.len(), 1);
    }

    #[test]
    fn test_ignoring_everything_is_an_error() {
        let repo = repo_after_tag("v0.1.0", &["chore: bump deps"]);
        let options = ReleaseOptions {
            ignore_patterns: vec!["chore".to_string()],
            ..Default::default()
        };
        let err = plan_release(&repo, &options).unwrap_err();
        assert!(matches!(err, NextverError::NoEligibleCommits { .. }));
    }

    #[test]
    fn test_strict_mode_drops_non_conventional_commits() {
        let repo = repo_after_tag("v0.1.0", &["Update the readme", "fix: real fix"]);
        let options = ReleaseOptions {
            strict: true,
            ..Default::default()
        };
        let plan = plan_release(&repo, &options).unwrap();

        assert_eq!(plan.commits.len(), 1);
        assert_eq!(plan.next_version, SemanticVersion::new(0, 1, 1));
        assert!(!plan.changelog.contains("readme"));
    }

    #[test]
    fn test_strict_mode_with_only_malformed_commits_fails() {
        let repo = repo_after_tag("v0.1.0", &["Update the readme"]);
        let options = ReleaseOptions {
            strict: true,
            ..Default::default()
        };
        let err = plan_release(&repo, &options).unwrap_err();
        assert!(matches!(err, NextverError::NoEligibleCommits { .. }));
    }

    #[test]
    fn test_non_strict_keeps_malformed_as_other() {
        let repo = repo_after_tag("v0.1.0", &["Update the readme"]);
        let plan = plan_release(&repo, &ReleaseOptions::default()).unwrap();

        assert_eq!(plan.next_version, SemanticVersion::new(0, 1, 1));
        assert!(plan.changelog.contains("### Other"));
        assert!(plan.changelog.contains("Update the readme"));
    }

    #[test]
    fn test_directory_scope_selects_tags_and_commits() {
        let mut repo = MockRepository::new();
        let c1 = repo.add_commit(oid(1), "feat: seed", &[]);
        repo.set_paths(c1, &["lib_a/src/lib.rs"]);
        repo.add_tag("refs/tags/lib_a/v1.0.0", c1);
        repo.add_tag("refs/tags/v9.0.0", c1);

        let c2 = repo.add_commit(oid(2), "feat: in scope", &[c1]);
        repo.set_paths(c2, &["lib_a/src/lib.rs"]);
        let c3 = repo.add_commit(oid(3), "feat!: out of scope", &[c2]);
        repo.set_paths(c3, &["lib_b/src/lib.rs"]);
        repo.set_head(c3);

        let options = ReleaseOptions {
            directory: Some("lib_a/".to_string()),
            ..Default::default()
        };
        let plan = plan_release(&repo, &options).unwrap();

        // The scoped tag wins over the root v9 tag, and the out-of-scope
        // breaking commit does not drive the bump.
        assert_eq!(plan.next_version, SemanticVersion::new(1, 1, 0));
        assert_eq!(plan.commits.len(), 1);
        assert!(plan.changelog.contains("in scope"));
    }
}

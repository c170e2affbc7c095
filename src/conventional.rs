//! Conventional commit parsing, including recovery from squashed merges.

use crate::analyzer::impact_of;
use crate::domain::{Commit, VersionImpact};
use regex::Regex;
use std::fmt;

/// Marker that forces a breaking change when present anywhere in the body.
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE:";

/// Closed enumeration of recognized commit types. Unknown type tokens map
/// to [CommitType::Other]; the literal token is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Chore,
    Docs,
    Test,
    Refactor,
    Style,
    Build,
    Ci,
    Other,
}

impl CommitType {
    /// Case-insensitive mapping from a type token, with a guaranteed
    /// catch-all.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "feat" => CommitType::Feat,
            "fix" => CommitType::Fix,
            "chore" => CommitType::Chore,
            "docs" => CommitType::Docs,
            "test" => CommitType::Test,
            "refactor" => CommitType::Refactor,
            "style" => CommitType::Style,
            "build" => CommitType::Build,
            "ci" => CommitType::Ci,
            _ => CommitType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Chore => "chore",
            CommitType::Docs => "docs",
            CommitType::Test => "test",
            CommitType::Refactor => "refactor",
            CommitType::Style => "style",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Other => "other",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw pieces of a line that matched the conventional subject grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectParts {
    pub type_token: String,
    pub scope: Option<String>,
    pub is_breaking: bool,
    pub description: String,
}

/// A commit interpreted under the Conventional Commits convention.
///
/// Construction never fails: a commit that matches the grammar nowhere
/// becomes an `other`-typed record carrying its original subject, with
/// `is_conventional` set to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub is_breaking: bool,
    pub description: String,
    pub body: Option<String>,
    /// 7-character display hash; not used for equality or lookup.
    pub short_hash: String,
    /// The unmodified original subject, kept for traceability even when the
    /// effective type/description were recovered from the body.
    pub raw_subject: String,
    /// Whether the record came from a genuine grammar match rather than the
    /// forced `other` fallback.
    pub is_conventional: bool,
}

fn subject_regex() -> Regex {
    Regex::new(r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?:\s?(?P<description>.*)$")
        .expect("subject grammar is valid")
}

fn bullet_regex() -> Regex {
    Regex::new(r"^[*\-•]\s*").expect("bullet pattern is valid")
}

/// Apply the subject grammar to a single line.
///
/// A line with an empty description does not match.
pub fn parse_subject(line: &str) -> Option<SubjectParts> {
    parse_subject_with(&subject_regex(), line)
}

fn parse_subject_with(re: &Regex, line: &str) -> Option<SubjectParts> {
    let captures = re.captures(line)?;

    let description = captures["description"].to_string();
    if description.is_empty() {
        return None;
    }

    Some(SubjectParts {
        type_token: captures["type"].to_string(),
        scope: captures.name("scope").map(|m| m.as_str().to_string()),
        is_breaking: captures.name("breaking").is_some(),
        description,
    })
}

/// Search a commit body for conventional lines, as left behind by squashed
/// merges, and return the best candidate.
///
/// Bullet markers are stripped before matching. Candidates are scored by
/// the version impact of their own type/breaking flag; the highest impact
/// wins and ties go to the earliest line.
pub fn recover_from_body(body: &str) -> Option<SubjectParts> {
    recover_from_body_with(&subject_regex(), &bullet_regex(), body)
}

fn recover_from_body_with(re: &Regex, bullet: &Regex, body: &str) -> Option<SubjectParts> {
    let mut best: Option<(VersionImpact, SubjectParts)> = None;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cleaned = bullet.replace(line, "");
        let Some(parts) = parse_subject_with(re, &cleaned) else {
            continue;
        };

        let impact = impact_of(CommitType::from_token(&parts.type_token), parts.is_breaking);
        match &best {
            // Strictly-greater keeps the earliest line on ties.
            Some((top, _)) if *top >= impact => {}
            _ => best = Some((impact, parts)),
        }
    }

    best.map(|(_, parts)| parts)
}

/// Check whether any pattern occurs as a substring of the message.
pub fn should_ignore(message: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| !pattern.is_empty() && message.contains(pattern))
}

impl ConventionalCommit {
    /// Interpret a commit. Subject first; if that fails, the body is
    /// scanned for squashed-merge candidates; if that fails too, the
    /// commit is recorded verbatim as `other`.
    pub fn from_commit(commit: &Commit) -> Self {
        let re = subject_regex();

        let (parts, is_conventional) = match parse_subject_with(&re, &commit.subject) {
            Some(parts) => (parts, true),
            None => {
                let recovered = commit
                    .body
                    .as_deref()
                    .and_then(|body| recover_from_body_with(&re, &bullet_regex(), body));
                match recovered {
                    Some(parts) => (parts, true),
                    None => (
                        SubjectParts {
                            type_token: "other".to_string(),
                            scope: None,
                            is_breaking: false,
                            description: commit.subject.clone(),
                        },
                        false,
                    ),
                }
            }
        };

        // The body marker overrides whichever path produced the record.
        let body_forces_breaking = commit
            .body
            .as_deref()
            .is_some_and(|body| body.contains(BREAKING_CHANGE_MARKER));

        ConventionalCommit {
            commit_type: CommitType::from_token(&parts.type_token),
            scope: parts.scope,
            is_breaking: parts.is_breaking || body_forces_breaking,
            description: parts.description,
            body: commit.body.clone(),
            short_hash: commit.short_hash(),
            raw_subject: commit.subject.clone(),
            is_conventional,
        }
    }

    /// Whether any ignore pattern matches this commit's original message.
    pub fn is_ignored(&self, patterns: &[String]) -> bool {
        if should_ignore(&self.raw_subject, patterns) {
            return true;
        }
        self.body
            .as_deref()
            .is_some_and(|body| should_ignore(body, patterns))
    }
}

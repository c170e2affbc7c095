use git2::Oid;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A commit materialized from the repository graph.
///
/// `subject` is the first line of the message, or empty when the first
/// paragraph spans multiple lines (no clean subject exists). `paths` holds
/// the files changed relative to each parent; for a root commit it is the
/// commit's whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: Oid,
    pub subject: String,
    pub body: Option<String>,
    pub paths: BTreeSet<PathBuf>,
}

impl Commit {
    pub fn new(id: Oid, message: &str, paths: BTreeSet<PathBuf>) -> Self {
        let (subject, body) = parse_message(message);
        Commit {
            id,
            subject,
            body,
            paths,
        }
    }

    /// Display form of the commit id, truncated to 7 characters.
    pub fn short_hash(&self) -> String {
        let full = self.id.to_string();
        full[..7].to_string()
    }

    /// Whether any changed path lives in `dir` or below it. Comparison is by
    /// path segment, so "lib_ab/x" does not affect directory "lib_a".
    pub fn affects_dir(&self, dir: &str) -> bool {
        let dir = Path::new(dir);
        self.paths.iter().any(|path| path.starts_with(dir))
    }
}

/// Split a raw commit message into subject and body.
///
/// The subject is the first blank-line-separated paragraph, but only if it
/// is a single line; a multi-line first paragraph means the message has no
/// subject and everything becomes the body.
pub fn parse_message(message: &str) -> (String, Option<String>) {
    let trimmed = message.trim();
    let paragraphs: Vec<&str> = trimmed.split("\n\n").collect();

    let first = paragraphs[0];
    if first.contains('\n') {
        return (String::new(), Some(trimmed.to_string()));
    }

    let body = paragraphs[1..].join("\n\n");
    let body = if body.is_empty() { None } else { Some(body) };

    (first.to_string(), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_with_paths(paths: &[&str]) -> Commit {
        Commit::new(
            Oid::from_bytes(&[7; 20]).unwrap(),
            "chore: touch files",
            paths.iter().map(PathBuf::from).collect(),
        )
    }

    #[test]
    fn test_parse_message_subject_only() {
        let (subject, body) = parse_message("feat: add login\n");
        assert_eq!(subject, "feat: add login");
        assert_eq!(body, None);
    }

    #[test]
    fn test_parse_message_subject_and_body() {
        let (subject, body) = parse_message("feat: add login\n\nSome details.\n\nMore details.");
        assert_eq!(subject, "feat: add login");
        assert_eq!(body.as_deref(), Some("Some details.\n\nMore details."));
    }

    #[test]
    fn test_parse_message_no_paragraph_break() {
        // First paragraph spans two lines without a blank separator, so
        // there is no subject.
        let (subject, body) = parse_message("line one\nline two");
        assert_eq!(subject, "");
        assert_eq!(body.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn test_short_hash_is_seven_chars() {
        let commit = commit_with_paths(&[]);
        assert_eq!(commit.short_hash().len(), 7);
    }

    #[test]
    fn test_affects_dir_nested_path() {
        let commit = commit_with_paths(&["lib_a/src/main.rs", "README.md"]);
        assert!(commit.affects_dir("lib_a"));
        assert!(commit.affects_dir("lib_a/src"));
        assert!(!commit.affects_dir("lib_b"));
    }

    #[test]
    fn test_affects_dir_segment_prefix_not_string_prefix() {
        let commit = commit_with_paths(&["lib_ab/src/main.rs"]);
        assert!(!commit.affects_dir("lib_a"));
        assert!(commit.affects_dir("lib_ab"));
    }

    #[test]
    fn test_affects_dir_no_paths() {
        let commit = commit_with_paths(&[]);
        assert!(!commit.affects_dir("lib_a"));
    }
}

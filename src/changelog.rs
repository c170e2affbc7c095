//! Markdown changelog rendering.

use crate::conventional::{CommitType, ConventionalCommit};

/// Render a single changelog entry.
///
/// Non-breaking feat/fix entries drop the type prefix (the section heading
/// already says it); every other type keeps `type(scope): `.
pub fn render_entry(commit: &ConventionalCommit) -> String {
    let scope = commit
        .scope
        .as_deref()
        .map(|scope| format!("(`{}`)", scope))
        .unwrap_or_default();

    let prefix = if !matches!(commit.commit_type, CommitType::Feat | CommitType::Fix) {
        format!("{}{}: ", commit.commit_type, scope)
    } else if !scope.is_empty() {
        format!("{} ", scope)
    } else {
        String::new()
    };

    let breaking = if commit.is_breaking {
        "**BREAKING CHANGE** "
    } else {
        ""
    };

    format!(
        "{}{}{} ({})",
        breaking, prefix, commit.description, commit.short_hash
    )
}

/// Render a grouped changelog: Features, then Fixes, then everything else
/// pooled under Other. Input order (the walker's topological order) is
/// preserved within each section; empty sections are omitted entirely.
pub fn format_changelog(commits: &[ConventionalCommit]) -> String {
    let mut features: Vec<&ConventionalCommit> = Vec::new();
    let mut fixes: Vec<&ConventionalCommit> = Vec::new();
    let mut other: Vec<&ConventionalCommit> = Vec::new();

    for commit in commits {
        match commit.commit_type {
            CommitType::Feat => features.push(commit),
            CommitType::Fix => fixes.push(commit),
            _ => other.push(commit),
        }
    }

    let mut lines: Vec<String> = Vec::new();

    for (title, group) in [
        ("Features", features),
        ("Fixes", fixes),
        ("Other", other),
    ] {
        if group.is_empty() {
            continue;
        }
        lines.push(format!("\n### {}", title));
        for commit in group {
            lines.push(format!("* {}", render_entry(commit)));
        }
    }

    lines.join("\n").trim().to_string()
}

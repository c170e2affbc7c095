//! Merge-correct commit range walking.
//!
//! The range between two points is the set of commits reachable from the
//! end point but not from the start point, emitted parents-before-children.
//! Chronological ordering is deliberately not used anywhere: a branch
//! merged after a tag can carry commits authored before the tag, and those
//! must still appear in the range, positioned by graph structure.

use crate::domain::Commit;
use crate::error::Result;
use crate::git::RepoReader;
use git2::Oid;
use std::collections::{HashMap, HashSet, VecDeque};

/// List the commits after `from` up to and including `to`, oldest first.
///
/// `from` itself is excluded; `to` (HEAD when unset) is included. When
/// `from` is unset the walk covers the whole history. When `from` is not an
/// ancestor of `to` only commits actually reachable from it are excluded,
/// so a tag on an unrelated branch does not silently truncate the range.
/// An empty repository yields an empty range, not an error.
///
/// With `directory` set, only commits touching that directory (by path
/// segment, not string prefix) are kept; root commits are compared against
/// their own tree.
pub fn commits_in_range<R: RepoReader>(
    reader: &R,
    from: Option<Oid>,
    to: Option<Oid>,
    directory: Option<&str>,
) -> Result<Vec<Commit>> {
    let tip = match to {
        Some(id) => Some(id),
        None => reader.head()?,
    };
    let Some(tip) = tip else {
        return Ok(Vec::new());
    };

    // Everything reachable from `from` falls outside the range.
    let mut excluded: HashSet<Oid> = HashSet::new();
    if let Some(from) = from {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if !excluded.insert(id) {
                continue;
            }
            stack.extend(reader.commit(id)?.parents);
        }
    }

    if excluded.contains(&tip) {
        return Ok(Vec::new());
    }

    // Collect the included set, remembering discovery order for a
    // deterministic topological sort.
    let mut discovered: Vec<Oid> = Vec::new();
    let mut parents: HashMap<Oid, Vec<Oid>> = HashMap::new();
    let mut messages: HashMap<Oid, String> = HashMap::new();
    let mut seen: HashSet<Oid> = HashSet::new();

    let mut stack = vec![tip];
    seen.insert(tip);
    while let Some(id) = stack.pop() {
        let raw = reader.commit(id)?;
        discovered.push(id);
        for &parent in &raw.parents {
            if !excluded.contains(&parent) && seen.insert(parent) {
                stack.push(parent);
            }
        }
        parents.insert(id, raw.parents);
        messages.insert(id, raw.message);
    }

    // Kahn's algorithm over in-range parent edges: a commit is emitted only
    // once all of its in-range parents have been emitted.
    let mut indegree: HashMap<Oid, usize> = HashMap::new();
    let mut children: HashMap<Oid, Vec<Oid>> = HashMap::new();
    for &id in &discovered {
        let in_range = parents[&id]
            .iter()
            .filter(|parent| !excluded.contains(parent))
            .count();
        indegree.insert(id, in_range);
        for parent in &parents[&id] {
            if !excluded.contains(parent) {
                children.entry(*parent).or_default().push(id);
            }
        }
    }

    let mut queue: VecDeque<Oid> = discovered
        .iter()
        .rev()
        .filter(|id| indegree[id] == 0)
        .copied()
        .collect();

    let mut ordered: Vec<Oid> = Vec::with_capacity(discovered.len());
    while let Some(id) = queue.pop_front() {
        ordered.push(id);
        if let Some(kids) = children.get(&id) {
            for &child in kids {
                let degree = indegree.get_mut(&child).expect("child was discovered");
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(child);
                }
            }
        }
    }

    let mut commits = Vec::with_capacity(ordered.len());
    for id in ordered {
        let commit = Commit::new(id, &messages[&id], reader.changed_paths(id)?);
        if let Some(dir) = directory {
            if !commit.affects_dir(dir) {
                continue;
            }
        }
        commits.push(commit);
    }

    Ok(commits)
}

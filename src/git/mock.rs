use crate::error::{NextverError, Result};
use crate::git::{RawCommit, RepoReader, TagRef};
use git2::Oid;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// In-memory repository for testing without touching disk.
///
/// Commits form an arbitrary DAG; parents must be added before children are
/// walked but insertion order is otherwise free.
pub struct MockRepository {
    commits: HashMap<Oid, RawCommit>,
    paths: HashMap<Oid, BTreeSet<PathBuf>>,
    tags: Vec<TagRef>,
    head: Option<Oid>,
}

/// Deterministic test oid from a single byte.
pub fn oid(n: u8) -> Oid {
    Oid::from_bytes(&[n; 20]).expect("20 bytes is a valid oid")
}

impl MockRepository {
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            paths: HashMap::new(),
            tags: Vec::new(),
            head: None,
        }
    }

    /// Add a commit with the given parents. Returns the id for chaining.
    pub fn add_commit(&mut self, id: Oid, message: &str, parents: &[Oid]) -> Oid {
        self.commits.insert(
            id,
            RawCommit {
                id,
                message: message.to_string(),
                parents: parents.to_vec(),
            },
        );
        id
    }

    /// Set the changed paths reported for a commit.
    pub fn set_paths(&mut self, id: Oid, paths: &[&str]) {
        self.paths
            .insert(id, paths.iter().map(PathBuf::from).collect());
    }

    /// Add a tag ref pointing at a commit. `name` is the full ref name.
    pub fn add_tag(&mut self, name: impl Into<String>, target: Oid) {
        self.tags.push(TagRef {
            name: name.into(),
            target,
        });
    }

    pub fn set_head(&mut self, id: Oid) {
        self.head = Some(id);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoReader for MockRepository {
    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn resolve_ref(&self, name: &str) -> Result<Option<Oid>> {
        Ok(self
            .tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.target))
    }

    fn head(&self) -> Result<Option<Oid>> {
        Ok(self.head)
    }

    fn commit(&self, id: Oid) -> Result<RawCommit> {
        self.commits
            .get(&id)
            .cloned()
            .ok_or_else(|| NextverError::Git(git2::Error::from_str("mock: unknown commit")))
    }

    fn changed_paths(&self, id: Oid) -> Result<BTreeSet<PathBuf>> {
        Ok(self.paths.get(&id).cloned().unwrap_or_default())
    }
}

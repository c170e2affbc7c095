use crate::error::Result;
use crate::git::{RawCommit, RepoReader, TagRef};
use git2::{ErrorCode, Oid, Repository as Git2Repo};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository implementing the read-only reader trait
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl RepoReader for Git2Repository {
    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.name() else {
                continue; // non-utf8 ref name, cannot be a version tag
            };
            let name = name.to_string();

            // Peel annotated tags through to the commit they point at.
            let target = match reference.peel_to_commit() {
                Ok(commit) => commit.id(),
                Err(_) => continue, // tag points at a tree/blob
            };

            tags.push(TagRef { name, target });
        }

        Ok(tags)
    }

    fn resolve_ref(&self, name: &str) -> Result<Option<Oid>> {
        match self.repo.revparse_single(name) {
            Ok(object) => match object.peel_to_commit() {
                Ok(commit) => Ok(Some(commit.id())),
                Err(_) => Ok(None),
            },
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn head(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target()),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn commit(&self, id: Oid) -> Result<RawCommit> {
        let commit = self.repo.find_commit(id)?;

        Ok(RawCommit {
            id: commit.id(),
            message: commit.message().unwrap_or("").to_string(),
            parents: commit.parent_ids().collect(),
        })
    }

    fn changed_paths(&self, id: Oid) -> Result<BTreeSet<PathBuf>> {
        let commit = self.repo.find_commit(id)?;
        let tree = commit.tree()?;

        let mut paths: BTreeSet<PathBuf> = BTreeSet::new();

        let mut collect = |diff: &git2::Diff<'_>| {
            for delta in diff.deltas() {
                if let Some(path) = delta.old_file().path() {
                    paths.insert(path.to_path_buf());
                }
                if let Some(path) = delta.new_file().path() {
                    paths.insert(path.to_path_buf());
                }
            }
        };

        if commit.parent_count() == 0 {
            // Root commit: diff against the empty tree gives the whole tree.
            let diff = self
                .repo
                .diff_tree_to_tree(None, Some(&tree), None)?;
            collect(&diff);
        } else {
            for parent in commit.parents() {
                let parent_tree = parent.tree()?;
                let diff = self
                    .repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;
                collect(&diff);
            }
        }

        Ok(paths)
    }
}

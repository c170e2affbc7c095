//! Git access abstraction layer
//!
//! The pipeline never talks to libgit2 directly; it goes through the
//! [RepoReader] trait so the resolver and walker can be exercised against
//! an in-memory repository in tests.
//!
//! Implementations:
//!
//! - [repository::Git2Repository]: real repositories via the `git2` crate
//! - [mock::MockRepository]: in-memory graph for unit tests
//!
//! Every operation on this trait is read-only. The core never creates
//! tags or commits and never pushes.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A tag ref and the commit it (possibly after peeling) points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Full ref name, e.g. "refs/tags/v1.2.0"
    pub name: String,
    pub target: Oid,
}

/// Raw commit data as stored in the object database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub id: Oid,
    pub message: String,
    pub parents: Vec<Oid>,
}

/// Read-only view of a repository's refs and commit graph.
///
/// # Errors
///
/// Methods return [crate::error::Result]; an unreadable repository or
/// object store surfaces as [crate::error::NextverError::Git] and is fatal
/// to the run. "Not found" outcomes that are expected in normal operation
/// (no tags, unborn HEAD, unknown ref name) are encoded as empty
/// collections or `None`, never as errors.
pub trait RepoReader {
    /// Enumerate all tag refs with their target commits.
    ///
    /// Annotated tags are peeled to the commit they ultimately point to.
    fn tag_refs(&self) -> Result<Vec<TagRef>>;

    /// Resolve a ref name (or revision string) to a commit id.
    ///
    /// Returns `Ok(None)` when the name does not resolve.
    fn resolve_ref(&self, name: &str) -> Result<Option<Oid>>;

    /// The commit id at HEAD, or `None` for an empty repository.
    fn head(&self) -> Result<Option<Oid>>;

    /// Fetch a commit's raw data by id.
    fn commit(&self, id: Oid) -> Result<RawCommit>;

    /// Paths changed by a commit relative to each of its parents.
    ///
    /// A root commit reports its entire tree.
    fn changed_paths(&self, id: Oid) -> Result<BTreeSet<PathBuf>>;
}

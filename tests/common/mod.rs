//! Helpers for building throwaway git repositories in tests.
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

fn index_entry(path: &str) -> git2::IndexEntry {
    git2::IndexEntry {
        ctime: git2::IndexTime::new(0, 0),
        mtime: git2::IndexTime::new(0, 0),
        dev: 0,
        ino: 0,
        mode: 0o100644,
        uid: 0,
        gid: 0,
        file_size: 0,
        id: Oid::zero(),
        flags: 0,
        flags_extended: 0,
        path: path.as_bytes().to_vec(),
    }
}

impl TestRepo {
    pub fn init() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init git repo");
        {
            let mut config = repo.config().expect("repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        TestRepo { dir, repo }
    }

    /// Create a commit whose tree contains exactly `files`, with explicit
    /// parents and an explicit author/commit time (seconds since epoch).
    /// HEAD is not moved; call [TestRepo::set_head] on the tip.
    pub fn commit_at(
        &self,
        files: &[(&str, &str)],
        message: &str,
        parents: &[Oid],
        when: i64,
    ) -> Oid {
        let mut index = self.repo.index().expect("repo index");
        index.clear().expect("clear index");
        for (path, content) in files {
            index
                .add_frombuffer(&index_entry(path), content.as_bytes())
                .expect("add file to index");
        }
        let tree_id = index.write_tree_to(&self.repo).expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");

        let sig = Signature::new("Test User", "test@example.com", &Time::new(when, 0))
            .expect("signature");

        let parent_commits: Vec<git2::Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).expect("find parent"))
            .collect();
        let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();

        self.repo
            .commit(None, &sig, &sig, message, &tree, &parent_refs)
            .expect("create commit")
    }

    /// Convenience wrapper with a fixed timestamp.
    pub fn commit(&self, files: &[(&str, &str)], message: &str, parents: &[Oid]) -> Oid {
        self.commit_at(files, message, parents, 1_700_000_000)
    }

    /// Point refs/heads/main (and HEAD) at the given commit.
    pub fn set_head(&self, id: Oid) {
        self.repo
            .reference("refs/heads/main", id, true, "test")
            .expect("update branch");
        self.repo.set_head("refs/heads/main").expect("set head");
    }

    /// Create a lightweight tag. `name` may contain a scope ("lib_a/v1.0.0").
    pub fn tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("create tag");
    }

    /// Create an annotated tag.
    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("find object");
        let sig = self.repo.signature().expect("signature");
        self.repo
            .tag(name, &object, &sig, "release", false)
            .expect("create annotated tag");
    }
}

//! Read-only commit history access via `git2`.

use std::path::{Path, PathBuf};

use git2::{Repository, Revwalk, Signature, Sort};
use tracing::{debug, info, instrument};

use crate::errors::GitError;
use crate::identity::Identity;

/// Author and committer of a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
}

impl CommitRecord {
    /// The author and committer identities of this commit.
    pub fn identities(&self) -> [Identity; 2] {
        [
            Identity::author(&self.author_name, &self.author_email),
            Identity::committer(&self.committer_name, &self.committer_email),
        ]
    }

    fn from_commit(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let committer = commit.committer();
        Self {
            sha: commit.id().to_string(),
            author_name: lossy_name(&author),
            author_email: lossy_email(&author),
            committer_name: lossy_name(&committer),
            committer_email: lossy_email(&committer),
        }
    }
}

fn lossy_name(signature: &Signature<'_>) -> String {
    String::from_utf8_lossy(signature.name_bytes()).into_owned()
}

fn lossy_email(signature: &Signature<'_>) -> String {
    String::from_utf8_lossy(signature.email_bytes()).into_owned()
}

/// A git repository opened for walking its history.
pub struct GitHistory {
    repo: Repository,
    repo_path: PathBuf,
}

impl GitHistory {
    /// Open an existing Git repository at `repo_path`.
    pub fn open<P: AsRef<Path>>(repo_path: P) -> Result<Self, GitError> {
        let path = repo_path.as_ref();
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path)
            .map_err(|_| GitError::RepositoryNotFound(path.display().to_string()))?;
        Ok(Self {
            repo,
            repo_path: path.to_path_buf(),
        })
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Walk every commit reachable from `revision`, each exactly once.
    #[instrument(skip(self))]
    pub fn walk(&self, revision: &str) -> Result<CommitWalk<'_>, GitError> {
        let start = self
            .repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::RevisionNotFound(revision.to_string()))?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(start.id())?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        debug!(start = %start.id(), "walking history");

        Ok(CommitWalk {
            repo: &self.repo,
            revwalk,
        })
    }
}

/// Iterator over the commits of a [`GitHistory::walk`].
pub struct CommitWalk<'r> {
    repo: &'r Repository,
    revwalk: Revwalk<'r>,
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<CommitRecord, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.revwalk.next()?;
        Some(
            oid.and_then(|oid| self.repo.find_commit(oid))
                .map(|commit| CommitRecord::from_commit(&commit))
                .map_err(GitError::from),
        )
    }
}

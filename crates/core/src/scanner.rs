//! One pass over commit history, sorting every author and committer
//! identity into a valid or an invalid set.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::git::CommitRecord;
use crate::identity::{Classifier, Identity};

/// Result of scanning a commit stream.
///
/// `valid` and `invalid` are always disjoint. `commit_count` counts commits
/// visited, not distinct identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    commit_count: usize,
    valid: BTreeSet<Identity>,
    invalid: BTreeSet<Identity>,
}

impl ScanReport {
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    pub fn valid(&self) -> &BTreeSet<Identity> {
        &self.valid
    }

    pub fn invalid(&self) -> &BTreeSet<Identity> {
        &self.invalid
    }

    pub fn into_parts(self) -> (BTreeSet<Identity>, BTreeSet<Identity>, usize) {
        (self.valid, self.invalid, self.commit_count)
    }

    /// Union of two partial scans, e.g. over disjoint slices of history.
    pub fn merge(mut self, other: ScanReport) -> ScanReport {
        self.commit_count += other.commit_count;
        self.valid.extend(other.valid);
        self.invalid.extend(other.invalid);
        self
    }

    fn record(&mut self, identity: Identity, is_valid: bool) {
        if is_valid {
            self.valid.insert(identity);
        } else {
            self.invalid.insert(identity);
        }
    }
}

/// Classifies the identities of a commit stream.
pub struct HistoryScanner<'t> {
    classifier: Classifier<'t>,
}

impl<'t> HistoryScanner<'t> {
    pub fn new(classifier: Classifier<'t>) -> Self {
        Self { classifier }
    }

    /// Consume `commits`, classifying the author and committer of each.
    ///
    /// The first error from the stream aborts the scan and is returned
    /// unchanged. There is no partial result.
    pub fn scan<I, E>(&self, commits: I) -> Result<ScanReport, E>
    where
        I: IntoIterator<Item = Result<CommitRecord, E>>,
    {
        let mut report = ScanReport::default();
        for commit in commits {
            let commit = commit?;
            for identity in commit.identities() {
                let is_valid = self.classifier.is_valid(&identity);
                debug!(
                    sha = %commit.sha,
                    role = %identity.role(),
                    %identity,
                    is_valid,
                    "classified"
                );
                report.record(identity, is_valid);
            }
            report.commit_count += 1;
        }
        info!(
            commits = report.commit_count,
            valid = report.valid.len(),
            invalid = report.invalid.len(),
            "scan complete"
        );
        Ok(report)
    }
}

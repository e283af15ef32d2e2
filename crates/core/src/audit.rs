//! End-to-end identity audit of a repository's history.
//!
//! [`Audit::run`] walks the history, classifies every identity, and
//! collects mailmap suggestions for the invalid ones. The resulting
//! [`AuditReport`] renders the messages the CLI prints, in the order
//! summary, ambiguity warnings, mailmap.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::errors::GitError;
use crate::git::GitHistory;
use crate::identity::{Classifier, Identity, MailmapLine, MailmapSuggester};
use crate::scanner::HistoryScanner;

/// Everything learned from one audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub commit_count: usize,
    pub valid: BTreeSet<Identity>,
    pub invalid: BTreeSet<Identity>,
    /// Resolved suggestions, ordered by the invalid identity they fix.
    pub suggestions: Vec<MailmapLine>,
    /// Invalid identities that matched several valid ones.
    pub ambiguities: Vec<String>,
}

impl AuditReport {
    pub fn has_invalid(&self) -> bool {
        !self.invalid.is_empty()
    }

    /// Process exit status: 0 when history is clean, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        u8::from(self.has_invalid())
    }

    /// One-paragraph summary, listing the invalid identities if any.
    pub fn summary(&self) -> String {
        if !self.has_invalid() {
            return format!(
                "Checked {} commits, found {} valid and no invalid entries.",
                self.commit_count,
                self.valid.len()
            );
        }
        let listed = self
            .invalid
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Checked {} commits, found {} valid and {} invalid entries:\n{}",
            self.commit_count,
            self.valid.len(),
            self.invalid.len(),
            listed
        )
    }

    /// The suggested `.mailmap` block, or `None` when nothing resolved.
    pub fn mailmap(&self) -> Option<String> {
        if self.suggestions.is_empty() {
            return None;
        }
        let lines = self
            .suggestions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Some(format!("Suggested mailmap:\n{lines}"))
    }
}

/// Runs the identity audit against a repository.
pub struct Audit<'t> {
    classifier: Classifier<'t>,
}

impl<'t> Audit<'t> {
    pub fn new(classifier: Classifier<'t>) -> Self {
        Self { classifier }
    }

    /// Audit every commit reachable from `revision`.
    ///
    /// Fails only if the history cannot be walked; malformed identities are
    /// reported, not raised.
    #[instrument(skip(self, history), fields(repo = %history.repo_path().display()))]
    pub fn run(&self, history: &GitHistory, revision: &str) -> Result<AuditReport, GitError> {
        let scan = HistoryScanner::new(self.classifier).scan(history.walk(revision)?)?;
        let (valid, invalid, commit_count) = scan.into_parts();

        let suggestions = MailmapSuggester::new(self.classifier, &valid).collect_all(&invalid);
        info!(
            suggestions = suggestions.lines.len(),
            ambiguous = suggestions.ambiguities.len(),
            "audit complete"
        );

        Ok(AuditReport {
            commit_count,
            valid,
            invalid,
            suggestions: suggestions.lines,
            ambiguities: suggestions.ambiguities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(
        valid: &[(&str, &str)],
        invalid: &[(&str, &str)],
        suggestions: Vec<MailmapLine>,
    ) -> AuditReport {
        AuditReport {
            commit_count: 2,
            valid: valid.iter().map(|(n, e)| Identity::author(*n, *e)).collect(),
            invalid: invalid.iter().map(|(n, e)| Identity::author(*n, *e)).collect(),
            suggestions,
            ambiguities: Vec::new(),
        }
    }

    #[test]
    fn test_clean_summary() {
        let report = report(&[("Benjamin Drung", "bdrung@ubuntu.com")], &[], Vec::new());
        assert_eq!(
            report.summary(),
            "Checked 2 commits, found 1 valid and no invalid entries."
        );
        assert_eq!(report.exit_status(), 0);
        assert_eq!(report.mailmap(), None);
    }

    #[test]
    fn test_summary_lists_invalid_sorted() {
        let report = report(
            &[],
            &[("jdoe", "jdoe@localhost"), ("bdrung@ubuntu.com", "")],
            Vec::new(),
        );
        assert_eq!(
            report.summary(),
            "Checked 2 commits, found 0 valid and 2 invalid entries:\n\
             bdrung@ubuntu.com <>\n\
             jdoe <jdoe@localhost>"
        );
    }

    #[test]
    fn test_exit_status_saturates() {
        let report = report(
            &[],
            &[("a", "a@localhost"), ("b", "b@localhost"), ("c", "c@localhost")],
            Vec::new(),
        );
        assert_eq!(report.exit_status(), 1);
    }

    #[test]
    fn test_mailmap_block() {
        let invalid = Identity::author("bdrung@ubuntu.com", "");
        let line = MailmapLine::new("Benjamin Drung", "bdrung@ubuntu.com", &invalid);
        let report = report(
            &[("Benjamin Drung", "bdrung@ubuntu.com")],
            &[("bdrung@ubuntu.com", "")],
            vec![line],
        );
        assert_eq!(
            report.mailmap().as_deref(),
            Some("Suggested mailmap:\nBenjamin Drung <bdrung@ubuntu.com> bdrung@ubuntu.com <>")
        );
    }
}

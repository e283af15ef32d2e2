//! Mailmap suggestions for identities that failed validation.
//!
//! For each invalid identity the suggester looks for a valid identity that
//! is the same person. The lookup strategies are tried in a fixed order and
//! the first one that finds anything decides the outcome:
//!
//! | Invalid field | Step | Lookup |
//! |---------------|------|--------|
//! | email | 1 | valid email == invalid name (fields swapped) |
//! | email | 2 | email empty and name is `"Some Name some@address"`: parse it, no lookup |
//! | email | 3 | valid name == invalid name |
//! | name only | 1 | valid email == invalid name |
//! | name only | 2 | valid email == invalid email |
//!
//! A lookup that finds exactly one candidate produces a [`MailmapLine`].
//! A lookup that finds several is reported as ambiguous and never guessed.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use super::classifier::Classifier;
use super::person::Identity;

/// One `.mailmap` entry: `Proper Name <proper@email> Commit Name <commit@email>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MailmapLine {
    pub proper_name: String,
    pub proper_email: String,
    pub commit_name: String,
    pub commit_email: String,
}

impl MailmapLine {
    /// Map `commit` (as found in history) onto the given proper name/email.
    pub fn new(proper_name: &str, proper_email: &str, commit: &Identity) -> Self {
        Self {
            proper_name: proper_name.to_string(),
            proper_email: proper_email.to_string(),
            commit_name: commit.name().to_string(),
            commit_email: commit.email().to_string(),
        }
    }
}

impl fmt::Display for MailmapLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} <{}>",
            self.proper_name, self.proper_email, self.commit_name, self.commit_email
        )
    }
}

/// Field of the valid identities a lookup compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Name,
    Email,
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchField::Name => f.write_str("name"),
            MatchField::Email => f.write_str("email"),
        }
    }
}

/// Outcome of searching a correction for one invalid identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one correction was found.
    Resolved(MailmapLine),
    /// More than one valid identity matched; a human has to pick.
    Ambiguous {
        field: MatchField,
        value: String,
        candidates: Vec<Identity>,
    },
    /// No strategy found anything.
    Unresolved,
}

impl Resolution {
    /// Warning text for an ambiguous outcome, `None` otherwise.
    ///
    /// `Found 2 matching persons for name 'Jane Roe': Jane Roe <a@x.org>, Jane Roe <b@x.org>`
    pub fn ambiguity_message(&self) -> Option<String> {
        let Resolution::Ambiguous {
            field,
            value,
            candidates,
        } = self
        else {
            return None;
        };
        let listed = candidates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "Found {} matching persons for {} '{}': {}",
            candidates.len(),
            field,
            value,
            listed
        ))
    }
}

/// Suggestions for a whole invalid set, with ambiguities kept for the caller
/// to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// Resolved lines, ordered by the invalid identity they fix.
    pub lines: Vec<MailmapLine>,
    /// One warning message per ambiguous identity, in the same order.
    pub ambiguities: Vec<String>,
}

/// Non-empty result of a single lookup.
struct Candidates<'v> {
    field: MatchField,
    value: String,
    matches: Vec<&'v Identity>,
}

/// Searches the valid identities for corrections of invalid ones.
pub struct MailmapSuggester<'a> {
    classifier: Classifier<'a>,
    valid: &'a BTreeSet<Identity>,
}

impl<'a> MailmapSuggester<'a> {
    pub fn new(classifier: Classifier<'a>, valid: &'a BTreeSet<Identity>) -> Self {
        Self { classifier, valid }
    }

    /// Run the lookup chain for `invalid` and report what it decided.
    pub fn resolve(&self, invalid: &Identity) -> Resolution {
        let candidates = if !self.classifier.is_valid_email(invalid.email()) {
            match self.lookup(MatchField::Email, invalid.name()) {
                Some(found) => Some(found),
                None => {
                    if invalid.email().is_empty() {
                        if let Some((name, email)) =
                            self.classifier.split_embedded_email(invalid.name())
                        {
                            debug!(%invalid, "derived correction from name field");
                            return Resolution::Resolved(MailmapLine::new(name, email, invalid));
                        }
                    }
                    self.lookup(MatchField::Name, invalid.name())
                }
            }
        } else if !self.classifier.is_valid_name(invalid.name()) {
            self.lookup(MatchField::Email, invalid.name())
                .or_else(|| self.lookup(MatchField::Email, invalid.email()))
        } else {
            None
        };

        let Some(candidates) = candidates else {
            debug!(%invalid, "no matching valid identity");
            return Resolution::Unresolved;
        };

        if let [single] = candidates.matches[..] {
            debug!(%invalid, matched = %single, field = %candidates.field, "unique match");
            return Resolution::Resolved(MailmapLine::new(single.name(), single.email(), invalid));
        }
        Resolution::Ambiguous {
            field: candidates.field,
            value: candidates.value,
            candidates: candidates.matches.into_iter().cloned().collect(),
        }
    }

    /// Suggest a mailmap line for `invalid`, warning when the match is ambiguous.
    pub fn suggest(&self, invalid: &Identity) -> Option<MailmapLine> {
        let resolution = self.resolve(invalid);
        if let Some(message) = resolution.ambiguity_message() {
            warn!("{}", message);
        }
        match resolution {
            Resolution::Resolved(line) => Some(line),
            Resolution::Ambiguous { .. } | Resolution::Unresolved => None,
        }
    }

    /// Suggest lines for every invalid identity, in identity order.
    /// Identities without a unique correction are skipped.
    pub fn suggest_all(&self, invalid: &BTreeSet<Identity>) -> Vec<MailmapLine> {
        invalid
            .iter()
            .filter_map(|identity| self.suggest(identity))
            .collect()
    }

    /// Like [`suggest_all`](Self::suggest_all), but returns the ambiguity
    /// warnings instead of logging them.
    pub fn collect_all(&self, invalid: &BTreeSet<Identity>) -> Suggestions {
        let mut suggestions = Suggestions::default();
        for identity in invalid {
            let resolution = self.resolve(identity);
            if let Some(message) = resolution.ambiguity_message() {
                suggestions.ambiguities.push(message);
            }
            if let Resolution::Resolved(line) = resolution {
                suggestions.lines.push(line);
            }
        }
        suggestions
    }

    fn lookup(&self, field: MatchField, value: &str) -> Option<Candidates<'a>> {
        let matches: Vec<&'a Identity> = self
            .valid
            .iter()
            .filter(|candidate| match field {
                MatchField::Name => candidate.name() == value,
                MatchField::Email => candidate.email() == value,
            })
            .collect();
        if matches.is_empty() {
            return None;
        }
        Some(Candidates {
            field,
            value: value.to_string(),
            matches,
        })
    }
}

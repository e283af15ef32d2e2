//! Identities recorded in commit history, their validity checks, and
//! mailmap suggestions for the ones that fail.
//!
//! The pipeline is:
//! 1. [`Classifier`] decides whether a name and an email look legitimate
//! 2. the history scanner sorts every [`Identity`] into a valid or invalid set
//! 3. [`MailmapSuggester`] matches invalid identities against the valid set

pub mod classifier;
pub mod mailmap;
pub mod person;

pub use classifier::Classifier;
pub use mailmap::{MailmapLine, MailmapSuggester, MatchField, Resolution, Suggestions};
pub use person::{Identity, Role};

//! userlint core library.
//!
//! This crate audits the author and committer identities recorded in a git
//! history: it classifies each name/email pair as valid or invalid against
//! a public suffix table, and proposes `.mailmap` corrections for invalid
//! entries by matching them against the valid ones.

pub mod audit;
pub mod config;
pub mod errors;
pub mod git;
pub mod identity;
pub mod scanner;
pub mod tld;

// Re-exports for convenience.
pub use audit::{Audit, AuditReport};
pub use config::AppConfig;
pub use identity::{Classifier, Identity, MailmapSuggester};
pub use scanner::HistoryScanner;
pub use tld::TldTable;

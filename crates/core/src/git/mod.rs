//! Git operations for userlint.

pub mod history;

pub use history::{CommitRecord, CommitWalk, GitHistory};

//! The identity value extracted from a commit's author or committer field.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which commit field an [`Identity`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Author,
    Committer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Author => f.write_str("author"),
            Role::Committer => f.write_str("committer"),
        }
    }
}

/// A name/email pair recorded in history.
///
/// Equality, hashing and ordering only look at `(name, email)`. The role is
/// informational, so the same person seen as author in one commit and as
/// committer in another collapses to one set member.
#[derive(Debug, Clone)]
pub struct Identity {
    name: String,
    email: String,
    role: Role,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn author(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(name, email, Role::Author)
    }

    pub fn committer(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(name, email, Role::Committer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    fn key(&self) -> (&str, &str) {
        (&self.name, &self.email)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Renders as `Name <email>`, the way git shows a signature.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

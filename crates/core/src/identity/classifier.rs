//! Heuristic validity checks for names and email addresses.
//!
//! An email address is valid when it looks like
//! `local@host.suffix` with a suffix from the [`TldTable`]. A name is
//! valid unless it is an email address itself or a bare lowercase
//! username such as `jdoe` or `root`. Both checks are total: any string is
//! accepted as input and the answer is a plain `bool`.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::person::Identity;
use crate::tld::TldTable;

static LOCAL_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.+_-]+$").expect("literal regex"));

static HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.+-]+$").expect("literal regex"));

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9.+_-]*$").expect("literal regex"));

/// Validity checks bound to a suffix table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'t> {
    tlds: &'t TldTable,
}

impl<'t> Classifier<'t> {
    pub fn new(tlds: &'t TldTable) -> Self {
        Self { tlds }
    }

    /// Check `email` against `^[A-Za-z0-9.+_-]+@[A-Za-z0-9.+-]+\.(<tld>)$`.
    pub fn is_valid_email(&self, email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if !LOCAL_PART.is_match(local) {
            return false;
        }
        // The host may itself contain dots, so try every split point.
        domain.match_indices('.').any(|(dot, _)| {
            let (host, suffix) = (&domain[..dot], &domain[dot + 1..]);
            HOST.is_match(host) && self.tlds.contains(suffix)
        })
    }

    /// A name is invalid if it is an email address or a lowercase username.
    pub fn is_valid_name(&self, name: &str) -> bool {
        !(self.is_valid_email(name) || USERNAME.is_match(name))
    }

    pub fn is_valid(&self, identity: &Identity) -> bool {
        self.is_valid_name(identity.name()) && self.is_valid_email(identity.email())
    }

    /// Split `"Jane Roe jane@example.com"` into `("Jane Roe", "jane@example.com")`.
    ///
    /// Returns `None` unless the text after the last space is a valid email
    /// address. The prefix may be empty but must stay on one line.
    pub fn split_embedded_email<'a>(&self, name: &'a str) -> Option<(&'a str, &'a str)> {
        let (prefix, address) = name.rsplit_once(' ')?;
        if prefix.contains('\n') || !self.is_valid_email(address) {
            return None;
        }
        Some((prefix, address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tlds() -> TldTable {
        ["com", "org", "co.uk", "de"].into_iter().collect()
    }

    #[test]
    fn test_valid_email_address() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        assert!(classifier.is_valid_email("bdrung@ubuntu.com"));
        assert!(classifier.is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(classifier.is_valid_email("UPPER@Example.com"));
    }

    #[test]
    fn test_invalid_email_addresses() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        assert!(!classifier.is_valid_email(""));
        assert!(!classifier.is_valid_email("iain@intrepid"));
        assert!(!classifier.is_valid_email("jdoe@localhost"));
        assert!(!classifier.is_valid_email("no-at-sign.com"));
        assert!(!classifier.is_valid_email("@example.com"));
        assert!(!classifier.is_valid_email("jdoe@.com"));
        assert!(!classifier.is_valid_email("jdoe@example.invalid"));
        assert!(!classifier.is_valid_email("two@at@example.com"));
        assert!(!classifier.is_valid_email("with space@example.com"));
        assert!(!classifier.is_valid_email("under_score@exa_mple.com"));
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        let tlds: TldTable = ["com"].into_iter().collect();
        let classifier = Classifier::new(&tlds);
        assert!(!classifier.is_valid_email("john@EXAMPLE.COM"));
        assert!(!classifier.is_valid_email("john@example.Com"));
        assert!(!classifier.is_valid_email("UPPER@EXAMPLE.COM"));
        // Not an address by the same rule, and not lowercase, so a fine name.
        assert!(classifier.is_valid_name("JOHN@EXAMPLE.COM"));
    }

    #[test]
    fn test_valid_user_name() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        assert!(classifier.is_valid_name("Benjamin Drung"));
        assert!(classifier.is_valid_name("John Doe"));
        assert!(classifier.is_valid_name("Mathiaz"));
        assert!(classifier.is_valid_name("jdoe@localhost"));
    }

    #[test]
    fn test_invalid_user_names() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        assert!(!classifier.is_valid_name(""));
        assert!(!classifier.is_valid_name("bdrung@ubuntu.com"));
        assert!(!classifier.is_valid_name("mathiaz"));
        assert!(!classifier.is_valid_name("j.doe-42"));
    }

    #[test]
    fn test_identity_needs_both_fields_valid() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        assert!(classifier.is_valid(&Identity::author("John Doe", "john@example.com")));
        assert!(!classifier.is_valid(&Identity::author("jdoe", "john@example.com")));
        assert!(!classifier.is_valid(&Identity::author("John Doe", "jdoe@localhost")));
        assert!(!classifier.is_valid(&Identity::author("jdoe", "jdoe@localhost")));
    }

    #[test]
    fn test_odd_input_never_panics() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        for input in ["@", ".", "@.", "a@.", "a@b.", "ä@ö.com", "\n", "a@b.com\n", "\u{0}"] {
            let _ = classifier.is_valid_email(input);
            let _ = classifier.is_valid_name(input);
            let _ = classifier.split_embedded_email(input);
        }
        assert!(!classifier.is_valid_email("a@b.com\n"));
    }

    #[test]
    fn test_split_embedded_email() {
        let tlds = tlds();
        let classifier = Classifier::new(&tlds);
        assert_eq!(
            classifier.split_embedded_email("Jane Roe jane@example.com"),
            Some(("Jane Roe", "jane@example.com"))
        );
        assert_eq!(classifier.split_embedded_email("bdrung@ubuntu.com"), None);
        assert_eq!(classifier.split_embedded_email("Jane Roe jane@localhost"), None);
        assert_eq!(classifier.split_embedded_email("jane@example.com Jane Roe"), None);
    }
}

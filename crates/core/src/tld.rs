//! Table of recognized public suffixes used to validate email domains.
//!
//! The table is built from a file in Public Suffix List format. Loading and
//! parsing the list is expensive relative to a single lookup, so the binary
//! loads it once through [`TldTable::global`] and hands out `&TldTable`
//! references from then on.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::errors::TldError;

/// Default location of the Public Suffix List on Debian/Ubuntu systems.
pub const DEFAULT_SUFFIX_LIST: &str = "/usr/share/publicsuffix/public_suffix_list.dat";

static GLOBAL_TABLE: OnceLock<TldTable> = OnceLock::new();

/// Immutable set of known public suffixes (e.g. `com`, `co.uk`, `org`).
#[derive(Debug, Clone, Default)]
pub struct TldTable {
    suffixes: HashSet<String>,
}

impl TldTable {
    /// Parse Public Suffix List text.
    ///
    /// Only the first whitespace-delimited token of each line is used.
    /// Comment (`//`) and blank lines are skipped. Wildcard rules (`*.ck`)
    /// and exception rules (`!www.ck`) both contribute their parent suffix.
    pub fn parse(contents: &str) -> Self {
        let suffixes = contents
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .filter(|rule| !rule.starts_with("//"))
            .filter_map(normalize_rule)
            .collect();
        Self { suffixes }
    }

    /// Load and parse a suffix list file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TldError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading public suffix list");

        if !path.exists() {
            return Err(TldError::SourceNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let table = Self::parse(&contents);
        if table.is_empty() {
            return Err(TldError::Empty(path.display().to_string()));
        }

        debug!(count = table.len(), "parsed public suffixes");
        Ok(table)
    }

    /// Return the process-wide table, loading it from `path` on first use.
    ///
    /// The first successful load wins. Later calls return the cached table
    /// and ignore `path`. A failed load caches nothing.
    pub fn global<P: AsRef<Path>>(path: P) -> Result<&'static TldTable, TldError> {
        if let Some(table) = GLOBAL_TABLE.get() {
            return Ok(table);
        }
        let table = Self::load(path)?;
        Ok(GLOBAL_TABLE.get_or_init(|| table))
    }

    /// `true` if `suffix` is exactly one of the listed suffixes.
    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TldTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let suffixes = iter
            .into_iter()
            .filter_map(|s| {
                let rule: String = s.into();
                normalize_rule(&rule)
            })
            .collect();
        Self { suffixes }
    }
}

/// Reduce a single PSL rule to the suffix it makes recognizable.
fn normalize_rule(rule: &str) -> Option<String> {
    let suffix = if let Some(rest) = rule.strip_prefix("*.") {
        rest
    } else if let Some(rest) = rule.strip_prefix('!') {
        rest.split_once('.').map(|(_, parent)| parent)?
    } else {
        rule
    };
    let suffix = suffix.trim_matches('.');
    if suffix.is_empty() {
        None
    } else {
        Some(suffix.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
// ===BEGIN ICANN DOMAINS===

// com : https://www.iana.org/domains/root/db/com.html
com
org
uk
co.uk

// ck : https://en.wikipedia.org/wiki/.ck
*.ck
!www.ck
de    trailing text is ignored
";

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let table = TldTable::parse(SAMPLE);
        assert!(table.contains("com"));
        assert!(table.contains("co.uk"));
        assert!(table.contains("de"));
        assert!(!table.contains("//"));
        assert!(!table.contains(""));
    }

    #[test]
    fn test_wildcard_and_exception_rules() {
        let table = TldTable::parse(SAMPLE);
        assert!(table.contains("ck"));
        assert!(!table.contains("*.ck"));
        assert!(!table.contains("www.ck"));
    }

    #[test]
    fn test_contains_is_exact() {
        let table = TldTable::parse(SAMPLE);
        assert!(table.contains("com"));
        assert!(!table.contains("COM"));
        assert!(!table.contains("Co.Uk"));
        assert!(!table.contains("localhost"));
    }

    #[test]
    fn test_from_iterator() {
        let table: TldTable = ["com", "net", ""].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert!(table.contains("net"));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = TldTable::load("/nonexistent/public_suffix_list.dat");
        assert!(matches!(result, Err(TldError::SourceNotFound(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dat");
        std::fs::write(&path, "// only a comment\n\n").unwrap();

        let result = TldTable::load(&path);
        assert!(matches!(result, Err(TldError::Empty(_))));
    }

    #[test]
    fn test_global_first_load_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.dat");
        let second = dir.path().join("second.dat");
        std::fs::write(&first, SAMPLE).unwrap();
        std::fs::write(&second, "example\n").unwrap();

        let a = TldTable::global(&first).unwrap();
        let b = TldTable::global(&second).unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(!b.contains("example"));

        // Cached even when the path no longer resolves.
        let c = TldTable::global("/nonexistent/public_suffix_list.dat").unwrap();
        assert!(std::ptr::eq(a, c));
    }
}

use std::path::{Path, PathBuf};

/// One hostname from the roster, with the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub hostname: String,
    pub source_line: usize,
}

/// Validated host list: non-empty, no case-insensitive duplicates, file order.
///
/// Only built by the roster loader and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Roster {
    source: PathBuf,
    entries: Vec<HostEntry>,
}

impl Roster {
    pub(crate) fn new(source: PathBuf, entries: Vec<HostEntry>) -> Self {
        debug_assert!(!entries.is_empty());
        Self { source, entries }
    }

    /// Where the roster was read from, for diagnostics.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn entries(&self) -> &[HostEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a loaded roster.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// "There is 1 host" / "There are N hosts".
    pub fn count_phrase(&self) -> String {
        match self.len() {
            1 => "There is 1 host".to_string(),
            n => format!("There are {} hosts", n),
        }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a HostEntry;
    type IntoIter = std::slice::Iter<'a, HostEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Host roster parser.
//!
//! Format: one or more whitespace-separated hostnames per line. Lines that are
//! blank, or whose first character is `#`, are skipped without tokenizing.
//! Hostnames must be unique ignoring case.

use crate::core::error::RotateError;
use crate::models::host::{HostEntry, Roster};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read and validate a roster file.
pub fn load_roster(path: &Path) -> Result<Roster, RotateError> {
    let content = fs::read_to_string(path).map_err(|source| RotateError::RosterUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_roster_content(&content, path)
}

/// Parse roster content (testable without filesystem). `path` is only used
/// in diagnostics.
pub fn parse_roster_content(content: &str, path: &Path) -> Result<Roster, RotateError> {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        for host in line.split_whitespace() {
            let key = host.to_lowercase();
            if let Some(&first_line) = first_seen.get(&key) {
                return Err(RotateError::DuplicateHost {
                    path: path.to_path_buf(),
                    host: host.to_string(),
                    first_line,
                    second_line: line_num,
                });
            }
            first_seen.insert(key, line_num);
            entries.push(HostEntry {
                hostname: host.to_string(),
                source_line: line_num,
            });
        }
    }

    if entries.is_empty() {
        return Err(RotateError::EmptyRoster {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), hosts = entries.len(), "roster loaded");
    Ok(Roster::new(path.to_path_buf(), entries))
}

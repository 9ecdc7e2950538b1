//! Terminal failures of a rotation run.

use crate::core::error_catalog::PolicyCategory;
use std::path::PathBuf;
use thiserror::Error;

/// Every variant ends the run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum RotateError {
    #[error("cannot open host file \"{}\" for reading", .path.display())]
    RosterUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "line {second_line} in host file \"{}\" has a duplicate entry for host \"{host}\" - see previous line {first_line}",
        .path.display()
    )]
    DuplicateHost {
        path: PathBuf,
        host: String,
        first_line: usize,
        second_line: usize,
    },

    #[error("host file \"{}\" does not contain any host names", .path.display())]
    EmptyRoster { path: PathBuf },

    #[error("too many attempts - giving up")]
    PromptExhausted,

    #[error("cannot read from terminal: {0}")]
    Console(#[source] std::io::Error),

    #[error("problem logging into host \"{host}\" (line {line})")]
    IdentityQuery {
        host: String,
        line: usize,
        detail: String,
    },

    #[error(
        "line {second_line} in host file \"{}\" points to a PDU with the same serial number \"{serial}\" - see previous line {first_line}",
        .path.display()
    )]
    IdentityCollision {
        path: PathBuf,
        serial: String,
        first_line: usize,
        second_line: usize,
    },

    #[error("problem changing password on host \"{host}\"")]
    ChangeTransport {
        host: String,
        detail: String,
        changed: usize,
        remaining: usize,
    },

    #[error("password change on host \"{host}\" failed with return code={}", .category.code())]
    ChangePolicy {
        host: String,
        category: PolicyCategory,
        changed: usize,
        remaining: usize,
    },

    #[error("new password is the same as the old password - quitting")]
    SameCredential,

    #[error("cannot change the admin user \"{username}\" with this utility")]
    AdminAccountRejected { username: String },
}

impl RotateError {
    /// Extra line shown under the main message: a cleaned device message or
    /// the policy category.
    pub fn detail(&self) -> Option<String> {
        match self {
            RotateError::IdentityQuery { detail, .. } | RotateError::ChangeTransport { detail, .. } => {
                Some(detail.clone())
            }
            RotateError::ChangePolicy { category, .. } => Some(category.to_string()),
            _ => None,
        }
    }

    /// For rotation failures: hosts already changed and hosts left untouched.
    pub fn partial_progress(&self) -> Option<(usize, usize)> {
        match self {
            RotateError::ChangeTransport {
                changed, remaining, ..
            }
            | RotateError::ChangePolicy {
                changed, remaining, ..
            } => Some((*changed, *remaining)),
            _ => None,
        }
    }
}

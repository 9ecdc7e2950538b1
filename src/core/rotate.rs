//! Credential rotation across the fleet.
//!
//! Hosts are changed one at a time in roster order and the run stops at the
//! first failure. Hosts changed before the failure keep the new password;
//! nothing is rolled back. The returned error says how many were changed.

use crate::core::error::RotateError;
use crate::core::error_catalog::PolicyCategory;
use crate::device::DeviceApi;
use crate::models::credential::Credential;
use crate::models::host::{HostEntry, Roster};

/// Result of changing the password on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    Success,
    TransportFailure(String),
    PolicyFailure(i64),
}

/// Applies a new credential to one device.
pub struct CredentialRotator<'a, D: DeviceApi> {
    device: D,
    username: &'a str,
}

impl<'a, D: DeviceApi> CredentialRotator<'a, D> {
    pub fn new(device: D, username: &'a str) -> Self {
        Self { device, username }
    }

    pub fn rotate_host(
        &self,
        entry: &HostEntry,
        current: &Credential,
        replacement: &Credential,
    ) -> RotationOutcome {
        match self.device.change_credential(
            &entry.hostname,
            self.username,
            current.expose(),
            replacement.expose(),
        ) {
            Ok(0) => RotationOutcome::Success,
            Ok(code) => RotationOutcome::PolicyFailure(code),
            Err(failure) => RotationOutcome::TransportFailure(failure.display_message()),
        }
    }
}

/// Drives `CredentialRotator` over a roster with abort-on-first-failure.
pub struct FleetRotator<'a, D: DeviceApi> {
    rotator: CredentialRotator<'a, D>,
}

impl<'a, D: DeviceApi> FleetRotator<'a, D> {
    pub fn new(device: D, username: &'a str) -> Self {
        Self {
            rotator: CredentialRotator::new(device, username),
        }
    }

    /// Change the password on every host. Returns the number of hosts changed.
    ///
    /// `SameCredential` is returned before any device is contacted.
    pub fn rotate(
        &self,
        roster: &Roster,
        current: &Credential,
        replacement: &Credential,
        mut on_host: impl FnMut(&HostEntry),
    ) -> Result<usize, RotateError> {
        if current == replacement {
            return Err(RotateError::SameCredential);
        }

        let total = roster.len();
        for (changed, entry) in roster.iter().enumerate() {
            on_host(entry);
            let remaining = total - changed;
            match self.rotator.rotate_host(entry, current, replacement) {
                RotationOutcome::Success => {
                    tracing::info!(host = %entry.hostname, "password changed");
                }
                RotationOutcome::TransportFailure(detail) => {
                    tracing::warn!(host = %entry.hostname, changed, "password change failed in transport");
                    return Err(RotateError::ChangeTransport {
                        host: entry.hostname.clone(),
                        detail,
                        changed,
                        remaining,
                    });
                }
                RotationOutcome::PolicyFailure(code) => {
                    tracing::warn!(host = %entry.hostname, code, changed, "password change refused");
                    return Err(RotateError::ChangePolicy {
                        host: entry.hostname.clone(),
                        category: PolicyCategory::from_code(code),
                        changed,
                        remaining,
                    });
                }
            }
        }

        Ok(total)
    }
}

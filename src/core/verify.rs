//! Fleet verification: the current credential works everywhere and every
//! roster entry is a distinct physical device.
//!
//! Stops at the first failing host; no aggregate report is attempted.

use crate::core::error::RotateError;
use crate::device::{DeviceApi, DeviceIdentity};
use crate::models::credential::Credential;
use crate::models::host::{HostEntry, Roster};
use std::collections::HashMap;

/// A host that answered with a unique serial number.
#[derive(Debug, Clone)]
pub struct VerifiedHost {
    pub entry: HostEntry,
    pub identity: DeviceIdentity,
}

/// Result of a fully successful verification pass.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub hosts: Vec<VerifiedHost>,
}

impl VerificationReport {
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

/// Serial number to the roster line that first reported it. Lives for one pass.
#[derive(Debug, Default)]
struct SerialRegistry {
    first_line: HashMap<String, usize>,
}

impl SerialRegistry {
    /// Record `serial` for `line`, or return the line that already owns it.
    fn claim(&mut self, serial: &str, line: usize) -> Result<(), usize> {
        if let Some(&first) = self.first_line.get(serial) {
            return Err(first);
        }
        self.first_line.insert(serial.to_string(), line);
        Ok(())
    }
}

pub struct FleetVerifier<'a, D: DeviceApi> {
    device: D,
    username: &'a str,
}

impl<'a, D: DeviceApi> FleetVerifier<'a, D> {
    pub fn new(device: D, username: &'a str) -> Self {
        Self { device, username }
    }

    /// Query one device for its identity.
    pub fn check_host(
        &self,
        entry: &HostEntry,
        credential: &Credential,
    ) -> Result<DeviceIdentity, RotateError> {
        self.device
            .get_identity(&entry.hostname, self.username, credential.expose())
            .map_err(|failure| {
                tracing::warn!(host = %entry.hostname, kind = ?failure.kind, "identity query failed");
                RotateError::IdentityQuery {
                    host: entry.hostname.clone(),
                    line: entry.source_line,
                    detail: failure.display_message(),
                }
            })
    }

    /// Verify every host in roster order. `on_host` is called before each
    /// host is contacted.
    pub fn verify(
        &self,
        roster: &Roster,
        credential: &Credential,
        mut on_host: impl FnMut(&HostEntry),
    ) -> Result<VerificationReport, RotateError> {
        let mut seen_hosts: HashMap<&str, usize> = HashMap::new();
        let mut serials = SerialRegistry::default();
        let mut report = VerificationReport::default();

        for entry in roster {
            on_host(entry);

            if let Some(&first_line) = seen_hosts.get(entry.hostname.as_str()) {
                return Err(RotateError::DuplicateHost {
                    path: roster.source().to_path_buf(),
                    host: entry.hostname.clone(),
                    first_line,
                    second_line: entry.source_line,
                });
            }
            seen_hosts.insert(&entry.hostname, entry.source_line);

            let identity = self.check_host(entry, credential)?;

            if let Err(first_line) = serials.claim(&identity.serial_number, entry.source_line) {
                return Err(RotateError::IdentityCollision {
                    path: roster.source().to_path_buf(),
                    serial: identity.serial_number,
                    first_line,
                    second_line: entry.source_line,
                });
            }

            tracing::info!(host = %entry.hostname, serial = %identity.serial_number, "host verified");
            report.hosts.push(VerifiedHost {
                entry: entry.clone(),
                identity,
            });
        }

        Ok(report)
    }
}

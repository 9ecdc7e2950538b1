//! Device Management API seam.
//!
//! Core phases only see `DeviceApi`; `jsonrpc` provides the network-backed
//! implementation used by the CLI.

use crate::util::markup::detag;
use thiserror::Error;

pub mod jsonrpc;

/// Identity reported by a device. Opaque beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    pub serial_number: String,
}

/// Broad class of a failed device call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect error, timeout, TLS failure.
    Transport,
    /// The device answered with a non-success HTTP status (bad login included).
    Http,
    /// The device answered but the payload was an RPC error or unreadable.
    Protocol,
}

/// A failed device call. `message` may contain markup from the device.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DeviceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl DeviceFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Message with tags stripped, ready for the operator.
    pub fn display_message(&self) -> String {
        detag(&self.message)
    }
}

/// Operations reachable on every managed device.
pub trait DeviceApi {
    /// Log in and read the device identity.
    fn get_identity(
        &self,
        host: &str,
        username: &str,
        secret: &str,
    ) -> Result<DeviceIdentity, DeviceFailure>;

    /// Log in with `secret` and set the account password to `new_secret`.
    /// Returns the device's application return code (0 on success).
    fn change_credential(
        &self,
        host: &str,
        username: &str,
        secret: &str,
        new_secret: &str,
    ) -> Result<i64, DeviceFailure>;
}

impl<T: DeviceApi + ?Sized> DeviceApi for &T {
    fn get_identity(
        &self,
        host: &str,
        username: &str,
        secret: &str,
    ) -> Result<DeviceIdentity, DeviceFailure> {
        (**self).get_identity(host, username, secret)
    }

    fn change_credential(
        &self,
        host: &str,
        username: &str,
        secret: &str,
        new_secret: &str,
    ) -> Result<i64, DeviceFailure> {
        (**self).change_credential(host, username, secret, new_secret)
    }
}

//! Tool configuration file model.

use crate::constants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub device: DeviceSection,
}

/// How device requests are made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSection {
    /// URL scheme, `https` or `http`.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Verify device TLS certificates (PDUs usually ship self-signed ones).
    #[serde(default)]
    pub verify_tls: bool,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            timeout_secs: default_timeout_secs(),
            verify_tls: false,
        }
    }
}

fn default_scheme() -> String {
    constants::DEFAULT_SCHEME.to_string()
}

fn default_timeout_secs() -> u64 {
    constants::DEVICE_TIMEOUT_SECS
}

//! Centralized constants for accounts, files, prompts and device access.

/// Account this tool refuses to operate on.
pub const ADMIN_USERNAME: &str = "admin";

/// Host roster read when `--hostfile` is not given.
pub const DEFAULT_HOSTFILE: &str = "hosts.txt";

/// Environment variable pointing at an optional TOML config file.
pub const CONFIG_ENV: &str = "PDU_PASSWD_CONFIG";

/// Number of attempts the operator gets to enter a matching secret pair.
pub const MAX_PROMPT_ATTEMPTS: u32 = 3;

/// Per-call timeout for device requests, in seconds.
pub const DEVICE_TIMEOUT_SECS: u64 = 5;

/// Default URL scheme for device requests.
pub const DEFAULT_SCHEME: &str = "https";

/// JSON-RPC resource exposing the PDU nameplate.
pub const PDU_RESOURCE: &str = "/model/pdu/0";

/// JSON-RPC resource prefix for user accounts.
pub const USER_RESOURCE_PREFIX: &str = "/auth/user/";

/// Banner printed when the operator interrupts the run.
pub const INTERRUPT_BANNER: &str = "*** Program stopped by user typing Ctrl^C or Ctrl^Break ***";

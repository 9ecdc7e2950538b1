//! Verify and rotate a user's password across a fleet of PDUs.
//!
//! A run loads the host roster, proves the current password works on every
//! host and that no two roster entries reach the same physical unit, asks the
//! operator to confirm, then changes the password host by host.
//!
//! ## Modules
//! - `cli` — Command-line surface and phase driver
//! - `core` — Roster, prompts, verification, rotation, error taxonomy
//! - `device` — Device Management API seam and JSON-RPC client
//! - `models` — Data structures
//! - `util` — Terminal, logging and markup helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod device;
pub mod models;
pub mod util;

//! Data structures shared across phases.

pub mod config;
pub mod credential;
pub mod host;

//! Core rotation logic: roster, prompts, verification, rotation.

pub mod config;
pub mod error;
pub mod error_catalog;
pub mod prompt;
pub mod roster;
pub mod rotate;
pub mod verify;

//! Terminal, logging and text helpers.

pub mod console;
pub mod logging;
pub mod markup;
pub mod terminal;

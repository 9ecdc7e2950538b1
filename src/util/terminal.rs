//! Controlling-terminal state saved at startup.
//!
//! Secret prompts turn echo off while they read. An interrupt that exits the
//! process mid-read must put the saved settings back first.

use nix::sys::termios::{self, SetArg, Termios};
use std::io;

/// Terminal attributes of stdin, if stdin is a terminal.
pub struct TtyState {
    saved: Option<Termios>,
}

impl TtyState {
    /// Snapshot stdin's attributes. Not a terminal means nothing to restore.
    pub fn capture() -> Self {
        let saved = termios::tcgetattr(io::stdin()).ok();
        if saved.is_none() {
            tracing::debug!("stdin is not a terminal, no tty state saved");
        }
        Self { saved }
    }

    pub fn is_saved(&self) -> bool {
        self.saved.is_some()
    }

    /// Write the snapshot back.
    pub fn restore(&self) {
        if let Some(saved) = &self.saved {
            if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSANOW, saved) {
                tracing::warn!("cannot restore terminal settings: {}", e);
            }
        }
    }
}

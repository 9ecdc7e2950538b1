//! Operator terminal I/O.

use dialoguer::theme::Theme;
use dialoguer::{Input, Password};
use std::fmt;
use std::io;
use zeroize::Zeroizing;

/// Everything the run needs from the operator's terminal.
pub trait Console {
    /// Read a line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Zeroizing<String>>;

    /// Read a visible line of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Show an informational message.
    fn say(&mut self, message: &str);
}

/// Prints prompts exactly as given; callers already format the trailing colon.
struct PlainTheme;

impl Theme for PlainTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{} ", prompt)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{} {}", prompt, sel)
    }

    fn format_password_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
    ) -> fmt::Result {
        write!(f, "{}", prompt)
    }
}

/// Interactive console on the controlling terminal.
#[derive(Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn read_secret(&mut self, prompt: &str) -> io::Result<Zeroizing<String>> {
        Password::with_theme(&PlainTheme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::with_theme(&PlainTheme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}

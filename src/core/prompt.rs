//! Confirmed secret entry with a bounded attempt budget.

use crate::constants;
use crate::core::error::RotateError;
use crate::models::credential::Credential;
use crate::util::console::Console;

/// Why a single attempt was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRejection {
    Empty,
    Mismatch,
}

impl std::fmt::Display for PromptRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptRejection::Empty => f.write_str("Password cannot be null - try again"),
            PromptRejection::Mismatch => f.write_str("Passwords do not match - try again"),
        }
    }
}

/// Suffix both prompts with ` ...` and pad the shorter with dots so the
/// closing colons line up.
pub fn pad_prompts(first: &str, second: &str) -> (String, String) {
    let mut first = format!("{} ...", first);
    let mut second = format!("{} ...", second);

    let first_len = first.chars().count();
    let second_len = second.chars().count();
    if first_len < second_len {
        first.push_str(&".".repeat(second_len - first_len));
    } else {
        second.push_str(&".".repeat(first_len - second_len));
    }

    first.push(':');
    second.push(':');
    (first, second)
}

/// Asks for a secret twice and returns it once both entries match.
pub struct SecurePrompt {
    first: String,
    second: String,
    attempts: u32,
}

impl SecurePrompt {
    pub fn new(first: &str, second: &str) -> Self {
        let (first, second) = pad_prompts(first, second);
        Self {
            first,
            second,
            attempts: constants::MAX_PROMPT_ATTEMPTS,
        }
    }

    /// Prompt for the password the account has today.
    pub fn current(username: &str) -> Self {
        Self::new(
            &format!("Enter password for user {}", username),
            "Enter password again for verification",
        )
    }

    /// Prompt for the password to roll out.
    pub fn replacement(username: &str) -> Self {
        Self::new(
            &format!("Enter new password for user {}", username),
            "Enter password again for verification",
        )
    }

    /// The two padded prompt lines, in the order they are shown.
    pub fn prompts(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }

    /// Run the prompt protocol. Returns `PromptExhausted` after the attempt
    /// budget is spent; input after that is never read.
    pub fn obtain(&self, console: &mut dyn Console) -> Result<Credential, RotateError> {
        for attempt in 1..=self.attempts {
            match self.attempt(console)? {
                Ok(secret) => {
                    tracing::debug!(attempt, "secret confirmed");
                    return Ok(secret);
                }
                Err(rejection) => {
                    tracing::debug!(attempt, ?rejection, "secret entry rejected");
                    console.say(&rejection.to_string());
                }
            }
        }
        Err(RotateError::PromptExhausted)
    }

    fn attempt(
        &self,
        console: &mut dyn Console,
    ) -> Result<Result<Credential, PromptRejection>, RotateError> {
        let first = console
            .read_secret(&self.first)
            .map_err(RotateError::Console)?;
        if first.is_empty() {
            return Ok(Err(PromptRejection::Empty));
        }

        let second = console
            .read_secret(&self.second)
            .map_err(RotateError::Console)?;
        if second.is_empty() {
            return Ok(Err(PromptRejection::Empty));
        }

        if *first != *second {
            return Ok(Err(PromptRejection::Mismatch));
        }
        Ok(Ok(Credential::from(first)))
    }
}

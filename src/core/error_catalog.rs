//! Device return codes for a refused password change.
//!
//! The table is closed: codes 1 through 17 have a meaning, anything else is
//! reported as unknown with the raw code.

/// Semantic category of a non-zero `setAccountPassword` return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyCategory {
    Unchanged,
    Empty,
    TooShort,
    TooLong,
    ContainsControlChars,
    MissingLowercase,
    MissingUppercase,
    MissingNumeric,
    MissingSpecial,
    ReusedInHistory,
    TooShortForSecondaryProtocol,
    InvalidArgument,
    WrongCredential,
    PublicKeyTooLarge,
    PublicKeyInvalid,
    PublicKeyUnsupported,
    PublicKeyTooShort,
    UnknownCode(i64),
}

/// Indexed by `code - 1`.
static CATALOG: [(PolicyCategory, &str); 17] = [
    (PolicyCategory::Unchanged, "Password Unchanged"),
    (PolicyCategory::Empty, "Password Empty"),
    (PolicyCategory::TooShort, "Password Too Short"),
    (PolicyCategory::TooLong, "Password Too Long"),
    (PolicyCategory::ContainsControlChars, "Password Ctrl Chars"),
    (PolicyCategory::MissingLowercase, "Password Need Lower"),
    (PolicyCategory::MissingUppercase, "Password Need Upper"),
    (PolicyCategory::MissingNumeric, "Password Need Numeric"),
    (PolicyCategory::MissingSpecial, "Password Need Special"),
    (PolicyCategory::ReusedInHistory, "Password In History"),
    (PolicyCategory::TooShortForSecondaryProtocol, "Password Too Short For SNMP"),
    (PolicyCategory::InvalidArgument, "Invalid Argument"),
    (PolicyCategory::WrongCredential, "Wrong Password"),
    (PolicyCategory::PublicKeyTooLarge, "Ssh Pubkey Data Too Large"),
    (PolicyCategory::PublicKeyInvalid, "Ssh Pubkey Invalid"),
    (PolicyCategory::PublicKeyUnsupported, "Ssh Pubkey Not Supported"),
    (PolicyCategory::PublicKeyTooShort, "Ssh RSA Pubkey Too Short"),
];

fn catalog_entry(code: i64) -> Option<&'static (PolicyCategory, &'static str)> {
    usize::try_from(code)
        .ok()
        .and_then(|c| c.checked_sub(1))
        .and_then(|idx| CATALOG.get(idx))
}

impl PolicyCategory {
    pub fn from_code(code: i64) -> Self {
        catalog_entry(code)
            .map(|(category, _)| *category)
            .unwrap_or(PolicyCategory::UnknownCode(code))
    }

    /// The device's return code for this category.
    pub fn code(&self) -> i64 {
        match self {
            PolicyCategory::UnknownCode(code) => *code,
            known => CATALOG
                .iter()
                .position(|(category, _)| category == known)
                .map(|idx| idx as i64 + 1)
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match catalog_entry(self.code()) {
            Some((_, text)) if !matches!(self, PolicyCategory::UnknownCode(_)) => f.write_str(text),
            _ => write!(f, "Unknown error code (rc={})", self.code()),
        }
    }
}

use zeroize::Zeroizing;

/// An in-memory secret. Wiped on drop, redacted in `Debug`, never displayed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Borrow the secret for a device call.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Zeroizing<String>> for Credential {
    fn from(secret: Zeroizing<String>) -> Self {
        Self(secret)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

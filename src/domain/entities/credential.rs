use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer credential proving identity to the API.
///
/// The raw value is only reachable through [`Credential::expose`]; `Debug`
/// output is redacted.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wraps a raw bearer string. Blank values are not credentials.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw: String = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(SecretString::new(trimmed.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

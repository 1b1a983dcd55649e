//! Validated email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on address length, per RFC 5321.
pub const MAX_EMAIL_LEN: usize = 254;

/// Why an email address was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing left after trimming surrounding whitespace.
    #[error("email address is empty")]
    Blank,
    /// Longer than [`MAX_EMAIL_LEN`] characters.
    #[error("email address is longer than {MAX_EMAIL_LEN} characters")]
    Oversized,
    /// Missing the `name@host` shape (no `@`, an empty half, or embedded
    /// whitespace).
    #[error("email address must look like name@host")]
    Malformed,
}

/// An email address that passed structural validation.
///
/// Checkout and the auth forms funnel raw user input through
/// [`Email::parse`] before it reaches a backend payload, and order history
/// is filtered by the stored address, so the accepted value is trimmed and
/// lowercased on the way in. Validation is structural only; whether the
/// mailbox exists is the backend's problem.
///
/// ```
/// use miga_core::Email;
///
/// let email = Email::parse("  Clienta@Migabakery.CL ").unwrap();
/// assert_eq!(email.as_str(), "clienta@migabakery.cl");
///
/// assert!(Email::parse("sin-arroba").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate and normalize a raw address.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the trimmed input is empty, oversized,
    /// or not shaped like `name@host`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Blank);
        }
        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(EmailError::Oversized);
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(EmailError::Malformed);
        }
        match trimmed.split_once('@') {
            Some((local, host)) if !local.is_empty() && !host.is_empty() => {
                Ok(Self(trimmed.to_ascii_lowercase()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// The normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned normalized address.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_addresses() {
        for ok in [
            "clienta@migabakery.cl",
            "nombre.apellido@example.com",
            "pedidos+enero@example.co.uk",
            "a@b.c",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok} should parse");
        }
    }

    #[test]
    fn normalizes_case_and_padding() {
        let email = Email::parse("  Clienta@Migabakery.CL\n").unwrap();
        assert_eq!(email.as_str(), "clienta@migabakery.cl");
        assert_eq!(email.to_string(), "clienta@migabakery.cl");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Email::parse(""), Err(EmailError::Blank));
        assert_eq!(Email::parse("   "), Err(EmailError::Blank));
    }

    #[test]
    fn rejects_oversized_input() {
        let long = format!("{}@example.com", "x".repeat(MAX_EMAIL_LEN));
        assert_eq!(Email::parse(&long), Err(EmailError::Oversized));
    }

    #[test]
    fn rejects_missing_or_empty_halves() {
        for bad in ["sin-arroba", "@migabakery.cl", "clienta@"] {
            assert_eq!(Email::parse(bad), Err(EmailError::Malformed), "{bad}");
        }
    }

    #[test]
    fn rejects_embedded_whitespace() {
        assert_eq!(
            Email::parse("clien ta@migabakery.cl"),
            Err(EmailError::Malformed)
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let email = Email::parse("clienta@migabakery.cl").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"clienta@migabakery.cl\"");
        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }

    #[test]
    fn parses_via_from_str() {
        let email: Email = "clienta@migabakery.cl".parse().unwrap();
        assert_eq!(email.as_str(), "clienta@migabakery.cl");
    }
}

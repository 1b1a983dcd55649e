//! Runtime configuration.
//!
//! All settings come from the environment; a `.env` file is honored for
//! local development. Loading is strict: a missing variable, an unparseable
//! value, or a weak session secret stops the process at startup instead of
//! turning into a 500 on the first request.
//!
//! Required:
//! - `BAKERY_API_URL` - base URL of the bakery REST backend
//! - `STOREFRONT_BASE_URL` - public URL of this site
//! - `STOREFRONT_SESSION_SECRET` - 32+ characters of real randomness
//!
//! Optional:
//! - `STOREFRONT_HOST` / `STOREFRONT_PORT` - bind address (127.0.0.1:3000)
//! - `BAKERY_API_TOKEN` - bearer token when the backend sits behind a gateway
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`,
//!   `SENTRY_TRACES_SAMPLE_RATE` - error tracking

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Session secrets shorter than this are refused outright.
const SESSION_SECRET_MIN_LEN: usize = 32;

/// Below this per-character entropy a secret looks hand-typed, not generated.
const SECRET_MIN_BITS_PER_CHAR: f64 = 3.3;

/// Substrings that give away a copy-pasted placeholder secret.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "changeme", "example", "fixme", "insert", "password", "placeholder",
    "replace", "sample", "secret", "todo", "your-", "xxx",
];

/// What went wrong while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} is not set")]
    Missing { var: &'static str },
    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("refusing weak secret in {var}: {reason}")]
    WeakSecret { var: &'static str, reason: String },
}

/// Storefront settings, loaded once in `main`.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Interface the server binds to.
    pub host: IpAddr,
    /// Port the server listens on.
    pub port: u16,
    /// Public base URL of the site, used for cookie security.
    pub base_url: String,
    /// Session secret, vetted at startup.
    pub session_secret: SecretString,
    /// Where the bakery REST backend lives.
    pub backend: BackendConfig,
    /// Sentry DSN; error tracking is off when unset.
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag.
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry.
    pub sentry_sample_rate: f32,
    /// Fraction of requests traced as transactions.
    pub sentry_traces_sample_rate: f32,
}

/// Connection settings for the bakery REST backend.
///
/// `Debug` is written by hand so the bearer token never lands in a log line.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://api.migabakery.cl`, without a trailing slash.
    pub base_url: String,
    /// Bearer token for gateway-fronted deployments.
    pub api_token: Option<SecretString>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl StorefrontConfig {
    /// Read and validate every setting from the environment.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered; the caller is expected
    /// to abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parsed_or("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: parsed_or("STOREFRONT_PORT", 3000)?,
            base_url: required("STOREFRONT_BASE_URL")?,
            session_secret: vetted_session_secret("STOREFRONT_SESSION_SECRET")?,
            backend: BackendConfig::from_env()?,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parsed_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parsed_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Address to bind the listener to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BackendConfig {
    /// Read the backend settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or malformed, or when
    /// the token fails vetting.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = required("BAKERY_API_URL")?;
        let parsed = url::Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            var: "BAKERY_API_URL",
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                var: "BAKERY_API_URL",
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        let api_token = optional("BAKERY_API_TOKEN")
            .map(|token| vet_secret("BAKERY_API_TOKEN", &token).map(|()| SecretString::from(token)))
            .transpose()?;

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::Missing { var })
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

/// Parse a variable, falling back to `default` when it is unset.
fn parsed_or<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn vetted_session_secret(var: &'static str) -> Result<SecretString, ConfigError> {
    let raw = required(var)?;
    if raw.len() < SESSION_SECRET_MIN_LEN {
        return Err(ConfigError::WeakSecret {
            var,
            reason: format!("{} characters, need at least {SESSION_SECRET_MIN_LEN}", raw.len()),
        });
    }
    vet_secret(var, &raw)?;
    Ok(SecretString::from(raw))
}

/// Reject placeholder strings and anything with too little entropy to be a
/// generated secret.
fn vet_secret(var: &'static str, raw: &str) -> Result<(), ConfigError> {
    let folded = raw.to_ascii_lowercase();
    if let Some(marker) = PLACEHOLDER_MARKERS.iter().find(|m| folded.contains(*m)) {
        return Err(ConfigError::WeakSecret {
            var,
            reason: format!("looks like a placeholder (contains {marker:?})"),
        });
    }

    let bits = bits_per_char(raw);
    if bits < SECRET_MIN_BITS_PER_CHAR {
        return Err(ConfigError::WeakSecret {
            var,
            reason: format!(
                "{bits:.2} bits of entropy per character, expected at least \
                 {SECRET_MIN_BITS_PER_CHAR}; generate one randomly"
            ),
        });
    }

    Ok(())
}

/// Shannon entropy of the byte distribution, in bits per byte.
#[allow(clippy::cast_precision_loss, clippy::indexing_slicing)]
fn bits_per_char(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts = [0u32; 256];
    for byte in s.bytes() {
        counts[usize::from(byte)] += 1;
    }

    let len = s.len() as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = f64::from(count) / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GENERATED: &str = "kF7#wQ2!bN9@dT4$hR8%mZ1^vC6&xJ3*";

    #[test]
    fn entropy_of_uniform_string_is_zero() {
        assert!(bits_per_char("").abs() < f64::EPSILON);
        assert!(bits_per_char("zzzzzzzz").abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_of_two_symbols_is_one_bit() {
        assert!((bits_per_char("abababab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn generated_secret_passes_vetting() {
        assert!(vet_secret("TEST", GENERATED).is_ok());
    }

    #[test]
    fn placeholder_marker_fails_vetting() {
        for weak in ["changeme-please-1234", "your-key-goes-here!", "N0tMyPassword#2024"] {
            let err = vet_secret("TEST", weak).unwrap_err();
            assert!(matches!(err, ConfigError::WeakSecret { .. }), "{weak}");
        }
    }

    #[test]
    fn repetitive_secret_fails_vetting() {
        assert!(vet_secret("TEST", &"ab".repeat(20)).is_err());
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = StorefrontConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            session_secret: SecretString::from(GENERATED),
            backend: BackendConfig {
                base_url: "http://localhost:4000".to_string(),
                api_token: None,
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn backend_debug_never_prints_the_token() {
        let config = BackendConfig {
            base_url: "http://localhost:4000".to_string(),
            api_token: Some(SecretString::from("kF7#wQ2!bN9@dT4$hR8%mZ1^vC6&xJ3*")),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("localhost:4000"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("kF7#wQ2"));
    }
}

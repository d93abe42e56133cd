//! Credential management for lemon.markets API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_VAR: &str = "LEMON_MARKETS_ACCESS_TOKEN";

/// API credentials containing the bearer access token.
#[derive(Clone)]
pub struct Credentials {
    access_token: SecretString,
}

impl Credentials {
    /// Create new credentials from an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// Get the access token.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.expose_token())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager or a token refresher.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(access_token),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `LEMON_MARKETS_ACCESS_TOKEN`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from a custom environment variable name.
    ///
    /// # Panics
    ///
    /// Panics if the environment variable is not set.
    pub fn from_env_var(token_var: &str) -> Self {
        let access_token = std::env::var(token_var)
            .unwrap_or_else(|_| panic!("Environment variable {token_var} not set"));

        Self {
            credentials: Credentials::new(access_token),
        }
    }

    /// Try to create credentials from the default environment variable.
    ///
    /// Returns `None` if the environment variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var(ACCESS_TOKEN_VAR)
    }

    /// Try to create credentials from a custom environment variable name.
    pub fn try_from_env_var(token_var: &str) -> Option<Self> {
        let access_token = std::env::var(token_var).ok()?;

        Some(Self {
            credentials: Credentials::new(access_token),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

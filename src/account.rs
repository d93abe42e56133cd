//! Account handle shared by every resource of one brokerage account.

use std::sync::Arc;

use crate::auth::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};

/// Opaque identity handle used to authorize requests.
///
/// Cloning is cheap; clones share the same credentials provider. Resources such as
/// [`Space`](crate::Space) and [`State`](crate::State) keep a clone and pass it to the
/// request helper, they never mutate it.
#[derive(Clone)]
pub struct Account {
    credentials: Arc<dyn CredentialsProvider>,
}

impl Account {
    /// Create an account from any credentials provider.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self { credentials }
    }

    /// Create an account from a fixed access token.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self::new(Arc::new(StaticCredentials::new(access_token)))
    }

    /// Create an account from `LEMON_MARKETS_ACCESS_TOKEN`, if set.
    pub fn try_from_env() -> Option<Self> {
        EnvCredentials::try_from_env().map(|creds| Self::new(Arc::new(creds)))
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        self.credentials.get_credentials()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("credentials", self.credentials())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_debug_hides_token() {
        let account = Account::with_token("very_secret");
        let debug_str = format!("{:?}", account);
        assert!(debug_str.starts_with("Account"));
        assert!(!debug_str.contains("very_secret"));
    }

    #[test]
    fn test_clones_share_credentials() {
        let account = Account::with_token("abc");
        let clone = account.clone();
        assert_eq!(clone.credentials().expose_token(), "abc");
    }
}

use std::fmt::{Debug, Formatter};

/// Credential that holds the storage account name and shared key.
///
/// Owned by the client instance and used only to derive signatures; the key
/// itself is never transmitted.
#[derive(Clone, Default)]
pub struct Credential {
    /// Storage account name.
    pub account_name: String,
    /// Base64 encoded storage account key.
    pub account_key: String,
}

impl Credential {
    /// Create a new shared key credential.
    pub fn new(account_name: impl Into<String>, account_key: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            account_key: account_key.into(),
        }
    }

    /// Check if the credential carries both an account name and a key.
    pub fn is_valid(&self) -> bool {
        !self.account_name.is_empty() && !self.account_key.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("account_name", &self.account_name)
            .field("account_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let cred = Credential::new("acct", "c2VjcmV0");
        let repr = format!("{cred:?}");
        assert!(repr.contains("acct"));
        assert!(!repr.contains("c2VjcmV0"));
    }

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("acct", "key").is_valid());
        assert!(!Credential::new("", "key").is_valid());
        assert!(!Credential::new("acct", "").is_valid());
    }
}

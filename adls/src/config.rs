use std::collections::HashMap;
use std::env;

use lakeload_core::{Error, Result, RetryPolicy};

use crate::constants::*;
use crate::Credential;

/// Config carries everything the execution host would have injected:
/// credentials, destination filesystem, the application name recorded in
/// completion records, and the two retry policies.
///
/// Constructed explicitly and passed to the client; there is no
/// attribute or reflection based wiring.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `StorageAccountName`
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `StorageAccountKey`
    pub account_key: Option<String>,
    /// Filesystem batches land in. Defaults to `raw`.
    pub filesystem: Option<String>,
    /// Application name recorded in completion records.
    ///
    /// - this field if it's `is_some`
    /// - env value: `Application`
    pub application: Option<String>,
    /// Endpoint override, mainly for emulators and tests. When unset the
    /// client targets `https://<account>.dfs.core.windows.net`.
    pub endpoint: Option<String>,
    /// Retry policy for the storage-write path.
    pub upload_retry: RetryPolicy,
    /// Retry policy for the downstream queue-enqueue path. The enqueue
    /// itself lives outside this crate; the policy is configured here so
    /// both paths are tuned in one place.
    pub catalog_retry: RetryPolicy,
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self) -> Self {
        let envs = env::vars().collect::<HashMap<_, _>>();

        if let Some(v) = envs.get(STORAGE_ACCOUNT_NAME) {
            self.account_name = Some(v.to_string());
        }

        if let Some(v) = envs.get(STORAGE_ACCOUNT_KEY) {
            self.account_key = Some(v.to_string());
        }

        if let Some(v) = envs.get(APPLICATION) {
            self.application = Some(v.to_string());
        }

        self
    }

    /// Build the credential, failing when account name or key is missing.
    pub fn credential(&self) -> Result<Credential> {
        let account_name = self
            .account_name
            .as_deref()
            .ok_or_else(|| Error::credential_invalid("account name is not configured"))?;
        let account_key = self
            .account_key
            .as_deref()
            .ok_or_else(|| Error::credential_invalid("account key is not configured"))?;

        Ok(Credential::new(account_name, account_key))
    }

    /// The destination filesystem, defaulting to `raw`.
    pub fn filesystem(&self) -> &str {
        self.filesystem.as_deref().unwrap_or(DEFAULT_FILESYSTEM)
    }
}

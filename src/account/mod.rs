//! Account records and their flat-file store
//!
//! Accounts live in a plain JSON array (`accounts.json` by default), one
//! record per account with an email and an opaque bearer token. The store
//! is deliberately trivial: load the whole list, save the whole list.
//!
//! Each run also generates one ephemeral client identifier per account
//! (the `appid` query parameter). It is never persisted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scheduler::error::SchedulerError;

/// Fixed leading byte pair of every generated app id
const APP_ID_PREFIX: &str = "67";

/// One stored account record
///
/// Field names are capitalized on disk to stay compatible with existing
/// store files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identity, expected to contain `@`
    #[serde(rename = "Email")]
    pub email: String,

    /// Opaque bearer credential
    #[serde(rename = "Token")]
    pub token: String,
}

impl Account {
    /// Create a record from raw parts
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Check the record is runnable: identity contains `@`, token non-empty
    pub fn is_valid(&self) -> bool {
        self.email.contains('@') && !self.token.is_empty()
    }

    /// Masked identity for status lines
    pub fn masked_email(&self) -> String {
        mask_identity(&self.email)
    }
}

/// A runnable account plus its per-run client identifier
///
/// Built once per account at fleet start. Construction validates the
/// record; malformed records are skipped by the fleet, never fatal.
#[derive(Debug, Clone)]
pub struct AccountSession {
    /// Account identity
    pub email: String,

    /// Bearer credential
    pub token: String,

    /// Generated client identifier, fresh each run
    pub app_id: String,
}

impl AccountSession {
    /// Validate a record and attach a fresh app id
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::MalformedAccount`] when the identity does
    /// not contain `@` or the token is empty.
    pub fn try_new(account: Account) -> Result<Self, SchedulerError> {
        if !account.email.contains('@') {
            return Err(SchedulerError::malformed_account(
                mask_identity(&account.email),
                "identity does not look like an email",
            ));
        }
        if account.token.is_empty() {
            return Err(SchedulerError::malformed_account(
                mask_identity(&account.email),
                "empty token",
            ));
        }

        let app_id = generate_app_id();
        if app_id.is_empty() {
            return Err(SchedulerError::malformed_account(
                mask_identity(&account.email),
                "empty app id",
            ));
        }

        Ok(Self {
            email: account.email,
            token: account.token,
            app_id,
        })
    }

    /// Masked identity for status lines
    pub fn masked_email(&self) -> String {
        mask_identity(&self.email)
    }
}

/// Generate a per-run client identifier
///
/// 32 lowercase hex characters; the first byte pair is fixed to `67`, the
/// rest comes from a fresh v4 UUID.
pub fn generate_app_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{APP_ID_PREFIX}{}", &hex[APP_ID_PREFIX.len()..])
}

/// Mask an account identity for display
///
/// Keeps the first and last three characters of the local part when it is
/// long enough, otherwise keeps only the outermost characters. The domain
/// part is left intact. Full identities and credentials are never printed.
pub fn mask_identity(identity: &str) -> String {
    let (local, domain) = match identity.split_once('@') {
        Some((local, domain)) => (local, Some(domain)),
        None => (identity, None),
    };

    let chars: Vec<char> = local.chars().collect();
    let masked = if chars.len() > 6 {
        format!(
            "{}***{}",
            chars[..3].iter().collect::<String>(),
            chars[chars.len() - 3..].iter().collect::<String>()
        )
    } else if chars.len() >= 2 {
        format!(
            "{}{}{}",
            chars[0],
            "*".repeat(chars.len().saturating_sub(2)),
            chars[chars.len() - 1]
        )
    } else {
        "*".to_string()
    };

    match domain {
        Some(domain) => format!("{masked}@{domain}"),
        None => masked,
    }
}

/// Flat JSON account store
///
/// Missing files are created empty on first load. A corrupt file is
/// reported and treated as empty instead of aborting the run.
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// Create a store over a JSON file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records
    pub async fn load(&self) -> Result<Vec<Account>> {
        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "account store missing, creating empty file");
            self.save(&[]).await?;
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read account store: {}", self.path.display()))?;

        match serde_json::from_str::<Vec<Account>>(&content) {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "account store is not valid JSON, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Save the full record list
    pub async fn save(&self, accounts: &[Account]) -> Result<()> {
        let content = serde_json::to_string_pretty(accounts)
            .context("failed to serialize account store")?;

        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("failed to write account store: {}", self.path.display()))
    }

    /// Append a record after validating it
    pub async fn add(&self, account: Account) -> Result<()> {
        if !account.is_valid() {
            anyhow::bail!("account record is invalid: identity must contain '@' and token must be non-empty");
        }

        let mut accounts = self.load().await?;
        accounts.push(account);
        self.save(&accounts).await
    }

    /// Remove the record at a 0-based index, returning it
    pub async fn remove(&self, index: usize) -> Result<Account> {
        let mut accounts = self.load().await?;
        if index >= accounts.len() {
            anyhow::bail!(
                "account index {index} out of range (store holds {})",
                accounts.len()
            );
        }

        let removed = accounts.remove(index);
        self.save(&accounts).await?;
        Ok(removed)
    }
}

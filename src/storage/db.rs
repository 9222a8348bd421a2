// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `profiles`: user_id → serialized UserProfile
//! - `auth_records`: user_id → serialized AuthRecord
//! - `email_index`: lowercase email → user_id
//!
//! Account creation writes all three tables in one write transaction, so a
//! profile never exists without its auth record (or its session token, for
//! self-registration).

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::models::{Account, AuthRecord, UserProfile};
use crate::auth::Role;

// =============================================================================
// Table Definitions
// =============================================================================

const PROFILES: TableDefinition<&str, &[u8]> = TableDefinition::new("profiles");

const AUTH_RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("auth_records");

const EMAIL_INDEX: TableDefinition<&str, &str> = TableDefinition::new("email_index");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key used in the email index.
fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// CredentialStore
// =============================================================================

/// Embedded store of user profiles and their auth records.
pub struct CredentialStore {
    db: Database,
}

impl CredentialStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PROFILES)?;
            let _ = write_txn.open_table(AUTH_RECORDS)?;
            let _ = write_txn.open_table(EMAIL_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Verify that a read transaction can be opened.
    pub fn health_check(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(PROFILES)?;
        Ok(())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create a profile and its auth record atomically.
    ///
    /// Fails with `AlreadyExists` if the email (case-insensitive) or the
    /// user id is already taken; nothing is written in that case.
    pub fn create_account(&self, account: &Account) -> StoreResult<()> {
        let Account { profile, auth } = account;
        if auth.user_id != profile.id {
            return Err(StoreError::NotFound(format!(
                "Profile {} for auth record",
                auth.user_id
            )));
        }

        let key = email_key(&profile.email);
        let profile_json = serde_json::to_vec(profile)?;
        let auth_json = serde_json::to_vec(auth)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut emails = write_txn.open_table(EMAIL_INDEX)?;
            if emails.get(key.as_str())?.is_some() {
                return Err(StoreError::AlreadyExists(format!("User {}", profile.email)));
            }

            let mut profiles = write_txn.open_table(PROFILES)?;
            if profiles.get(profile.id.as_str())?.is_some() {
                return Err(StoreError::AlreadyExists(format!("User {}", profile.id)));
            }

            profiles.insert(profile.id.as_str(), profile_json.as_slice())?;
            write_txn
                .open_table(AUTH_RECORDS)?
                .insert(auth.user_id.as_str(), auth_json.as_slice())?;
            emails.insert(key.as_str(), profile.id.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Overwrite the auth record of an existing user.
    pub fn update_auth(&self, auth: &AuthRecord) -> StoreResult<()> {
        let json = serde_json::to_vec(auth)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(AUTH_RECORDS)?;
            if table.get(auth.user_id.as_str())?.is_none() {
                return Err(StoreError::NotFound(format!("Auth record {}", auth.user_id)));
            }
            table.insert(auth.user_id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Look up a profile joined with its auth record by email.
    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let key = email_key(email);
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(EMAIL_INDEX)?;
        let user_id = match emails.get(key.as_str())? {
            Some(v) => v.value().to_string(),
            None => return Ok(None),
        };
        drop(emails);

        self.load_account(&read_txn, &user_id)
    }

    /// Look up a profile joined with its auth record by user id.
    pub fn find_by_id(&self, user_id: &str) -> StoreResult<Option<Account>> {
        let read_txn = self.db.begin_read()?;
        self.load_account(&read_txn, user_id)
    }

    /// Whether the account behind `email` currently holds the admin role.
    pub fn is_admin(&self, email: &str) -> StoreResult<bool> {
        Ok(self
            .find_by_email(email)?
            .is_some_and(|account| account.auth.role == Role::Admin))
    }

    /// All profiles whose auth record carries `role`, oldest first.
    pub fn list_by_role(&self, role: Role) -> StoreResult<Vec<UserProfile>> {
        let read_txn = self.db.begin_read()?;
        let auth_table = read_txn.open_table(AUTH_RECORDS)?;
        let profiles = read_txn.open_table(PROFILES)?;

        let mut result = Vec::new();
        for entry in auth_table.iter()? {
            let (_, value) = entry?;
            let auth: AuthRecord = serde_json::from_slice(value.value())?;
            if auth.role != role {
                continue;
            }
            match profiles.get(auth.user_id.as_str())? {
                Some(p) => result.push(serde_json::from_slice::<UserProfile>(p.value())?),
                None => {
                    tracing::warn!(user_id = %auth.user_id, "Auth record without profile");
                }
            }
        }

        result.sort_by(|a: &UserProfile, b: &UserProfile| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    fn load_account(
        &self,
        read_txn: &redb::ReadTransaction,
        user_id: &str,
    ) -> StoreResult<Option<Account>> {
        let profiles = read_txn.open_table(PROFILES)?;
        let profile: UserProfile = match profiles.get(user_id)? {
            Some(v) => serde_json::from_slice(v.value())?,
            None => return Ok(None),
        };

        let auth_table = read_txn.open_table(AUTH_RECORDS)?;
        let auth: AuthRecord = match auth_table.get(user_id)? {
            Some(v) => serde_json::from_slice(v.value())?,
            None => return Err(StoreError::NotFound(format!("Auth record {user_id}"))),
        };

        Ok(Some(Account { profile, auth }))
    }

    /// Replace a stored profile. Used to seed role-specific collections.
    pub fn put_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let json = serde_json::to_vec(profile)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PROFILES)?;
            let existing_email = {
                let existing = table
                    .get(profile.id.as_str())?
                    .ok_or_else(|| StoreError::NotFound(format!("User {}", profile.id)))?;
                serde_json::from_slice::<UserProfile>(existing.value())?.email
            };
            if email_key(&existing_email) != email_key(&profile.email) {
                return Err(StoreError::AlreadyExists(format!(
                    "Email change for user {} is not supported",
                    profile.id
                )));
            }
            table.insert(profile.id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

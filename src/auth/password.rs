// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! bcrypt password hashing.
//!
//! Hashing and verification are CPU-bound, so both run on tokio's blocking
//! pool instead of stalling the request executor.

use tokio::task;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] task::JoinError),
}

/// Adaptive one-way password hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash `password` with a fresh random salt.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check `candidate` against a stored hash.
    ///
    /// A malformed stored hash is reported as an error, not as a mismatch.
    pub async fn verify(&self, candidate: &str, hash: &str) -> Result<bool, PasswordError> {
        let candidate = candidate.to_owned();
        let hash = hash.to_owned();
        let matched = task::spawn_blocking(move || bcrypt::verify(candidate, &hash)).await??;
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("Pw1!").await.unwrap();
        assert_ne!(hash, "Pw1!");
        assert!(hasher.verify("Pw1!", &hash).await.unwrap());
        assert!(!hasher.verify("pw1!", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn salts_differ_per_call() {
        let hasher = PasswordHasher::new(4);
        let first = hasher.hash("same").await.unwrap();
        let second = hasher.hash("same").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new(4);
        assert!(hasher.verify("anything", "not-a-bcrypt-hash").await.is_err());
    }
}

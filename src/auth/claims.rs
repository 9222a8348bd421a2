// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// User id
    pub id: String,

    /// Email at issuance; used to find the auth record on verification
    pub email: String,

    /// Role at issuance
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Unique token id, so two tokens issued in the same second differ
    pub jti: String,
}

/// Authenticated identity attached to a request by the authorization guard.
///
/// This is the primary type used throughout the application to represent
/// the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id (`id` claim)
    pub user_id: String,

    pub email: String,

    /// Role from the token. Admin endpoints re-check the stored role.
    pub role: Role,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.id,
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

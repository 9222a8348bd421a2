// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential checks, session tokens and the authorization guard.
//!
//! ## Auth Flow
//!
//! 1. Client logs in or registers at `/auth/login` / `/auth/register`
//! 2. Server issues an HS256 token `{id, email, role}` valid for 30 days,
//!    stores it on the user's auth record and sets it as a cookie
//! 3. Later requests present the token as `Authorization: Bearer <token>`
//!    or through the cookie
//! 4. The guard verifies the token and checks it is the live one on record
//!
//! ## Security
//!
//! - All endpoints except login, registration, health and docs require a session
//! - One live token per user; a new login supersedes the previous token
//! - Sign-out revokes the token server-side before it expires
//! - Admin endpoints re-check the stored role, not the token claim
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod cookie;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod session;
pub mod tokens;

pub use claims::{AuthenticatedUser, SessionClaims};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use middleware::auth_guard;
pub use password::{PasswordError, PasswordHasher};
pub use roles::Role;
pub use session::{IssuedSession, SessionError, SessionManager, TokenStatus};
pub use tokens::TokenIssuer;

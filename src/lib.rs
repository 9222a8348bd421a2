// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storefront Server - account and session service
//!
//! Registration, login and sign-out with server-side revocable session
//! tokens, role-scoped profile retrieval, and admin vendor onboarding.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Sessions, tokens and the authorization guard
//! - `providers` - Image hosting for profile pictures
//! - `storage` - Credential store (redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Credential Storage
//!
//! Persistent storage of user profiles and their authentication records in
//! an embedded redb database under `DATA_DIR`.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   accounts.redb
//!     profiles       user_id → UserProfile (JSON)
//!     auth_records   user_id → AuthRecord (JSON)
//!     email_index    lowercase email → user_id
//! ```
//!
//! Role-scoped read models live in [`projections`].

pub mod db;
pub mod models;
pub mod projections;

pub use db::{CredentialStore, StoreError, StoreResult};
pub use models::{Account, Address, AuthRecord, CartItem, Order, Product, UserProfile};
pub use projections::{
    AdminProjection, DetailedProfile, ProfileSummary, Projection, UserProjection,
    VendorProjection,
};

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Records persisted in the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Role;

/// Shipping address attached to a shopper profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Line in a shopper's cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
}

/// Placed order. `total` is in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub product_ids: Vec<String>,
    pub total: u64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Product listed by a vendor. `price` is in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Identity record. Which optional collections are populated depends on the
/// role held by the matching [`AuthRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub number: String,
    /// Public URL of the profile picture; empty when none was uploaded.
    #[serde(default)]
    pub profile_pic: String,
    pub created_at: DateTime<Utc>,

    // Shopper collections
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub orders: Vec<Order>,

    // Vendor attributes
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl UserProfile {
    /// New profile with a fresh id and no role-specific data.
    pub fn new(email: impl Into<String>, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            name: name.into(),
            number: number.into(),
            profile_pic: String::new(),
            created_at: Utc::now(),
            addresses: Vec::new(),
            cart: Vec::new(),
            orders: Vec::new(),
            company: None,
            description: None,
            products: Vec::new(),
        }
    }
}

/// Authentication record, one per [`UserProfile`].
///
/// Invariant: `is_logged_in` is true exactly when `session_token` holds the
/// most recently issued token for the user. Only [`AuthRecord::start_session`]
/// and [`AuthRecord::end_session`] change either field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthRecord {
    pub user_id: String,
    pub password_hash: String,
    pub role: Role,
    is_logged_in: bool,
    session_token: Option<String>,
    /// Image provider id of the uploaded profile picture.
    #[serde(default)]
    pub image_provider_id: Option<String>,
}

impl AuthRecord {
    /// Record with no live session.
    pub fn new(user_id: impl Into<String>, password_hash: String, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            password_hash,
            role,
            is_logged_in: false,
            session_token: None,
            image_provider_id: None,
        }
    }

    pub fn with_image_provider_id(mut self, id: Option<String>) -> Self {
        self.image_provider_id = id;
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Replace any previous token with `token` and mark the session live.
    pub fn start_session(&mut self, token: String) {
        self.session_token = Some(token);
        self.is_logged_in = true;
    }

    pub fn end_session(&mut self) {
        self.session_token = None;
        self.is_logged_in = false;
    }
}

/// A profile joined with its auth record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub profile: UserProfile,
    pub auth: AuthRecord,
}

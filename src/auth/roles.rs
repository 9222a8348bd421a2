// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role tag stored on every auth record and carried in session tokens.
///
/// ## Role Capabilities
///
/// - `User` - Shopper; sees own addresses, cart and orders
/// - `Vendor` - Seller; sees own company profile and products. Onboarded by admins only
/// - `Admin` - Full listing access to users and vendors, can onboard vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Vendor,
    Admin,
}

impl Role {
    /// Map the `type` field of a self-registration request to a role.
    ///
    /// Only `"user"` and `"admin"` may self-register; vendors are created
    /// through the admin onboarding endpoint.
    pub fn from_registration_type(kind: &str) -> Option<Role> {
        match kind {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Vendor => "VENDOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Request types derive
//! `Deserialize` so they can be read from JSON or from the text fields of a
//! multipart form; all types derive `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Auth**: login and self-registration forms
//! - **Admin**: vendor onboarding form and listing envelopes
//! - **Envelopes**: `{success}` and `{user}` wrappers

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::{DetailedProfile, Projection, ProfileSummary};

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Self-registration form.
///
/// Sent as JSON, or as multipart text fields next to an optional
/// `profilePic` file.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub number: String,
    /// `"user"` or `"admin"`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// =============================================================================
// Admin
// =============================================================================

/// Vendor onboarding form, submitted by an admin.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorRequest {
    pub email: String,
    pub name: String,
    pub number: String,
    /// Accepted for compatibility; the stored role is always `VENDOR`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub company: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllUsersResponse {
    pub all_users: Vec<ProfileSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllVendorsResponse {
    pub all_vendors: Vec<ProfileSummary>,
}

/// Detailed lookup by id. Always a list; empty when the id is unknown.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminUserResponse {
    pub user: Vec<DetailedProfile>,
}

// =============================================================================
// Envelopes
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: message.into(),
        }
    }
}

/// Caller's own profile, shaped by role.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: Projection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_reads_wire_names() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@b.com",
            "name": "Ann",
            "number": "555",
            "type": "user",
            "password": "Pw1!",
            "confirmPassword": "Pw1!"
        }))
        .unwrap();
        assert_eq!(req.kind, "user");
        assert_eq!(req.confirm_password, "Pw1!");
    }

    #[test]
    fn missing_passwords_default_to_empty() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@b.com",
            "name": "Ann",
            "number": "555",
            "type": "user"
        }))
        .unwrap();
        assert!(req.password.is_empty());
        assert!(req.confirm_password.is_empty());
    }

    #[test]
    fn vendor_description_is_optional() {
        let req: VendorRequest = serde_json::from_value(serde_json::json!({
            "email": "v@shop.com",
            "name": "Vic",
            "number": "1",
            "type": "vendor",
            "company": "Shoes Ltd",
            "password": "pw",
            "confirmPassword": "pw"
        }))
        .unwrap();
        assert_eq!(req.company, "Shoes Ltd");
        assert!(req.description.is_none());
    }

    #[test]
    fn listing_envelopes_use_camel_case() {
        let body = serde_json::to_value(AllVendorsResponse { all_vendors: vec![] }).unwrap();
        assert!(body.get("allVendors").is_some());
        let body = serde_json::to_value(SuccessResponse::new("ok")).unwrap();
        assert_eq!(body["success"], "ok");
    }
}

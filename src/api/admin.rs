// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin-only API endpoints.
//!
//! Every handler takes [`AdminOnly`], which re-reads the caller's stored
//! role. A token whose role claim says admin is not enough.

use axum::{
    extract::{Path, State},
    Json,
};

use super::forms::WithPicture;
use crate::{
    auth::{AdminOnly, Role},
    error::ApiError,
    models::{
        AdminUserResponse, AllUsersResponse, AllVendorsResponse, SuccessResponse, VendorRequest,
    },
    state::AppState,
    storage::{DetailedProfile, ProfileSummary},
};

// ============================================================================
// Handlers
// ============================================================================

/// List all shopper accounts.
#[utoipa::path(
    get,
    path = "/admin/get/all/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users with role USER", body = AllUsersResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)")
    )
)]
pub async fn get_all_users(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Result<Json<AllUsersResponse>, ApiError> {
    let profiles = state.store.list_by_role(Role::User).map_err(ApiError::internal)?;

    Ok(Json(AllUsersResponse {
        all_users: profiles.iter().map(ProfileSummary::from).collect(),
    }))
}

/// Look up one account with every nested collection.
///
/// The result is always a list: one entry, or none when the id is unknown.
#[utoipa::path(
    get,
    path = "/admin/get/user/{userId}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("userId" = String, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Matching accounts", body = AdminUserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)")
    )
)]
pub async fn get_user(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AdminUserResponse>, ApiError> {
    let account = state.store.find_by_id(&user_id).map_err(ApiError::internal)?;

    Ok(Json(AdminUserResponse {
        user: account
            .map(|a| DetailedProfile::new(&a.profile, a.auth.role))
            .into_iter()
            .collect(),
    }))
}

/// List all vendor accounts.
#[utoipa::path(
    get,
    path = "/admin/get/all/vendors",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users with role VENDOR", body = AllVendorsResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)")
    )
)]
pub async fn get_all_vendors(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
) -> Result<Json<AllVendorsResponse>, ApiError> {
    let profiles = state.store.list_by_role(Role::Vendor).map_err(ApiError::internal)?;

    Ok(Json(AllVendorsResponse {
        all_vendors: profiles.iter().map(ProfileSummary::from).collect(),
    }))
}

/// Onboard a vendor account.
///
/// Accepts JSON, or multipart with an optional `profilePic` file. The vendor
/// starts signed out.
#[utoipa::path(
    post,
    path = "/admin/add/vendor",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = VendorRequest,
    responses(
        (status = 200, description = "Vendor created", body = SuccessResponse),
        (status = 400, description = "Invalid email or passwords"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not authorized (admin required)"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn add_vendor(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    WithPicture { form, picture }: WithPicture<VendorRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let vendor_id = state.sessions.onboard_vendor(form, picture).await?;
    tracing::info!(admin_id = %admin.user_id, vendor_id = %vendor_id, "Admin added vendor");

    Ok(Json(SuccessResponse::new("Vendor Registered Successfully")))
}

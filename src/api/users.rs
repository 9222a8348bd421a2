// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::UserResponse,
    state::AppState,
    storage::Projection,
};

/// Get the caller's own profile.
///
/// Shoppers see addresses, cart and orders; vendors see company details and
/// products; admins see the bare profile.
#[utoipa::path(
    get,
    path = "/user/get",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role-scoped profile", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid, revoked or missing token"),
        (status = 404, description = "Profile no longer exists")
    )
)]
pub async fn get_current_user(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let account = state
        .store
        .find_by_email(&user.email)
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("User doesn't exist"))?;

    Ok(Json(UserResponse {
        user: Projection::for_role(&account.profile, user.role),
    }))
}

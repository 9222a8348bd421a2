// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login, registration and sign-out.

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    Json,
};

use super::forms::WithPicture;
use crate::{
    auth::{
        cookie::{clear_session_cookie, session_cookie},
        Auth,
    },
    error::ApiError,
    models::{LoginRequest, RegisterRequest, SuccessResponse},
    state::AppState,
};

/// Log in with email and password.
///
/// Sets the session cookie. Any earlier token of this user stops working.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = SuccessResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No such user")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state.sessions.login(&request.email, &request.password).await?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state.config.cookie_name, &issued.token))]),
        Json(SuccessResponse::new("User Signed In Successfully")),
    ))
}

/// Register a user or admin account.
///
/// Accepts JSON, or multipart with an optional `profilePic` file. The new
/// account is logged in.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered; session cookie set", body = SuccessResponse),
        (status = 400, description = "Invalid email, passwords or account type"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithPicture { form, picture }: WithPicture<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state.sessions.register(form, picture).await?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&state.config.cookie_name, &issued.token))]),
        Json(SuccessResponse::new("User Registered Successfully")),
    ))
}

/// End the caller's session and clear the cookie.
#[utoipa::path(
    get,
    path = "/auth/signout",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed out; cookie cleared", body = SuccessResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn sign_out(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.sessions.sign_out(&user.email)?;

    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie(&state.config.cookie_name))]),
        Json(SuccessResponse::new("User Signed Out Successfully")),
    ))
}

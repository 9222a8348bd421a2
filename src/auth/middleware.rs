// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization guard applied to the whole router.
//!
//! For every request outside [`EXEMPT_PATHS`] the guard:
//!
//! 1. Takes the token from `Authorization: Bearer <token>`, or failing
//!    that from the session cookie
//! 2. Verifies signature and expiry
//! 3. Asks the session manager whether the token is the user's live one
//! 4. Attaches the [`AuthenticatedUser`] to the request extensions
//!
//! Any failure is answered with 401 before the handler runs.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{cookie::read_cookie, AuthError, AuthenticatedUser, TokenStatus};
use crate::state::AppState;

/// Path prefixes reachable without a session.
pub const EXEMPT_PATHS: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/health",
    "/docs",
    "/api-doc",
];

pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Authentication middleware function.
pub async fn auth_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    match authenticate(&state, request.headers()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            debug!(path = %request.uri().path(), error_code = e.error_code(), "Request rejected");
            e.into_response()
        }
    }
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
    let token = extract_token(headers, &state.config.cookie_name)?;
    let claims = state.sessions.tokens().verify(&token)?;

    let status = state
        .sessions
        .verify_token(&claims.email, &token)
        .map_err(|e| AuthError::InternalError(e.to_string()))?;

    match status {
        TokenStatus::Live => Ok(AuthenticatedUser::from_claims(claims)),
        TokenStatus::Stale => Err(AuthError::SessionRevoked),
        TokenStatus::UnknownUser => Err(AuthError::UnknownAccount),
    }
}

/// Bearer header first, then the session cookie.
fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AuthError> {
    if let Some(header) = headers.get(AUTHORIZATION) {
        let value = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidAuthHeader)?;
        return Ok(token.to_string());
    }

    read_cookie(headers, cookie_name).ok_or(AuthError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    #[test]
    fn exempt_paths_match_whole_segments() {
        assert!(is_exempt("/auth/login"));
        assert!(is_exempt("/auth/register"));
        assert!(is_exempt("/health"));
        assert!(is_exempt("/health/ready"));
        assert!(is_exempt("/docs/index.html"));
        assert!(is_exempt("/api-doc/openapi.json"));

        assert!(!is_exempt("/auth/signout"));
        assert!(!is_exempt("/auth/login-as-admin"));
        assert!(!is_exempt("/healthz"));
        assert!(!is_exempt("/user/get"));
        assert!(!is_exempt("/admin/get/all/users"));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        assert_eq!(extract_token(&headers, "access_token").unwrap(), "from-header");
    }

    #[test]
    fn cookie_used_without_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; access_token=abc"));
        assert_eq!(extract_token(&headers, "access_token").unwrap(), "abc");
    }

    #[test]
    fn malformed_or_missing_token() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            extract_token(&headers, "access_token"),
            Err(AuthError::MissingToken)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert!(matches!(
            extract_token(&headers, "access_token"),
            Err(AuthError::InvalidAuthHeader)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            extract_token(&headers, "access_token"),
            Err(AuthError::InvalidAuthHeader)
        ));
    }
}

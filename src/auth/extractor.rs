// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the caller identity attached by the guard.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Reads the identity the authorization guard placed in the request
/// extensions. On a route the guard does not cover it rejects with
/// `MissingToken`.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingToken)
    }
}

/// Extractor that requires admin role.
///
/// The role claim in the token is not trusted: the stored auth record of
/// the caller's email must say `ADMIN`.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        let is_admin = state
            .store
            .is_admin(&user.email)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;
        if !is_admin {
            tracing::warn!(user_id = %user.user_id, "Admin endpoint refused");
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::config::AppConfig;
    use crate::models::RegisterRequest;
    use crate::providers::DisabledUploader;
    use crate::storage::CredentialStore;
    use axum::http::Request;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = AppConfig::for_tests(temp_dir.path());
        let store = CredentialStore::open(&config.database_path()).expect("Failed to open store");
        (AppState::new(config, store, Arc::new(DisabledUploader)), temp_dir)
    }

    fn parts_with(user: Option<AuthenticatedUser>) -> Parts {
        let mut parts = Request::builder().uri("/test").body(()).unwrap().into_parts().0;
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        parts
    }

    fn identity(email: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "user_123".to_string(),
            email: email.to_string(),
            role,
            expires_at: 0,
        }
    }

    async fn register(state: &AppState, email: &str, kind: &str) {
        state
            .sessions
            .register(
                RegisterRequest {
                    email: email.to_string(),
                    name: "Ann".to_string(),
                    number: "555".to_string(),
                    kind: kind.to_string(),
                    password: "pw".to_string(),
                    confirm_password: "pw".to_string(),
                },
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn auth_requires_guard_identity() {
        let (state, _temp_dir) = create_test_state();
        let result = Auth::from_request_parts(&mut parts_with(None), &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn auth_reads_extensions() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with(Some(identity("a@b.com", Role::User)));
        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn admin_only_accepts_stored_admin() {
        let (state, _temp_dir) = create_test_state();
        register(&state, "root@b.com", "admin").await;

        let mut parts = parts_with(Some(identity("root@b.com", Role::Admin)));
        assert!(AdminOnly::from_request_parts(&mut parts, &state).await.is_ok());
    }

    #[tokio::test]
    async fn admin_only_ignores_role_claim() {
        let (state, _temp_dir) = create_test_state();
        register(&state, "a@b.com", "user").await;

        // Token claims admin, record says user.
        let mut parts = parts_with(Some(identity("a@b.com", Role::Admin)));
        let result = AdminOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }
}

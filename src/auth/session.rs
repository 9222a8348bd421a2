// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session lifecycle: login, registration, sign-out and live-token checks.
//!
//! At most one token per user is live: the one stored on the auth record.
//! Logging in again replaces it; signing out clears it. A token that still
//! verifies cryptographically but is not the stored one is stale.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{
    credentials::{is_valid_email, passwords_match},
    password::{PasswordError, PasswordHasher},
    AuthError, Role, TokenIssuer,
};
use crate::{
    models::{RegisterRequest, VendorRequest},
    providers::{upload_optional, ImageUploader, UploadError, UploadedImage},
    storage::{Account, AuthRecord, CredentialStore, StoreError, UserProfile},
};

/// Outcome of checking a presented token against the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// The token is the user's current session token.
    Live,
    /// The user exists but the token is not (or no longer) the live one.
    Stale,
    /// No account matches the token's email.
    UnknownUser,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("User doesn't exist")]
    NotFound,

    #[error("Invalid Password")]
    InvalidCredential,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Validation(&'static str),

    #[error("No such endpoint")]
    UnsupportedRole(String),

    #[error("image upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("password hashing failed: {0}")]
    Password(#[from] PasswordError),

    #[error("token issuance failed: {0}")]
    Token(#[from] AuthError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

pub const USER_EXISTS: &str = "User with provided email already exists";
pub const VENDOR_EXISTS: &str = "Vendor with provided email already exists";
pub const INVALID_EMAIL: &str = "Please Provide a Valid Email";
pub const MISSING_PASSWORDS: &str = "Please provide your passwords";
pub const MISSING_CREDENTIALS: &str = "Please provide your email and password";

/// A freshly issued live session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user_id: String,
    pub token: String,
}

/// Orchestrates credential checks, token issuance and session storage.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<CredentialStore>,
    tokens: TokenIssuer,
    hasher: PasswordHasher,
    images: Arc<dyn ImageUploader>,
}

impl SessionManager {
    pub fn new(
        store: Arc<CredentialStore>,
        tokens: TokenIssuer,
        hasher: PasswordHasher,
        images: Arc<dyn ImageUploader>,
    ) -> Self {
        Self {
            store,
            tokens,
            hasher,
            images,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn hasher(&self) -> PasswordHasher {
        self.hasher
    }

    pub fn images(&self) -> &dyn ImageUploader {
        self.images.as_ref()
    }

    /// Verify credentials and start a new session, superseding any previous one.
    ///
    /// A failed attempt leaves the auth record untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, SessionError> {
        if email.is_empty() || password.is_empty() {
            return Err(SessionError::Validation(MISSING_CREDENTIALS));
        }

        let Account { profile, mut auth } =
            self.store.find_by_email(email)?.ok_or(SessionError::NotFound)?;

        if !self.hasher.verify(password, &auth.password_hash).await? {
            warn!(user_id = %profile.id, "Login rejected: wrong password");
            return Err(SessionError::InvalidCredential);
        }

        let token = self.tokens.issue(&profile.id, &profile.email, auth.role)?;
        if auth.is_logged_in() {
            debug!(user_id = %profile.id, "Replacing previous session");
        }
        auth.start_session(token.clone());
        self.store.update_auth(&auth)?;

        info!(user_id = %profile.id, role = %auth.role, "User signed in");
        Ok(IssuedSession {
            user_id: profile.id,
            token,
        })
    }

    /// Create a user or admin account and log it in.
    ///
    /// All checks run before the picture is uploaded or anything is written.
    /// Profile, auth record and session token are stored in one write.
    pub async fn register(
        &self,
        request: RegisterRequest,
        picture: Option<UploadedImage>,
    ) -> Result<IssuedSession, SessionError> {
        let role = Role::from_registration_type(&request.kind)
            .ok_or_else(|| SessionError::UnsupportedRole(request.kind.clone()))?;

        if self.store.find_by_email(&request.email)?.is_some() {
            return Err(SessionError::Conflict(USER_EXISTS));
        }
        check_new_credentials(&request.email, &request.password, &request.confirm_password)?;

        let (profile_pic, image_provider_id) =
            upload_optional(self.images.as_ref(), picture).await?;
        let password_hash = self.hasher.hash(&request.password).await?;

        let mut profile = UserProfile::new(request.email, request.name, request.number);
        profile.profile_pic = profile_pic;

        let token = self.tokens.issue(&profile.id, &profile.email, role)?;
        let mut auth = AuthRecord::new(profile.id.clone(), password_hash, role)
            .with_image_provider_id(image_provider_id);
        auth.start_session(token.clone());

        let account = Account { profile, auth };
        self.store.create_account(&account).map_err(|e| match e {
            // Lost a race with a concurrent registration for the same email
            StoreError::AlreadyExists(_) => SessionError::Conflict(USER_EXISTS),
            other => SessionError::Store(other),
        })?;

        info!(user_id = %account.profile.id, role = %role, "User registered");
        Ok(IssuedSession {
            user_id: account.profile.id,
            token,
        })
    }

    /// Create a vendor account on an admin's behalf.
    ///
    /// The vendor is not logged in: no token is issued until their first login.
    /// The caller must already be verified as an admin.
    pub async fn onboard_vendor(
        &self,
        request: VendorRequest,
        picture: Option<UploadedImage>,
    ) -> Result<String, SessionError> {
        if self.store.find_by_email(&request.email)?.is_some() {
            return Err(SessionError::Conflict(VENDOR_EXISTS));
        }
        check_new_credentials(&request.email, &request.password, &request.confirm_password)?;

        let (profile_pic, image_provider_id) =
            upload_optional(self.images.as_ref(), picture).await?;
        let password_hash = self.hasher.hash(&request.password).await?;

        let mut profile = UserProfile::new(request.email, request.name, request.number);
        profile.profile_pic = profile_pic;
        profile.company = Some(request.company);
        profile.description = request.description;

        let auth = AuthRecord::new(profile.id.clone(), password_hash, Role::Vendor)
            .with_image_provider_id(image_provider_id);

        let account = Account { profile, auth };
        self.store.create_account(&account).map_err(|e| match e {
            StoreError::AlreadyExists(_) => SessionError::Conflict(VENDOR_EXISTS),
            other => SessionError::Store(other),
        })?;

        info!(user_id = %account.profile.id, "Vendor onboarded");
        Ok(account.profile.id)
    }

    /// End the user's session. Succeeds for an already signed-out user.
    pub fn sign_out(&self, email: &str) -> Result<(), SessionError> {
        let Account { profile, mut auth } =
            self.store.find_by_email(email)?.ok_or(SessionError::NotFound)?;

        auth.end_session();
        self.store.update_auth(&auth)?;

        info!(user_id = %profile.id, "User signed out");
        Ok(())
    }

    /// Check whether `token` is the live session token of the user behind `email`.
    pub fn verify_token(&self, email: &str, token: &str) -> Result<TokenStatus, SessionError> {
        let Some(Account { auth, .. }) = self.store.find_by_email(email)? else {
            return Ok(TokenStatus::UnknownUser);
        };

        let live = auth.is_logged_in() && auth.session_token() == Some(token);
        Ok(if live {
            TokenStatus::Live
        } else {
            TokenStatus::Stale
        })
    }
}

fn check_new_credentials(email: &str, password: &str, confirmation: &str) -> Result<(), SessionError> {
    if !is_valid_email(email) {
        return Err(SessionError::Validation(INVALID_EMAIL));
    }
    if !passwords_match(password, confirmation) {
        return Err(SessionError::Validation(MISSING_PASSWORDS));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{DisabledUploader, StoredImage};
    use async_trait::async_trait;

    struct FakeUploader;

    #[async_trait]
    impl ImageUploader for FakeUploader {
        async fn upload(&self, image: UploadedImage) -> Result<StoredImage, UploadError> {
            Ok(StoredImage {
                url: format!("https://img.example/{}", image.file_name),
                provider_id: "img-1".to_string(),
            })
        }
    }

    fn manager_with(images: Arc<dyn ImageUploader>) -> (SessionManager, Arc<CredentialStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(CredentialStore::open(&dir.path().join("test.redb")).unwrap());
        let manager = SessionManager::new(
            store.clone(),
            TokenIssuer::new("secret"),
            PasswordHasher::new(4),
            images,
        );
        (manager, store, dir)
    }

    fn manager() -> (SessionManager, Arc<CredentialStore>, tempfile::TempDir) {
        manager_with(Arc::new(DisabledUploader))
    }

    fn request(email: &str, kind: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            name: "Ann".to_string(),
            number: "555".to_string(),
            kind: kind.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn picture() -> UploadedImage {
        UploadedImage {
            file_name: "me.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn register_logs_the_user_in() {
        let (sessions, store, _dir) = manager();
        let issued = sessions
            .register(request("a@b.com", "user", "Pw1!", "Pw1!"), None)
            .await
            .unwrap();

        let account = store.find_by_email("a@b.com").unwrap().unwrap();
        assert_eq!(account.profile.id, issued.user_id);
        assert_eq!(account.auth.role, Role::User);
        assert!(account.auth.is_logged_in());
        assert_eq!(account.auth.session_token(), Some(issued.token.as_str()));
        assert_ne!(account.auth.password_hash, "Pw1!");
        assert_eq!(
            sessions.verify_token("a@b.com", &issued.token).unwrap(),
            TokenStatus::Live
        );
    }

    #[tokio::test]
    async fn register_maps_admin_type() {
        let (sessions, store, _dir) = manager();
        sessions
            .register(request("root@b.com", "admin", "pw", "pw"), None)
            .await
            .unwrap();
        assert!(store.is_admin("root@b.com").unwrap());
    }

    #[tokio::test]
    async fn register_rejects_vendor_and_unknown_types() {
        let (sessions, store, _dir) = manager();
        for kind in ["vendor", "superuser", ""] {
            let err = sessions
                .register(request("a@b.com", kind, "pw", "pw"), None)
                .await
                .unwrap_err();
            assert!(matches!(err, SessionError::UnsupportedRole(_)));
        }
        assert!(store.find_by_email("a@b.com").unwrap().is_none());
    }

    #[tokio::test]
    async fn register_rejects_mismatched_or_empty_passwords() {
        let (sessions, store, _dir) = manager();
        for (password, confirm) in [("Pw1!", "Pw2!"), ("", "")] {
            let err = sessions
                .register(request("a@b.com", "user", password, confirm), None)
                .await
                .unwrap_err();
            assert!(matches!(err, SessionError::Validation(MISSING_PASSWORDS)));
        }
        assert!(store.find_by_email("a@b.com").unwrap().is_none());
    }

    #[tokio::test]
    async fn register_rejects_malformed_email_before_upload() {
        // The disabled uploader would fail the request if it were reached.
        let (sessions, store, _dir) = manager();
        for email in ["ab.com", "a@b", "a@"] {
            let err = sessions
                .register(request(email, "user", "pw", "pw"), Some(picture()))
                .await
                .unwrap_err();
            assert!(matches!(err, SessionError::Validation(INVALID_EMAIL)));
            assert!(store.find_by_email(email).unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (sessions, store, _dir) = manager();
        sessions
            .register(request("a@b.com", "user", "pw", "pw"), None)
            .await
            .unwrap();
        let err = sessions
            .register(request("a@b.com", "admin", "pw", "pw"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Conflict(USER_EXISTS)));
        assert_eq!(store.list_by_role(Role::User).unwrap().len(), 1);
        assert!(store.list_by_role(Role::Admin).unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_stores_uploaded_picture() {
        let (sessions, store, _dir) = manager_with(Arc::new(FakeUploader));
        sessions
            .register(request("a@b.com", "user", "pw", "pw"), Some(picture()))
            .await
            .unwrap();
        let account = store.find_by_email("a@b.com").unwrap().unwrap();
        assert_eq!(account.profile.profile_pic, "https://img.example/me.png");
        assert_eq!(account.auth.image_provider_id.as_deref(), Some("img-1"));
    }

    #[tokio::test]
    async fn failed_upload_creates_nothing() {
        let (sessions, store, _dir) = manager();
        let err = sessions
            .register(request("a@b.com", "user", "pw", "pw"), Some(picture()))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Upload(UploadError::NotConfigured)));
        assert!(store.find_by_email("a@b.com").unwrap().is_none());
    }

    #[tokio::test]
    async fn login_replaces_previous_token() {
        let (sessions, _store, _dir) = manager();
        let registered = sessions
            .register(request("a@b.com", "user", "pw", "pw"), None)
            .await
            .unwrap();
        let logged_in = sessions.login("a@b.com", "pw").await.unwrap();

        assert_ne!(registered.token, logged_in.token);
        assert_eq!(
            sessions.verify_token("a@b.com", &registered.token).unwrap(),
            TokenStatus::Stale
        );
        assert_eq!(
            sessions.verify_token("a@b.com", &logged_in.token).unwrap(),
            TokenStatus::Live
        );
    }

    #[tokio::test]
    async fn wrong_password_leaves_record_untouched() {
        let (sessions, store, _dir) = manager();
        sessions
            .register(request("a@b.com", "user", "pw", "pw"), None)
            .await
            .unwrap();
        let before = store.find_by_email("a@b.com").unwrap().unwrap().auth;

        for _ in 0..3 {
            let err = sessions.login("a@b.com", "wrong").await.unwrap_err();
            assert!(matches!(err, SessionError::InvalidCredential));
        }

        let after = store.find_by_email("a@b.com").unwrap().unwrap().auth;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn login_unknown_or_empty() {
        let (sessions, _store, _dir) = manager();
        assert!(matches!(
            sessions.login("ghost@b.com", "pw").await,
            Err(SessionError::NotFound)
        ));
        assert!(matches!(
            sessions.login("", "pw").await,
            Err(SessionError::Validation(MISSING_CREDENTIALS))
        ));
        assert!(matches!(
            sessions.login("a@b.com", "").await,
            Err(SessionError::Validation(MISSING_CREDENTIALS))
        ));
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let (sessions, store, _dir) = manager();
        let issued = sessions
            .register(request("a@b.com", "user", "pw", "pw"), None)
            .await
            .unwrap();

        sessions.sign_out("a@b.com").unwrap();
        sessions.sign_out("a@b.com").unwrap();

        let auth = store.find_by_email("a@b.com").unwrap().unwrap().auth;
        assert!(!auth.is_logged_in());
        assert_eq!(auth.session_token(), None);
        assert_eq!(
            sessions.verify_token("a@b.com", &issued.token).unwrap(),
            TokenStatus::Stale
        );
    }

    #[tokio::test]
    async fn sign_out_and_verify_for_unknown_user() {
        let (sessions, _store, _dir) = manager();
        assert!(matches!(sessions.sign_out("ghost@b.com"), Err(SessionError::NotFound)));
        assert_eq!(
            sessions.verify_token("ghost@b.com", "whatever").unwrap(),
            TokenStatus::UnknownUser
        );
    }

    fn vendor(email: &str) -> VendorRequest {
        VendorRequest {
            email: email.to_string(),
            name: "Vic".to_string(),
            number: "1".to_string(),
            kind: Some("vendor".to_string()),
            company: "Shoes Ltd".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
            description: Some("Running shoes".to_string()),
        }
    }

    #[tokio::test]
    async fn onboarded_vendor_has_no_session() {
        let (sessions, store, _dir) = manager();
        let id = sessions.onboard_vendor(vendor("v@shop.com"), None).await.unwrap();

        let account = store.find_by_id(&id).unwrap().unwrap();
        assert_eq!(account.auth.role, Role::Vendor);
        assert!(!account.auth.is_logged_in());
        assert_eq!(account.auth.session_token(), None);
        assert_eq!(account.profile.company.as_deref(), Some("Shoes Ltd"));
        assert_eq!(account.profile.description.as_deref(), Some("Running shoes"));

        // The vendor can log in with the password the admin set.
        let issued = sessions.login("v@shop.com", "pw").await.unwrap();
        assert_eq!(issued.user_id, id);
    }

    #[tokio::test]
    async fn onboarding_existing_email_conflicts() {
        let (sessions, _store, _dir) = manager();
        sessions
            .register(request("v@shop.com", "user", "pw", "pw"), None)
            .await
            .unwrap();
        let err = sessions
            .onboard_vendor(vendor("v@shop.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Conflict(VENDOR_EXISTS)));
    }

    #[tokio::test]
    async fn onboarding_validates_like_registration() {
        let (sessions, store, _dir) = manager();
        let mut bad_email = vendor("not-an-email");
        bad_email.email = "not-an-email".to_string();
        assert!(matches!(
            sessions.onboard_vendor(bad_email, None).await,
            Err(SessionError::Validation(INVALID_EMAIL))
        ));

        let mut mismatch = vendor("v@shop.com");
        mismatch.confirm_password = "other".to_string();
        assert!(matches!(
            sessions.onboard_vendor(mismatch, None).await,
            Err(SessionError::Validation(MISSING_PASSWORDS))
        ));
        assert!(store.list_by_role(Role::Vendor).unwrap().is_empty());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::{PasswordHasher, SessionManager, TokenIssuer},
    config::AppConfig,
    providers::ImageUploader,
    storage::CredentialStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<CredentialStore>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: AppConfig, store: CredentialStore, images: Arc<dyn ImageUploader>) -> Self {
        let store = Arc::new(store);
        let sessions = SessionManager::new(
            store.clone(),
            TokenIssuer::new(&config.jwt_secret),
            PasswordHasher::new(config.bcrypt_cost),
            images,
        );
        Self {
            config: Arc::new(config),
            store,
            sessions,
        }
    }
}

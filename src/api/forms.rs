// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Form bodies that may carry a profile picture.
//!
//! Registration and vendor onboarding accept either a JSON body or a
//! `multipart/form-data` body whose text fields hold the same keys and whose
//! optional `profilePic` part holds the image.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{error::ApiError, providers::UploadedImage, state::AppState};

/// Multipart part name of the uploaded picture.
pub const PICTURE_FIELD: &str = "profilePic";

/// A deserialized form plus the optional uploaded picture.
pub struct WithPicture<T> {
    pub form: T,
    pub picture: Option<UploadedImage>,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

impl<T> FromRequest<AppState> for WithPicture<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Json(form) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            return Ok(Self { form, picture: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        let mut fields = Map::new();
        let mut picture = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == PICTURE_FIELD {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    picture = Some(UploadedImage {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                fields.insert(name, Value::String(text));
            }
        }

        let form = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ApiError::bad_request(format!("Invalid form: {e}")))?;

        Ok(Self { form, picture })
    }
}

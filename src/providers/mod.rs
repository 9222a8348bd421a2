// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Third-party service integrations.

pub mod images;

pub use images::{
    upload_optional, CloudinaryClient, DisabledUploader, ImageUploader, StoredImage,
    UploadError, UploadedImage,
};

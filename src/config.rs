// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup into
//! an [`AppConfig`], which is then handed to the token issuer, the session
//! manager and the router through `AppState`. Business logic never reads
//! the environment directly.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Shared secret for signing session tokens | Required |
//! | `COOKIE_ACCESS_TOKEN` | Name of the session cookie | `access_token` |
//! | `DATA_DIR` | Directory holding the credential database | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `BCRYPT_COST` | bcrypt work factor | `10` |
//! | `CLOUDINARY_CLOUD_NAME` | Image provider cloud name | Optional |
//! | `CLOUDINARY_API_KEY` | Image provider API key | Optional |
//! | `CLOUDINARY_API_SECRET` | Image provider API secret | Optional |
//! | `CLOUDINARY_BASE_URL` | Image provider API base URL | `https://api.cloudinary.com` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{env, net::SocketAddr, path::PathBuf};

pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const COOKIE_NAME_ENV: &str = "COOKIE_ACCESS_TOKEN";
/// Directory for the embedded credential database (`accounts.redb`).
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
pub const CLOUDINARY_CLOUD_NAME_ENV: &str = "CLOUDINARY_CLOUD_NAME";
pub const CLOUDINARY_API_KEY_ENV: &str = "CLOUDINARY_API_KEY";
pub const CLOUDINARY_API_SECRET_ENV: &str = "CLOUDINARY_API_SECRET";
pub const CLOUDINARY_BASE_URL_ENV: &str = "CLOUDINARY_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_COOKIE_NAME: &str = "access_token";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com";

/// File name of the credential database inside `DATA_DIR`.
pub const DATABASE_FILE: &str = "accounts.redb";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Credentials for the signed image-upload API.
#[derive(Debug, Clone)]
pub struct ImageProviderConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Process-wide configuration, built once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub cookie_name: String,
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    /// `None` disables profile-picture uploads.
    pub image_provider: Option<ImageProviderConfig>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup(JWT_SECRET_ENV)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let cookie_name = lookup(COOKIE_NAME_ENV)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        if cookie_name.contains([';', '=', ' ', ',']) {
            return Err(ConfigError::Invalid {
                name: COOKIE_NAME_ENV,
                reason: "cookie names cannot contain ';', '=', ',' or spaces".to_string(),
            });
        }

        let data_dir = PathBuf::from(
            lookup(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let bcrypt_cost = match lookup(BCRYPT_COST_ENV) {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
                    name: BCRYPT_COST_ENV,
                    reason: format!("'{raw}' is not a number"),
                })?;
                if !(4..=31).contains(&cost) {
                    return Err(ConfigError::Invalid {
                        name: BCRYPT_COST_ENV,
                        reason: format!("{cost} is outside 4..=31"),
                    });
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        let image_provider = match (
            lookup(CLOUDINARY_CLOUD_NAME_ENV),
            lookup(CLOUDINARY_API_KEY_ENV),
            lookup(CLOUDINARY_API_SECRET_ENV),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(ImageProviderConfig {
                base_url: lookup(CLOUDINARY_BASE_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_CLOUDINARY_BASE_URL.to_string()),
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Ok(Self {
            jwt_secret,
            cookie_name,
            data_dir,
            host,
            port,
            bcrypt_cost,
            image_provider,
        })
    }

    /// Path of the credential database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: HOST_ENV,
                reason: format!("{e}"),
            })
    }

    /// Minimal configuration for tests.
    #[cfg(test)]
    pub fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            data_dir: data_dir.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            bcrypt_cost: 4,
            image_provider: None,
        }
    }
}

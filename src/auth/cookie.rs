// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session cookie helpers.
//!
//! The cookie outlives the token it carries (90 days vs 30); an expired
//! token in a live cookie is rejected by the guard like any other.

use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Duration, Utc};

/// Client-side cookie lifetime.
pub const COOKIE_TTL_DAYS: i64 = 90;

const ATTRIBUTES: &str = "Path=/; HttpOnly; Secure; SameSite=None";

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Set-Cookie` value carrying `token`.
pub fn session_cookie(name: &str, token: &str) -> String {
    session_cookie_at(name, token, Utc::now())
}

fn session_cookie_at(name: &str, token: &str, now: DateTime<Utc>) -> String {
    let expires = http_date(now + Duration::days(COOKIE_TTL_DAYS));
    format!("{name}={token}; Expires={expires}; {ATTRIBUTES}")
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{name}=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; {ATTRIBUTES}")
}

/// Find the value of cookie `name` in the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

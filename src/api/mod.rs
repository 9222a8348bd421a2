// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{auth_guard, Role},
    models::{
        AdminUserResponse, AllUsersResponse, AllVendorsResponse, LoginRequest, RegisterRequest,
        SuccessResponse, UserResponse, VendorRequest,
    },
    state::AppState,
    storage::{
        Address, AdminProjection, CartItem, DetailedProfile, Order, Product, ProfileSummary,
        Projection, UserProjection, VendorProjection,
    },
};

pub mod admin;
pub mod auth;
pub mod forms;
pub mod health;
pub mod users;

/// Largest accepted request body (profile pictures included).
pub const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/signout", get(auth::sign_out))
        .route("/user/get", get(users::get_current_user))
        .route("/admin/get/all/users", get(admin::get_all_users))
        .route("/admin/get/user/{userId}", get(admin::get_user))
        .route("/admin/get/all/vendors", get(admin::get_all_vendors))
        .route("/admin/add/vendor", post(admin::add_vendor))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(state.clone(), auth_guard))
        .with_state(state);

    routes.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
    )
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::register,
        auth::sign_out,
        users::get_current_user,
        admin::get_all_users,
        admin::get_user,
        admin::get_all_vendors,
        admin::add_vendor,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            LoginRequest,
            RegisterRequest,
            VendorRequest,
            SuccessResponse,
            UserResponse,
            AllUsersResponse,
            AllVendorsResponse,
            AdminUserResponse,
            Projection,
            UserProjection,
            VendorProjection,
            AdminProjection,
            DetailedProfile,
            ProfileSummary,
            Address,
            CartItem,
            Order,
            Product,
            Role,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, registration and sign-out"),
        (name = "Users", description = "Caller profile"),
        (name = "Admin", description = "Account listings and vendor onboarding"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role-scoped views of a [`UserProfile`].
//!
//! Each role sees a closed, named subset of its profile. The projection is
//! chosen by matching on [`Role`]; there is no "empty include" case.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::models::{Address, CartItem, Order, Product, UserProfile};
use crate::auth::Role;

/// Fields every projection carries.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub number: String,
    pub profile_pic: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserProfile> for ProfileSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            number: profile.number.clone(),
            profile_pic: profile.profile_pic.clone(),
            created_at: profile.created_at,
        }
    }
}

/// Shopper view: profile plus addresses, cart and orders.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct UserProjection {
    #[serde(flatten)]
    pub profile: ProfileSummary,
    pub addresses: Vec<Address>,
    pub cart: Vec<CartItem>,
    pub orders: Vec<Order>,
}

/// Vendor view: profile plus company details and products.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct VendorProjection {
    #[serde(flatten)]
    pub profile: ProfileSummary,
    pub company: Option<String>,
    pub description: Option<String>,
    pub products: Vec<Product>,
}

/// Admin view of their own profile: no nested collections.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct AdminProjection {
    #[serde(flatten)]
    pub profile: ProfileSummary,
}

/// Projection returned by `GET /user/get`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Projection {
    User(UserProjection),
    Vendor(VendorProjection),
    Admin(AdminProjection),
}

impl Projection {
    pub fn for_role(profile: &UserProfile, role: Role) -> Self {
        let summary = ProfileSummary::from(profile);
        match role {
            Role::User => Projection::User(UserProjection {
                profile: summary,
                addresses: profile.addresses.clone(),
                cart: profile.cart.clone(),
                orders: profile.orders.clone(),
            }),
            Role::Vendor => Projection::Vendor(VendorProjection {
                profile: summary,
                company: profile.company.clone(),
                description: profile.description.clone(),
                products: profile.products.clone(),
            }),
            Role::Admin => Projection::Admin(AdminProjection { profile: summary }),
        }
    }
}

/// Everything an admin sees when inspecting a single account.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct DetailedProfile {
    #[serde(flatten)]
    pub profile: ProfileSummary,
    pub role: Role,
    pub addresses: Vec<Address>,
    pub cart: Vec<CartItem>,
    pub orders: Vec<Order>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub products: Vec<Product>,
}

impl DetailedProfile {
    pub fn new(profile: &UserProfile, role: Role) -> Self {
        Self {
            profile: ProfileSummary::from(profile),
            role,
            addresses: profile.addresses.clone(),
            cart: profile.cart.clone(),
            orders: profile.orders.clone(),
            company: profile.company.clone(),
            description: profile.description.clone(),
            products: profile.products.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        let mut profile = UserProfile::new("a@b.com", "Ann", "555");
        profile.addresses.push(Address {
            id: "addr-1".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            postal_code: "62701".to_string(),
            country: "US".to_string(),
        });
        profile.company = Some("Acme".to_string());
        profile
    }

    #[test]
    fn user_projection_hides_vendor_fields() {
        let json = serde_json::to_value(Projection::for_role(&sample_profile(), Role::User)).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["addresses"][0]["postalCode"], "62701");
        assert!(json.get("cart").is_some());
        assert!(json.get("orders").is_some());
        assert!(json.get("company").is_none());
        assert!(json.get("products").is_none());
    }

    #[test]
    fn vendor_projection_hides_shopper_fields() {
        let json =
            serde_json::to_value(Projection::for_role(&sample_profile(), Role::Vendor)).unwrap();
        assert_eq!(json["company"], "Acme");
        assert!(json.get("products").is_some());
        assert!(json.get("addresses").is_none());
    }

    #[test]
    fn admin_projection_is_plain_profile() {
        let json = serde_json::to_value(Projection::for_role(&sample_profile(), Role::Admin)).unwrap();
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["profilePic"], "");
        assert!(json.get("addresses").is_none());
        assert!(json.get("company").is_none());
    }

    #[test]
    fn detailed_profile_carries_everything() {
        let json = serde_json::to_value(DetailedProfile::new(&sample_profile(), Role::User)).unwrap();
        assert_eq!(json["role"], "USER");
        assert_eq!(json["company"], "Acme");
        assert_eq!(json["addresses"].as_array().unwrap().len(), 1);
    }
}

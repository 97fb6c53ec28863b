//
//  bitly-cli
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The authenticated user.
//!
//! User operations apply only to the owner of the access token: fetching
//! their profile and changing their name or default group.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::common::{ApiError, Endpoint};
use super::transport::{self, Transport};

/// The authenticated user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub modified: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub login: String,
    pub is_active: bool,
    pub is_2fa_enabled: bool,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<Email>,
    pub is_sso_user: bool,
    pub default_group_guid: String,
}

impl User {
    /// The primary address, if one is marked.
    pub fn primary_email(&self) -> Option<&Email> {
        self.emails.iter().find(|email| email.is_primary)
    }
}

/// An address on the user's account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub email: String,
    pub is_primary: bool,
    pub is_verified: bool,
}

/// Body of `PATCH user`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group_guid: Option<String>,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn default_group_guid(mut self, guid: impl Into<String>) -> Self {
        self.default_group_guid = Some(guid.into());
        self
    }
}

/// Client for the `user` resource.
pub struct Users<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Users<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Retrieves the authenticated user.
    pub async fn current(&self) -> Result<User, ApiError> {
        transport::get(self.transport, Endpoint::new("user")).await
    }

    /// Updates the authenticated user.
    pub async fn update(&self, update: &UserUpdate) -> Result<User, ApiError> {
        transport::send_json(self.transport, Method::PATCH, Endpoint::new("user"), update).await
    }
}

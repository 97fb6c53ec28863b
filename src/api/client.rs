//
//  bitly-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitly API
//!
//! This module provides the transport core every resource client runs on.
//! It owns the HTTP connection pool, the base URL and the access token.
//!
//! ## Features
//!
//! - Bearer authentication header injection
//! - One HTTP exchange per call, no retries
//! - Status codes surfaced to the decoder instead of being ignored
//! - Custom User-Agent header
//!
//! ## Credentials
//!
//! The token is fixed when the client is built. There is no setter: to use a
//! different token, build a new client and new resource clients from it.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use url::Url;

use super::bitlinks::Bitlinks;
use super::bsds::Bsds;
use super::common::{ApiError, Endpoint};
use super::groups::Groups;
use super::organizations::Organizations;
use super::transport::{RawResponse, Transport};
use super::users::Users;
use crate::config::ApiConfig;

/// Base URL of the Bitly v4 API.
pub const BITLY_API_BASE: &str = "https://api-ssl.bitly.com/v4/";

/// The HTTP transport for the Bitly API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitly_cli::api::BitlyClient;
///
/// # async fn example() -> Result<(), bitly_cli::api::ApiError> {
/// let client = BitlyClient::new("your-access-token")?;
/// let user = client.users().current().await?;
/// println!("Logged in as {}", user.login);
/// # Ok(())
/// # }
/// ```
///
/// # Sharing
///
/// Resource clients borrow the transport, so any number of them can be
/// created from one `BitlyClient` and used concurrently; the client holds no
/// mutable state.
pub struct BitlyClient {
    /// The underlying HTTP client
    http: Client,
    /// Absolute base URL every endpoint is joined onto
    base_url: Url,
    /// The access token sent as a bearer credential
    token: String,
}

impl BitlyClient {
    /// Creates a client for the public Bitly API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidToken`] if the token cannot be sent as an
    /// HTTP header, or [`ApiError::Transport`] if the HTTP client could not
    /// be created.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(BITLY_API_BASE, token)
    }

    /// Creates a client against a custom base URL.
    ///
    /// Useful for proxies and for pointing tests at a local server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when `base_url` is not an absolute
    /// URL that can carry a path, plus the errors of [`BitlyClient::new`].
    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let token = token.into();
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| ApiError::InvalidToken)?;

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("bitly/{}", crate::VERSION))
                .build()?,
            base_url,
            token,
        })
    }

    /// Creates a client from the `[api]` section of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when no access token is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let token = config
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)?;

        Self::with_base_url(&config.base_url, token)
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a client for bitlink operations.
    pub fn bitlinks(&self) -> Bitlinks<'_> {
        Bitlinks::new(self)
    }

    /// Returns a client for branded short domain operations.
    pub fn bsds(&self) -> Bsds<'_> {
        Bsds::new(self)
    }

    /// Returns a client for group operations.
    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    /// Returns a client for organization operations.
    pub fn organizations(&self) -> Organizations<'_> {
        Organizations::new(self)
    }

    /// Returns a client for the authenticated user.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}

impl fmt::Debug for BitlyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitlyClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Transport for BitlyClient {
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        let url = endpoint.join(&self.base_url)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            tracing::debug!("{} {} -> {}", method, endpoint, status);
        } else {
            tracing::warn!("{} {} -> {}", method, endpoint, status);
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

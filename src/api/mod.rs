//
//  bitly-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides a typed client for the Bitly v4 REST API at
//! `api-ssl.bitly.com/v4`.
//!
//! ## Architecture
//!
//! - [`client`]: The HTTP transport core with bearer authentication
//! - [`transport`]: The [`Transport`] trait and response classification
//! - [`common`]: Shared types (errors, endpoints, filters, metrics)
//! - [`bitlinks`], [`bsds`], [`groups`], [`organizations`], [`users`]: one
//!   client per remote resource group
//!
//! Each resource client borrows a `&dyn Transport`, builds an endpoint and
//! optional JSON body, performs one request, and decodes the response into a
//! typed record.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitly_cli::api::BitlyClient;
//! use bitly_cli::api::groups::{BitlinksQuery, Toggle};
//!
//! # async fn example() -> Result<(), bitly_cli::api::ApiError> {
//! let client = BitlyClient::new("your-access-token")?;
//!
//! let user = client.users().current().await?;
//! let page = client
//!     .groups()
//!     .bitlinks(&user.default_group_guid, &BitlinksQuery::new().archived(Toggle::Off))
//!     .await?;
//! for link in page.links {
//!     println!("{} -> {}", link.link, link.long_url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<T, ApiError>`. Non-2xx responses become
//! [`ApiError::Remote`] carrying the status and Bitly's error body; they are
//! never decoded as success records.

/// Core HTTP client for the Bitly API.
pub mod client;

/// The request/response seam between resource clients and HTTP.
pub mod transport;

/// Common types shared by every resource client.
pub mod common;

/// Shortened links and their click metrics.
pub mod bitlinks;

/// Branded short domains.
pub mod bsds;

/// Groups, their bitlinks, tags, preferences and metrics.
pub mod groups;

/// Organizations and their shorten counts.
pub mod organizations;

/// The authenticated user.
pub mod users;

pub use client::{BitlyClient, BITLY_API_BASE};
pub use common::{ApiError, Endpoint, ErrorEnvelope};
pub use transport::{RawResponse, Transport};

//
//  bitly-cli
//  api/bitlinks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitlink API types and operations.
//!
//! A bitlink is a shortened link, written as `domain/hash` (for example
//! `bit.ly/2HkdvXi` or `go.brand.co/launch`). This module covers creating
//! and updating bitlinks, expanding them back to their long URL, and the
//! click metrics Bitly keeps for each one.
//!
//! # Operations
//!
//! | Method | HTTP | Path |
//! |--------|------|------|
//! | [`Bitlinks::expand`] | POST | `expand` |
//! | [`Bitlinks::create`] | POST | `bitlinks` |
//! | [`Bitlinks::shorten`] | POST | `shorten` |
//! | [`Bitlinks::update`] | PATCH | `bitlinks/{bitlink}` |
//! | [`Bitlinks::clicks_summary`] | GET | `bitlinks/{bitlink}/clicks/summary` |
//! | [`Bitlinks::clicks`] | GET | `bitlinks/{bitlink}/clicks` |
//! | [`Bitlinks::countries`] | GET | `bitlinks/{bitlink}/countries` |
//! | [`Bitlinks::referrers`] | GET | `bitlinks/{bitlink}/referrers` |
//! | [`Bitlinks::referrers_by_domains`] | GET | `bitlinks/{bitlink}/referrers_by_domains` |
//! | [`Bitlinks::referring_domains`] | GET | `bitlinks/{bitlink}/referring_domains` |
//!
//! # Example
//!
//! ```rust,no_run
//! use bitly_cli::api::bitlinks::ShortenRequest;
//! use bitly_cli::api::common::{MetricsQuery, TimeUnit};
//! use bitly_cli::api::BitlyClient;
//!
//! # async fn example() -> Result<(), bitly_cli::api::ApiError> {
//! let client = BitlyClient::new("your-access-token")?;
//! let bitlinks = client.bitlinks();
//!
//! let link = bitlinks.shorten(&ShortenRequest::new("https://example.com/a/long/path")).await?;
//! let summary = bitlinks
//!     .clicks_summary(&link.id, &MetricsQuery::new().unit(TimeUnit::Day).units(7))
//!     .await?;
//! println!("{} clicked {} times this week", link.link, summary.total_clicks);
//! # Ok(())
//! # }
//! ```

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::common::{ApiError, ClickMetric, Endpoint, Metrics, MetricsQuery, References};
use super::transport::{self, Transport};

/// A shortened link as Bitly stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bitlink {
    /// Creation time, ISO-8601.
    pub created_at: String,

    /// Canonical identifier, `domain/hash`.
    pub id: String,

    /// The full short URL, `https://domain/hash`.
    pub link: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_bitlinks: Vec<String>,

    /// Destination URL.
    pub long_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub archived: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_by: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,

    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deeplinks: Vec<Deeplink>,

    /// The owning group.
    pub references: References,
}

/// A mobile deep link attached to a bitlink.
///
/// Requests use `app_id`, `app_uri_path`, `install_url` and `install_type`;
/// responses additionally carry the rule's identifiers and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deeplink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_uri_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,
    /// `no_install`, `auto_install` or `promote_install`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitlink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// Body of `POST expand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandRequest {
    pub bitlink_id: String,
}

impl ExpandRequest {
    pub fn new(bitlink_id: impl Into<String>) -> Self {
        Self {
            bitlink_id: bitlink_id.into(),
        }
    }
}

/// Public information about a bitlink, returned by `POST expand`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandedLink {
    pub created_at: String,
    pub link: String,
    pub id: String,
    pub long_url: String,
}

/// Body of `POST shorten`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,

    /// Branded short domain to use, `bit.ly` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Group to create the link in, the user's default group when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_guid: Option<String>,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn group_guid(mut self, group_guid: impl Into<String>) -> Self {
        self.group_guid = Some(group_guid.into());
        self
    }
}

/// Body of `POST bitlinks`: a shorten with extra attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBitlinkRequest {
    pub long_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deeplinks: Vec<Deeplink>,
}

impl CreateBitlinkRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn group_guid(mut self, group_guid: impl Into<String>) -> Self {
        self.group_guid = Some(group_guid.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn deeplink(mut self, deeplink: Deeplink) -> Self {
        self.deeplinks.push(deeplink);
        self
    }
}

/// Body of `PATCH bitlinks/{bitlink}`.
///
/// Only fields that are `Some` are sent, so `tags: Some(vec![])` clears the
/// tags while `tags: None` leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBitlinkRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deeplinks: Option<Vec<Deeplink>>,
}

impl UpdateBitlinkRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn deeplinks(mut self, deeplinks: Vec<Deeplink>) -> Self {
        self.deeplinks = Some(deeplinks);
        self
    }
}

/// All clicks in the window rolled into one number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickSummary {
    pub total_clicks: i64,
    pub units: i64,
    pub unit: String,
    pub unit_reference: String,
}

/// Clicks bucketed by `unit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkClicks {
    pub link_clicks: Vec<DatedClicks>,
    pub units: i64,
    pub unit: String,
    pub unit_reference: String,
}

impl LinkClicks {
    pub fn total_clicks(&self) -> i64 {
        self.link_clicks.iter().map(|c| c.clicks).sum()
    }
}

/// One bucket of [`LinkClicks`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatedClicks {
    pub clicks: i64,
    pub date: String,
}

/// Referrers grouped under the network (domain) they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferrersByDomains {
    pub referrers_by_domain: Vec<DomainReferrers>,
    pub units: i64,
    pub unit: String,
    pub unit_reference: String,
    pub facet: String,
}

/// One network and its referrers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainReferrers {
    pub network: String,
    pub referrers: Vec<ClickMetric>,
}

/// Client for the bitlink operations.
pub struct Bitlinks<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Bitlinks<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Returns public information for a bitlink.
    pub async fn expand(&self, request: &ExpandRequest) -> Result<ExpandedLink, ApiError> {
        transport::send_json(self.transport, Method::POST, Endpoint::new("expand"), request).await
    }

    /// Shortens a long URL and sets the extra attributes in one call.
    pub async fn create(&self, request: &CreateBitlinkRequest) -> Result<Bitlink, ApiError> {
        transport::send_json(self.transport, Method::POST, Endpoint::new("bitlinks"), request).await
    }

    /// Shortens a long URL.
    ///
    /// Bitly answers `200` when the link already existed and `201` when it
    /// was created; both decode to the same [`Bitlink`].
    pub async fn shorten(&self, request: &ShortenRequest) -> Result<Bitlink, ApiError> {
        transport::send_json(self.transport, Method::POST, Endpoint::new("shorten"), request).await
    }

    /// Updates the fields set in `request`.
    pub async fn update(
        &self,
        bitlink: &str,
        request: &UpdateBitlinkRequest,
    ) -> Result<Bitlink, ApiError> {
        let endpoint = Endpoint::new("bitlinks").bitlink(bitlink);
        transport::send_json(self.transport, Method::PATCH, endpoint, request).await
    }

    /// Total clicks for the window.
    pub async fn clicks_summary(
        &self,
        bitlink: &str,
        query: &MetricsQuery,
    ) -> Result<ClickSummary, ApiError> {
        self.metrics(bitlink, "clicks/summary", query).await
    }

    /// Clicks per `unit` for the window.
    pub async fn clicks(&self, bitlink: &str, query: &MetricsQuery) -> Result<LinkClicks, ApiError> {
        self.metrics(bitlink, "clicks", query).await
    }

    /// Clicks by the country they came from.
    pub async fn countries(
        &self,
        bitlink: &str,
        query: &MetricsQuery,
    ) -> Result<Metrics<ClickMetric>, ApiError> {
        self.metrics(bitlink, "countries", query).await
    }

    /// Clicks by referrer.
    pub async fn referrers(
        &self,
        bitlink: &str,
        query: &MetricsQuery,
    ) -> Result<Metrics<ClickMetric>, ApiError> {
        self.metrics(bitlink, "referrers", query).await
    }

    /// Referrer clicks grouped by the referring network.
    pub async fn referrers_by_domains(
        &self,
        bitlink: &str,
        query: &MetricsQuery,
    ) -> Result<ReferrersByDomains, ApiError> {
        self.metrics(bitlink, "referrers_by_domains", query).await
    }

    /// Referrer clicks rolled up to the referring domain.
    pub async fn referring_domains(
        &self,
        bitlink: &str,
        query: &MetricsQuery,
    ) -> Result<Metrics<ClickMetric>, ApiError> {
        self.metrics(bitlink, "referring_domains", query).await
    }

    async fn metrics<T: serde::de::DeserializeOwned>(
        &self,
        bitlink: &str,
        facet: &str,
        query: &MetricsQuery,
    ) -> Result<T, ApiError> {
        let endpoint = Endpoint::new("bitlinks")
            .bitlink(bitlink)
            .path(facet)
            .with_query(query.to_query());
        transport::get(self.transport, endpoint).await
    }
}

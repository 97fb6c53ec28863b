//
//  bitly-cli
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group API types and operations.
//!
//! Groups are a subdivision of an organization. Every user belongs to at
//! least one group, and most actions (shortening a link, for one) happen on
//! behalf of a user and a group.
//!
//! # Hierarchy
//!
//! ```text
//! Organization
//! └── Group
//!     ├── Bitlinks
//!     ├── Tags
//!     └── Preferences
//! ```
//!
//! # Operations
//!
//! | Method | HTTP | Path |
//! |--------|------|------|
//! | [`Groups::list`] | GET | `groups` |
//! | [`Groups::get`] | GET | `groups/{guid}` |
//! | [`Groups::update`] | PATCH | `groups/{guid}` |
//! | [`Groups::preferences`] | GET | `groups/{guid}/preferences` |
//! | [`Groups::update_preferences`] | PATCH | `groups/{guid}/preferences` |
//! | [`Groups::bitlinks`] | GET | `groups/{guid}/bitlinks` |
//! | [`Groups::tags`] | GET | `groups/{guid}/tags` |
//! | [`Groups::countries`] | GET | `groups/{guid}/countries` |
//! | [`Groups::referring_networks`] | GET | `groups/{guid}/referring_networks` |
//! | [`Groups::shorten_counts`] | GET | `groups/{guid}/shorten_counts` |
//! | [`Groups::sorted_bitlinks`] | GET | `groups/{guid}/bitlinks/{sort}` |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::bitlinks::Bitlink;
use super::common::{
    ApiError, ClickMetric, CountMetric, Endpoint, Metrics, MetricsQuery, Pagination, Query,
    References,
};
use super::transport::{self, Transport};

/// Response of `GET groups`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupList {
    pub groups: Vec<Group>,
}

/// A group and the organization it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub modified: String,

    /// Branded short domains available to the group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bsds: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,

    pub organization_guid: String,

    pub name: String,

    pub is_active: bool,

    /// The authenticated user's role in the group.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,

    pub references: References,
}

/// Body of `PATCH groups/{guid}`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bsds: Option<Vec<String>>,
}

impl GroupUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn organization_guid(mut self, organization_guid: impl Into<String>) -> Self {
        self.organization_guid = Some(organization_guid.into());
        self
    }

    pub fn bsds(mut self, bsds: Vec<String>) -> Self {
        self.bsds = Some(bsds);
        self
    }
}

/// A group's preferences; used both as request and response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPreferences {
    pub group_guid: String,

    /// Default short domain for links created in the group.
    pub domain_preference: String,
}

/// A page of bitlinks in a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupBitlinks {
    pub links: Vec<Bitlink>,
    pub pagination: Pagination,
}

/// Tags currently used in a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tags {
    pub tags: Vec<String>,
}

/// A group's bitlinks ranked by a metric.
///
/// `sorted_links` holds the ranking; `links` holds the full records for the
/// same bitlinks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortedBitlinks {
    pub links: Vec<Bitlink>,
    pub sorted_links: Vec<SortedLink>,
}

/// One entry of a [`SortedBitlinks`] ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortedLink {
    pub id: String,
    pub clicks: i64,
}

/// Filter for `GET groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupsQuery {
    pub organization_guid: Option<String>,
}

impl GroupsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn organization_guid(mut self, organization_guid: impl Into<String>) -> Self {
        self.organization_guid = Some(organization_guid.into());
        self
    }

    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.push_opt("organization_guid", self.organization_guid.as_deref());
        query
    }
}

/// Three-way switch used by the archived/deeplink filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    On,
    Off,
    Both,
}

impl Toggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "both" => Ok(Self::Both),
            other => Err(format!("invalid value '{}', expected on, off or both", other)),
        }
    }
}

/// Filter for `GET groups/{guid}/bitlinks`.
///
/// Every field is optional; only fields that are set reach the query
/// string. Repeated fields (`tags`, `encoding_login`) produce one pair per
/// element, in order.
///
/// ```rust
/// use bitly_cli::api::groups::{BitlinksQuery, Toggle};
///
/// let query = BitlinksQuery::new()
///     .size(50)
///     .archived(Toggle::Off)
///     .tag("launch")
///     .tag("q3");
/// assert_eq!(query.to_query().encode(), "size=50&archived=off&tags=launch&tags=q3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitlinksQuery {
    /// Number of items per page
    pub size: Option<u32>,
    /// Page number to return
    pub page: Option<u32>,
    /// Custom keyword to filter on history entries
    pub keyword: Option<String>,
    /// Free-text search
    pub query: Option<String>,
    /// Unix epoch seconds
    pub created_before: Option<i64>,
    /// Unix epoch seconds
    pub created_after: Option<i64>,
    /// Unix epoch seconds
    pub modified_after: Option<i64>,
    pub archived: Option<Toggle>,
    pub deeplinks: Option<Toggle>,
    pub domain_deeplinks: Option<Toggle>,
    pub campaign_guid: Option<String>,
    /// Overrides every other filter remotely
    pub channel_guid: Option<String>,
    pub custom_bitlink: Option<Toggle>,
    pub tags: Vec<String>,
    /// Logins of the users who created the bitlinks
    pub encoding_login: Vec<String>,
}

impl BitlinksQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn created_before(mut self, epoch: i64) -> Self {
        self.created_before = Some(epoch);
        self
    }

    pub fn created_after(mut self, epoch: i64) -> Self {
        self.created_after = Some(epoch);
        self
    }

    pub fn modified_after(mut self, epoch: i64) -> Self {
        self.modified_after = Some(epoch);
        self
    }

    pub fn created_before_at<Tz: TimeZone>(self, at: DateTime<Tz>) -> Self {
        self.created_before(at.timestamp())
    }

    pub fn created_after_at<Tz: TimeZone>(self, at: DateTime<Tz>) -> Self {
        self.created_after(at.timestamp())
    }

    pub fn modified_after_at<Tz: TimeZone>(self, at: DateTime<Tz>) -> Self {
        self.modified_after(at.timestamp())
    }

    pub fn archived(mut self, archived: Toggle) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn deeplinks(mut self, deeplinks: Toggle) -> Self {
        self.deeplinks = Some(deeplinks);
        self
    }

    pub fn domain_deeplinks(mut self, domain_deeplinks: Toggle) -> Self {
        self.domain_deeplinks = Some(domain_deeplinks);
        self
    }

    pub fn campaign_guid(mut self, campaign_guid: impl Into<String>) -> Self {
        self.campaign_guid = Some(campaign_guid.into());
        self
    }

    pub fn channel_guid(mut self, channel_guid: impl Into<String>) -> Self {
        self.channel_guid = Some(channel_guid.into());
        self
    }

    pub fn custom_bitlink(mut self, custom_bitlink: Toggle) -> Self {
        self.custom_bitlink = Some(custom_bitlink);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn encoding_login(mut self, login: impl Into<String>) -> Self {
        self.encoding_login.push(login.into());
        self
    }

    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push_opt("size", self.size)
            .push_opt("page", self.page)
            .push_opt("created_before", self.created_before)
            .push_opt("created_after", self.created_after)
            .push_opt("modified_after", self.modified_after)
            .push_opt("keyword", self.keyword.as_deref())
            .push_opt("query", self.query.as_deref())
            .push_opt("archived", self.archived)
            .push_opt("deeplinks", self.deeplinks)
            .push_opt("domain_deeplinks", self.domain_deeplinks)
            .push_opt("campaign_guid", self.campaign_guid.as_deref())
            .push_opt("channel_guid", self.channel_guid.as_deref())
            .push_opt("custom_bitlink", self.custom_bitlink)
            .push_each("tags", &self.tags)
            .push_each("encoding_login", &self.encoding_login);
        query
    }
}

/// Metric a sorted bitlinks ranking is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortType {
    #[default]
    Clicks,
}

impl SortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clicks => "clicks",
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clicks" => Ok(Self::Clicks),
            other => Err(format!("invalid sort type '{}', expected clicks", other)),
        }
    }
}

/// Filter for `GET groups/{guid}/bitlinks/{sort}`.
///
/// The sort type becomes a path segment; the window goes in the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedBitlinksQuery {
    pub sort: SortType,
    pub window: MetricsQuery,
}

impl SortedBitlinksQuery {
    pub fn new(sort: SortType) -> Self {
        Self {
            sort,
            window: MetricsQuery::default(),
        }
    }

    pub fn window(mut self, window: MetricsQuery) -> Self {
        self.window = window;
        self
    }
}

/// Client for the group operations.
pub struct Groups<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Groups<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists groups, optionally limited to one organization.
    pub async fn list(&self, query: &GroupsQuery) -> Result<GroupList, ApiError> {
        let endpoint = Endpoint::new("groups").with_query(query.to_query());
        transport::get(self.transport, endpoint).await
    }

    /// Retrieves a group's details.
    pub async fn get(&self, group_guid: &str) -> Result<Group, ApiError> {
        transport::get(self.transport, Self::group(group_guid)).await
    }

    /// Updates a group's name, organization or branded domains.
    pub async fn update(&self, group_guid: &str, update: &GroupUpdate) -> Result<Group, ApiError> {
        transport::send_json(self.transport, Method::PATCH, Self::group(group_guid), update).await
    }

    /// Retrieves a group's preferences.
    pub async fn preferences(&self, group_guid: &str) -> Result<GroupPreferences, ApiError> {
        let endpoint = Self::group(group_guid).path("preferences");
        transport::get(self.transport, endpoint).await
    }

    /// Updates a group's preferences.
    pub async fn update_preferences(
        &self,
        group_guid: &str,
        preferences: &GroupPreferences,
    ) -> Result<GroupPreferences, ApiError> {
        let endpoint = Self::group(group_guid).path("preferences");
        transport::send_json(self.transport, Method::PATCH, endpoint, preferences).await
    }

    /// Retrieves one page of the group's bitlinks.
    pub async fn bitlinks(
        &self,
        group_guid: &str,
        query: &BitlinksQuery,
    ) -> Result<GroupBitlinks, ApiError> {
        let endpoint = Self::group(group_guid)
            .path("bitlinks")
            .with_query(query.to_query());
        transport::get(self.transport, endpoint).await
    }

    /// Retrieves the tags currently used in the group.
    pub async fn tags(&self, group_guid: &str) -> Result<Tags, ApiError> {
        transport::get(self.transport, Self::group(group_guid).path("tags")).await
    }

    /// Click metrics by country, rolled up to the group.
    pub async fn countries(&self, group_guid: &str) -> Result<Metrics<ClickMetric>, ApiError> {
        transport::get(self.transport, Self::group(group_guid).path("countries")).await
    }

    /// Click metrics by referring network, rolled up to the group.
    pub async fn referring_networks(
        &self,
        group_guid: &str,
    ) -> Result<Metrics<ClickMetric>, ApiError> {
        let endpoint = Self::group(group_guid).path("referring_networks");
        transport::get(self.transport, endpoint).await
    }

    /// Number of links shortened in the group, per time bucket.
    pub async fn shorten_counts(&self, group_guid: &str) -> Result<Metrics<CountMetric>, ApiError> {
        let endpoint = Self::group(group_guid).path("shorten_counts");
        transport::get(self.transport, endpoint).await
    }

    /// The group's bitlinks ranked by `query.sort` over `query.window`.
    pub async fn sorted_bitlinks(
        &self,
        group_guid: &str,
        query: &SortedBitlinksQuery,
    ) -> Result<SortedBitlinks, ApiError> {
        let endpoint = Self::group(group_guid)
            .path("bitlinks")
            .segment(query.sort.as_str())
            .with_query(query.window.to_query());
        transport::get(self.transport, endpoint).await
    }

    fn group(group_guid: &str) -> Endpoint {
        Endpoint::new("groups").segment(group_guid)
    }
}

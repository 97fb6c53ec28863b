//
//  bitly-cli
//  api/organizations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization API types and operations.
//!
//! Organizations are the top of the ownership hierarchy: groups, and through
//! them users and bitlinks, belong to an organization.

use serde::{Deserialize, Serialize};

use super::common::{ApiError, CountMetric, Endpoint, Metrics, References};
use super::transport::{self, Transport};

/// Response of `GET organizations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationList {
    pub organizations: Vec<Organization>,
}

/// An organization and its subscription tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub created: String,
    pub modified: String,
    pub bsds: Vec<String>,
    pub guid: String,
    pub name: String,
    pub is_active: bool,
    /// Subscription tier, e.g. `free` or `enterprise`.
    pub tier: String,
    pub tier_family: String,
    pub tier_display_name: String,
    /// The authenticated user's role in the organization.
    pub role: String,
    /// Link to the organization's groups collection.
    pub references: References,
}

/// Client for the organization operations.
pub struct Organizations<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Organizations<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Lists every organization the user belongs to.
    pub async fn list(&self) -> Result<OrganizationList, ApiError> {
        transport::get(self.transport, Endpoint::new("organizations")).await
    }

    /// Retrieves one organization.
    pub async fn get(&self, organization_guid: &str) -> Result<Organization, ApiError> {
        let endpoint = Endpoint::new("organizations").segment(organization_guid);
        transport::get(self.transport, endpoint).await
    }

    /// Number of links shortened in the organization, per time bucket.
    pub async fn shorten_counts(
        &self,
        organization_guid: &str,
    ) -> Result<Metrics<CountMetric>, ApiError> {
        let endpoint = Endpoint::new("organizations")
            .segment(organization_guid)
            .path("shorten_counts");
        transport::get(self.transport, endpoint).await
    }
}

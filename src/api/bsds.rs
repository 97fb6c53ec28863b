//
//  bitly-cli
//  api/bsds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branded short domains.
//!
//! A branded short domain (BSD) is a custom domain of up to 15 characters
//! that replaces `bit.ly` in shortened links.

use serde::{Deserialize, Serialize};

use super::common::{ApiError, Endpoint};
use super::transport::{self, Transport};

/// Every branded short domain available to the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandedDomains {
    pub bsds: Vec<String>,
}

/// Client for the `bsds` resource.
pub struct Bsds<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Bsds<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetches all branded short domains.
    pub async fn list(&self) -> Result<BrandedDomains, ApiError> {
        transport::get(self.transport, Endpoint::new("bsds")).await
    }
}

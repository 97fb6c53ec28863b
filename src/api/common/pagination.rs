//
//  bitly-cli
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination block returned with list endpoints
//!
//! Bitly pages group bitlink listings with a `pagination` object carrying
//! absolute `prev`/`next` URLs alongside page counters:
//!
//! ```json
//! {
//!     "prev": "",
//!     "next": "https://api-ssl.bitly.com/v4/groups/Ba1/bitlinks?page=2&size=50",
//!     "size": 50,
//!     "page": 1,
//!     "total": 120
//! }
//! ```
//!
//! This crate does not follow those links on its own; callers request the
//! next page by setting `page` on the filter.

use serde::{Deserialize, Serialize};

/// Page metadata for list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Absolute URL of the previous page, empty on the first page.
    pub prev: String,

    /// Absolute URL of the next page, empty on the last page.
    pub next: String,

    /// Page size used for this response.
    pub size: i64,

    /// 1-based page number of this response.
    pub page: i64,

    /// Total number of items across all pages.
    pub total: i64,
}

impl Pagination {
    /// Checks if another page is available.
    pub fn has_next(&self) -> bool {
        !self.next.is_empty()
    }

    /// Checks if a previous page is available.
    pub fn has_prev(&self) -> bool {
        !self.prev.is_empty()
    }

    /// Returns the page number to request next, if any.
    pub fn next_page(&self) -> Option<i64> {
        self.has_next().then_some(self.page + 1)
    }
}

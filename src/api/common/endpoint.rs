//
//  bitly-cli
//  api/common/endpoint.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request path construction
//!
//! An [`Endpoint`] is the relative part of a Bitly API URL: an ordered list
//! of path segments plus the query pairs produced by a filter. Identifiers
//! supplied by callers are always added as whole segments, so reserved
//! characters in them are percent-encoded instead of changing the shape of
//! the path.
//!
//! ```rust
//! use bitly_cli::api::common::Endpoint;
//!
//! let endpoint = Endpoint::new("groups").segment("Ba1bc23dE4F").path("bitlinks");
//! assert_eq!(endpoint.render(), "groups/Ba1bc23dE4F/bitlinks");
//!
//! let escaped = Endpoint::new("groups").segment("a/b c");
//! assert_eq!(escaped.render(), "groups/a%2Fb%20c");
//! ```
//!
//! Empty, `.` and `..` identifiers would collapse or climb out of their
//! segment once the URL is normalized. They are recorded as invalid and the
//! endpoint refuses to resolve, so the request is never sent.

use std::fmt;
use std::sync::LazyLock;

use url::{Position, Url};

use super::{ApiError, Query};

/// Base used to render endpoints without a real host.
static RENDER_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("static render base is a valid URL"));

/// A relative Bitly API path with its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Query,
    invalid: Option<String>,
}

impl Endpoint {
    /// Starts an endpoint from a fixed path such as `"bitlinks"` or `"user"`.
    ///
    /// The path is split on `/`; it must come from a constant, never from
    /// user input. Use [`segment`](Self::segment) for identifiers.
    pub fn new(path: &str) -> Self {
        Self::default().path(path)
    }

    /// Appends fixed path segments.
    pub fn path(mut self, path: &str) -> Self {
        self.segments.extend(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Appends a caller-supplied identifier as exactly one path segment.
    pub fn segment(mut self, value: &str) -> Self {
        if is_dot_or_empty(value) {
            self.reject(value);
        }
        self.segments.push(value.to_string());
        self
    }

    /// Appends a bitlink identifier such as `bit.ly/2HkdvXi`.
    ///
    /// Bitlink ids are `domain/hash`; each part becomes its own escaped
    /// segment so the remote path keeps its `bitlinks/<domain>/<hash>` form.
    /// A leading scheme (`https://bit.ly/...`) is stripped first.
    pub fn bitlink(mut self, id: &str) -> Self {
        let parts: Vec<&str> = bitlink_id(id)
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        if parts.is_empty() || parts.iter().any(|part| is_dot_or_empty(part)) {
            self.reject(id);
        }
        self.segments.extend(parts.into_iter().map(str::to_string));
        self
    }

    fn reject(&mut self, value: &str) {
        self.invalid.get_or_insert_with(|| value.to_string());
    }

    /// Attaches query pairs, replacing any set before.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Fails with [`ApiError::InvalidIdentifier`] if an identifier could not
    /// be kept as its own segment.
    pub fn validate(&self) -> Result<(), ApiError> {
        match &self.invalid {
            Some(value) => Err(ApiError::InvalidIdentifier(value.clone())),
            None => Ok(()),
        }
    }

    /// Renders the relative `path[?query]` string with all escaping applied.
    pub fn render(&self) -> String {
        self.resolve(&RENDER_BASE)
            .map(|url| url[Position::BeforePath..].trim_start_matches('/').to_string())
            .unwrap_or_default()
    }

    /// Resolves this endpoint against an absolute base URL.
    ///
    /// The base's own path is kept (so `https://api-ssl.bitly.com/v4/` plus
    /// `groups` yields `https://api-ssl.bitly.com/v4/groups`) and any query on
    /// the base is replaced.
    pub fn join(&self, base: &Url) -> Result<Url, ApiError> {
        self.validate()?;
        self.resolve(base)
    }

    fn resolve(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(base.to_string()))?;
            path.pop_if_empty();
            path.extend(&self.segments);
        }

        if self.query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.query.encode()));
        }

        Ok(url)
    }
}

/// Strips a leading `http://` or `https://` and trailing slashes from a
/// bitlink, leaving the bare `domain/hash` form.
pub fn bitlink_id(id: &str) -> &str {
    id.strip_prefix("https://")
        .or_else(|| id.strip_prefix("http://"))
        .unwrap_or(id)
        .trim_end_matches('/')
}

fn is_dot_or_empty(value: &str) -> bool {
    matches!(value, "" | "." | "..")
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

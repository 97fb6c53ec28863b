//
//  bitly-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types shared by every Bitly resource client
//!
//! This module provides the pieces that all resource clients (bitlinks,
//! branded short domains, groups, organizations and users) are built from:
//! error handling, endpoint and query construction, and the records that
//! several resources return.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorEnvelope`] - The error body Bitly returns with non-2xx responses
//! - [`Endpoint`] - Relative request path with escaped identifiers and query pairs
//! - [`Query`] / [`MetricsQuery`] - Optional filter encoding
//! - [`Metrics`] - Generic facet/unit/value-count record
//! - [`References`] / [`Pagination`] - Embedded records found in several payloads
//!
//! # Example
//!
//! ```rust
//! use bitly_cli::api::common::ApiError;
//!
//! fn describe<T>(result: Result<T, ApiError>) -> String {
//!     match result {
//!         Ok(_) => "ok".to_string(),
//!         Err(e) if e.is_not_found() => "no such resource".to_string(),
//!         Err(e) => format!("failed: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod endpoint;
mod metrics;
mod pagination;
mod query;

pub use endpoint::*;
pub use metrics::*;
pub use pagination::*;
pub use query::*;

/// Boxed error produced by a [`Transport`](crate::api::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for all Bitly API operations.
///
/// Every resource operation returns either a fully decoded record or one of
/// these variants; there is no partially populated success value.
///
/// | Variant | Raised when | Network call made |
/// |---------|-------------|-------------------|
/// | `Encode` | The request body could not be serialized | No |
/// | `Transport` | DNS, connect, TLS or read failure | Yes |
/// | `Decode` | A 2xx body did not match the expected record | Yes |
/// | `Remote` | Bitly answered with a non-2xx status | Yes |
/// | `InvalidBaseUrl` | The client was built with an unusable base URL | No |
/// | `InvalidIdentifier` | An identifier was empty, `.` or `..` | No |
/// | `InvalidToken` / `MissingToken` | The access token cannot be sent | No |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The outbound request body failed to serialize.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A network-level failure occurred; the underlying cause is kept as the source.
    #[error("Network error: {0}")]
    Transport(#[source] BoxError),

    /// A successful response body could not be decoded into the expected record.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Bitly returned a non-success status code.
    ///
    /// The parsed error body is available in `envelope`; when the body is not
    /// a JSON error document its raw text is kept in `envelope.message`.
    #[error("Bitly API error ({status}): {envelope}")]
    Remote {
        /// The HTTP status code
        status: u16,
        /// The decoded error body
        envelope: ErrorEnvelope,
    },

    /// The base URL could not be parsed or cannot carry a path.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A caller-supplied identifier was empty, `.` or `..` and cannot be
    /// sent as a path segment.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The access token contains characters that cannot be sent in a header.
    #[error("Access token is not a valid header value")]
    InvalidToken,

    /// No access token was configured.
    #[error("No access token configured. Set BITLY_TOKEN or run 'bitly config set access_token <token>'")]
    MissingToken,
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::Remote`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when Bitly reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` when the credential was rejected (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
            || matches!(self, Self::InvalidToken | Self::MissingToken)
    }

    /// Returns `true` when Bitly rate limited the request.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// The error document Bitly sends with non-2xx responses.
///
/// ```json
/// {
///     "message": "INVALID_ARG_LONG_URL",
///     "resource": "bitlinks",
///     "description": "The value provided is invalid.",
///     "errors": [{"field": "long_url", "error_code": "invalid"}]
/// }
/// ```
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorEnvelope {
    /// Machine-readable error code, e.g. `FORBIDDEN` or `NOT_FOUND`.
    pub message: String,

    /// Human readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The resource the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Per-field validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    /// Parses an error body, falling back to the raw text when it is not a
    /// Bitly error document.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.message.is_empty() => envelope,
            _ => Self {
                message: String::from_utf8_lossy(body).trim().to_string(),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str("<empty response body>")?;
        } else {
            f.write_str(&self.message)?;
        }
        if let Some(description) = &self.description {
            write!(f, " - {}", description)?;
        }
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

/// A single field validation failure inside an [`ErrorEnvelope`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldError {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(code) = &self.error_code {
            write!(f, " ({})", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

/// Links from a record to the resources that own it.
///
/// Bitly embeds a different subset depending on the record: bitlinks point
/// at their `group`, groups at their `organization`, and organizations at
/// their `groups` collection. Each value is an absolute API URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct References {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
}

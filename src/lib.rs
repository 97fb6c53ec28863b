//
//  bitly-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitly CLI Library
//!
//! A typed client for the Bitly v4 REST API and the `bitly` command-line
//! tool built on it.
//!
//! ## Overview
//!
//! The [`api`] module is usable on its own: construct a
//! [`BitlyClient`](api::BitlyClient) with an access token, then reach each
//! remote resource through its accessor. Every operation performs exactly one
//! HTTP request and returns a decoded record or an [`ApiError`](api::ApiError).
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP transport, endpoints, filters and resource clients
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitly_cli::api::bitlinks::ShortenRequest;
//! use bitly_cli::api::BitlyClient;
//!
//! # async fn example() -> Result<(), bitly_cli::api::ApiError> {
//! let client = BitlyClient::new("your-access-token")?;
//! let link = client
//!     .bitlinks()
//!     .shorten(&ShortenRequest::new("https://example.com/a/long/path"))
//!     .await?;
//! println!("{}", link.link);
//! # Ok(())
//! # }
//! ```

/// API client for the Bitly v4 REST API.
///
/// Covers bitlinks, branded short domains, groups, organizations and the
/// authenticated user. Requests carry the access token as a bearer
/// credential; non-2xx responses surface as [`api::ApiError::Remote`].
pub mod api;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/bitly/config.toml`
/// - macOS: `~/Library/Application Support/bitly/config.toml`
/// - Windows: `%APPDATA%\bitly\config\config.toml`
pub mod config;

/// Output formatting for table and JSON modes.
pub mod output;

pub use cli::Cli;

pub use config::Config;

/// Application name, used for the config directory.
pub const APP_NAME: &str = "bitly";

/// Crate version, sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes.
///
/// Codes are powers of two so scripts can test for a class of failure.
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// Network failures, undecodable responses and any API error without a
    /// more specific code. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// No access token is configured, or Bitly rejected it (401/403).
    /// Set `BITLY_TOKEN` or run `bitly config set access_token <token>`.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found (404).
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded (429).
    pub const RATE_LIMIT: i32 = 32;

    /// Picks the exit code for an error returned by a command.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err.downcast_ref::<ApiError>() {
            Some(e) if e.is_auth_error() => AUTH_ERROR,
            Some(e) if e.is_not_found() => NOT_FOUND,
            Some(e) if e.is_rate_limited() => RATE_LIMIT,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::api::ErrorEnvelope;

        fn remote(status: u16) -> anyhow::Error {
            ApiError::Remote {
                status,
                envelope: ErrorEnvelope::from_body(b"{\"message\":\"X\"}"),
            }
            .into()
        }

        #[test]
        fn test_exit_code_mapping() {
            assert_eq!(for_error(&remote(401)), AUTH_ERROR);
            assert_eq!(for_error(&remote(403)), AUTH_ERROR);
            assert_eq!(for_error(&remote(404)), NOT_FOUND);
            assert_eq!(for_error(&remote(429)), RATE_LIMIT);
            assert_eq!(for_error(&remote(500)), ERROR);
            assert_eq!(for_error(&ApiError::MissingToken.into()), AUTH_ERROR);
            assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
        }
    }
}

//
//  bitly-cli
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Seam
//!
//! Every resource client talks to Bitly through the [`Transport`] trait: one
//! request in, one [`RawResponse`] out. [`BitlyClient`](super::BitlyClient)
//! is the HTTP implementation; tests substitute their own.
//!
//! Response classification lives here rather than in the transport so every
//! implementation gets the same semantics:
//!
//! - 2xx: the body is decoded into the expected record, or [`ApiError::Decode`]
//! - anything else: [`ApiError::Remote`] with the parsed [`ErrorEnvelope`]

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::common::{ApiError, Endpoint, ErrorEnvelope};

/// The status and full body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request to the Bitly API.
///
/// Implementations perform exactly one exchange per call and report
/// network-level failures as [`ApiError::Transport`]. They return every
/// completed exchange as a [`RawResponse`], whatever its status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError>;
}

/// Serializes a request body to JSON.
pub fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(ApiError::Encode)
}

/// Classifies a response and decodes a successful body.
pub fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Remote {
            status: response.status,
            envelope: ErrorEnvelope::from_body(&response.body),
        });
    }

    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}

/// Issues a GET and decodes the response.
pub(crate) async fn get<T: DeserializeOwned>(
    transport: &dyn Transport,
    endpoint: Endpoint,
) -> Result<T, ApiError> {
    endpoint.validate()?;
    let response = transport.send(Method::GET, &endpoint, None).await?;
    decode(response)
}

/// Encodes `body`, sends it with `method`, and decodes the response.
///
/// Validation and encoding happen before the transport is touched, so a bad
/// identifier or a body that fails to serialize never produces a network call.
pub(crate) async fn send_json<T, B>(
    transport: &dyn Transport,
    method: Method,
    endpoint: Endpoint,
    body: &B,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    endpoint.validate()?;
    let payload = encode(body)?;
    let response = transport.send(method, &endpoint, Some(payload)).await?;
    decode(response)
}

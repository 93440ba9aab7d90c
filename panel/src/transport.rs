//! The HTTP seam. The panel composes requests; a [`Transport`] sends them.
//!
//! In the browser this is backed by `fetch`; tests use an in-memory double.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::form::PartValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<(String, PartValue)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute or origin-relative URL, already joined with the API base.
    pub url: String,
    pub body: RequestBody,
}

/// Raw answer: status code plus the undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. Must return [`crate::PanelError::Network`] when no
/// response was received; any response, whatever its status, is `Ok`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<HttpReply>;
}

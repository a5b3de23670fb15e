// src/github/fetch.rs
// =============================================================================
// Fetches file bodies from the GitHub contents API.
//
// GET /repos/{owner}/{repo}/contents/{path}?ref={branch} answers with a JSON
// object whose `content` field is the file, base64-encoded and wrapped at 60
// columns. This module does the request and the decode; everything about line
// ranges and highlighting lives elsewhere.
//
// Network access goes through the ContentSource trait so the loader and the
// docs scanner can be driven by an in-memory source in tests.
// =============================================================================

use std::string::FromUtf8Error;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::Config;

/// Everything that can go wrong between sending the request and holding the
/// decoded text. Callers treat all of them as one "fetch failure".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("response carries no file content")]
    MissingContent,

    #[error("unsupported content encoding `{0}`")]
    Encoding(String),

    #[error("invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// The part of a contents API response we use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contents {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl Contents {
    /// A response carrying `text` the way GitHub would send it.
    pub fn from_text(text: &str) -> Self {
        Self {
            content: Some(STANDARD.encode(text)),
            encoding: Some("base64".to_string()),
        }
    }
}

/// Anything that can answer a contents API URL.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Contents, FetchError>;
}

// Decodes the `content` field of a response into text.
//
// Parameters:
//   contents: the deserialized contents API response
//
// Returns: the file as a String, or
//   FetchError::Encoding when GitHub sent `encoding: none` (files over 1 MB)
//   FetchError::MissingContent when there is no `content` (e.g. a directory)
//   FetchError::Base64 / FetchError::Utf8 when the bytes do not decode
//
// ASCII whitespace is skipped: GitHub wraps the base64 at 60 columns.
pub fn decode_contents(contents: &Contents) -> Result<String, FetchError> {
    match contents.encoding.as_deref() {
        None | Some("base64") => {}
        Some(other) => return Err(FetchError::Encoding(other.to_string())),
    }

    let encoded = contents
        .content
        .as_deref()
        .ok_or(FetchError::MissingContent)?;

    let compact: Vec<u8> = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

/// ContentSource backed by reqwest.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    /// Builds a client from the configuration.
    ///
    /// GitHub refuses requests without a User-Agent, so one is always set.
    /// The token, when configured, is sent as a static bearer header.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl ContentSource for GitHubClient {
    async fn fetch(&self, url: &Url) -> Result<Contents, FetchError> {
        tracing::debug!(%url, "fetching contents");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Contents>().await?)
    }
}

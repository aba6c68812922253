//! Transport abstraction for the WebUI HTTP calls.
//!
//! This module provides the [`HttpOps`] trait, which executes a single request without any
//! session handling, and [`ReqwestTransport`], its `reqwest` backed implementation. Tests
//! inject their own implementation through [`crate::QBittorrentClient::with_transport`].

use std::{error::Error as StdError, time::Duration};

use reqwest::{Client, Method};
use url::Url;

use qbit_torrent_types::QBitError;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Boxed error returned by transports.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Executes one HTTP round trip.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait HttpOps {
    /// Sends `request` and reads the full response body.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// [`HttpOps`] over a `reqwest` client, resolving request paths against a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Builds a transport with its own `reqwest` client.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, QBitError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| QBitError::Transport(Box::new(e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Builds a transport around an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &HttpRequest) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), request.path);
        url.set_path(&path);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        url
    }
}

impl HttpOps for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.client.request(method, self.url_for(&request));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let cookies = response
            .cookies()
            .map(|c| (c.name().to_owned(), c.value().to_owned()))
            .collect();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            cookies,
            body,
        })
    }
}

//! Plain-data HTTP requests and responses.
//!
//! Requests carry their body as [`Bytes`], so a request can be cloned and sent again after a
//! re-authentication without re-reading its source.

use bytes::Bytes;
use url::form_urlencoded;

/// `Content-Type` of form-encoded bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

/// An HTTP request described as plain data. `path` is relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute path, e.g. `/api/v2/torrents/info`.
    pub path: String,
    /// Query string pairs, in order.
    pub query: Vec<(String, String)>,
    /// Extra headers (content type, cookie).
    pub headers: Vec<(String, String)>,
    /// Buffered request body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            path: path.to_owned(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A GET request for `path`.
    pub fn get(path: &str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// A POST request for `path`.
    pub fn post(path: &str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Sets the query string pairs.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Sets a raw body and its content type.
    pub fn with_body(self, content_type: &str, body: impl Into<Bytes>) -> Self {
        let mut request = self.with_header("Content-Type", content_type);
        request.body = Some(body.into());
        request
    }

    /// Sets a form-encoded body.
    pub fn with_form(self, fields: &[(&str, &str)]) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.with_body(FORM_CONTENT_TYPE, encoded)
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Cookies set by the response, as name/value pairs.
    pub cookies: Vec<(String, String)>,
    /// Full response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the cookie named `name`, if the response set one.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

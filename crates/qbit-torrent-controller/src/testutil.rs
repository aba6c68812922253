//! Shared test utilities and fixtures.

use bytes::Bytes;
use url::form_urlencoded;

use crate::config::Credentials;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub(crate) const LOGIN_PATH: &str = "/api/v2/auth/login";
pub(crate) const INFO_PATH: &str = "/api/v2/torrents/info";

pub(crate) const TORRENTS_JSON: &str = r#"[
    {
        "hash": "8c212779b4abde7c6bc608063a0d008b7e40ce32",
        "name": "debian-12.5.0-amd64-netinst.iso",
        "state": "uploading",
        "progress": 1.0,
        "size": 659554304,
        "tags": "iso,linux",
        "category": "linux"
    },
    {
        "hash": "5a8062c076fa85e8056451c0d9aa04349ae27909",
        "name": "archlinux-2024.05.01-x86_64.iso",
        "state": "downloading",
        "progress": 0.42,
        "size": 1123452928,
        "tags": "",
        "category": "linux"
    }
]"#;

pub(crate) fn credentials() -> Credentials {
    Credentials::new("testuser", "testpass")
}

pub(crate) fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        cookies: Vec::new(),
        body: Bytes::copy_from_slice(body.as_bytes()),
    }
}

pub(crate) fn login_response(sid: &str) -> HttpResponse {
    HttpResponse {
        cookies: vec![("SID".to_owned(), sid.to_owned())],
        ..response(200, "Ok.")
    }
}

pub(crate) fn is_login(request: &HttpRequest) -> bool {
    request.method == HttpMethod::Post && request.path == LOGIN_PATH
}

pub(crate) fn is_info(request: &HttpRequest) -> bool {
    request.method == HttpMethod::Get && request.path == INFO_PATH
}

/// Decoded form-encoded body of a request.
pub(crate) fn form_of(request: &HttpRequest) -> Vec<(String, String)> {
    let body = request.body.clone().unwrap_or_default();
    form_urlencoded::parse(&body).into_owned().collect()
}

pub(crate) fn value_of<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

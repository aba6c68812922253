//! Buffered `multipart/form-data` encoding for torrent uploads.

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// Builds a complete multipart body in memory.
#[derive(Debug)]
pub(crate) struct MultipartForm {
    boundary: String,
    body: BytesMut,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self {
            boundary: format!("qbit-{}", Uuid::new_v4().simple()),
            body: BytesMut::new(),
        }
    }

    /// Appends a text field.
    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n",
            escape_header_value(name)
        ));
        self.body.put_slice(value.as_bytes());
        self.body.put_slice(b"\r\n");
        self
    }

    /// Appends a file field.
    pub(crate) fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/x-bittorrent\r\n",
            escape_header_value(name),
            escape_header_value(file_name)
        ));
        self.body.put_slice(data);
        self.body.put_slice(b"\r\n");
        self
    }

    /// Closes the body and returns it with its `Content-Type` header value.
    pub(crate) fn finish(mut self) -> (String, Bytes) {
        self.body.put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body.freeze(),
        )
    }

    fn open_part(&mut self, headers: &str) {
        self.body
            .put_slice(format!("--{}\r\n{}\r\n", self.boundary, headers).as_bytes());
    }
}

// Quoted header values: backslash and quote are escaped, CR and LF are percent-encoded so
// they cannot end the header line.
fn escape_header_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_contains_fields_and_file() {
        let (content_type, body) = MultipartForm::new()
            .text("skip_checking", "true")
            .file("torrents", "debian.torrent", b"d4:infoe")
            .finish();

        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        assert!(body.starts_with(&format!("--{boundary}\r\n")));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
        assert!(body.contains(
            "Content-Disposition: form-data; name=\"skip_checking\"\r\n\r\ntrue\r\n"
        ));
        assert!(body.contains("name=\"torrents\"; filename=\"debian.torrent\""));
        assert!(body.contains("\r\n\r\nd4:infoe\r\n"));
    }

    #[test]
    fn file_names_are_escaped() {
        let (_, body) = MultipartForm::new()
            .file("torrents", "a \"quoted\" name.torrent", b"")
            .finish();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("filename=\"a \\\"quoted\\\" name.torrent\""));
    }

    #[test]
    fn line_breaks_cannot_inject_headers() {
        let (_, body) = MultipartForm::new()
            .text("x\r\nX-Injected: 1", "v")
            .file("torrents", "evil\r\nContent-Type: text/html\n.torrent", b"")
            .finish();
        let body = String::from_utf8(body.to_vec()).unwrap();

        assert!(body.contains("name=\"x%0D%0AX-Injected: 1\"\r\n"));
        assert!(body.contains("filename=\"evil%0D%0AContent-Type: text/html%0A.torrent\"\r\n"));
        assert!(!body.contains("\r\nX-Injected"));
        assert!(!body.contains("\r\nContent-Type: text/html"));
    }

    #[test]
    fn boundaries_are_unique() {
        let (first, _) = MultipartForm::new().finish();
        let (second, _) = MultipartForm::new().finish();
        assert_ne!(first, second);
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::error;

/// Reason phrases for the statuses this framework emits itself.
fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Host-side output seam: the HTTP runtime implements this to put a
/// finished response on the wire.
pub trait ResponseWriter {
    fn write_response(
        &mut self,
        status: u16,
        headers: &[(String, String)],
        body: &[u8],
    ) -> io::Result<()>;
}

/// Sink for one outbound HTTP response.
///
/// Accumulates status, headers and body, then flushes exactly once through
/// a [`ResponseWriter`]. `send` is idempotent; a second call is a no-op.
/// `redirect` and `download` additionally lock the response against
/// further writes.
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    sent: bool,
    finalized: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
            sent: false,
            finalized: false,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        if !self.finalized {
            self.status = status;
        }
        self
    }

    /// Set a header, replacing any existing value (case-insensitive).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        if !self.finalized {
            self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
            self.headers.push((name.to_string(), value.into()));
        }
        self
    }

    /// Set the raw body. The content type is left untouched.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        if !self.finalized {
            self.body = body.into();
        }
        self
    }

    /// JSON body with `Content-Type: application/json`. The status is left
    /// as-is. A value that fails to serialize degrades to a 500.
    pub fn json<T: Serialize>(&mut self, data: &T) -> &mut Self {
        match serde_json::to_vec(data) {
            Ok(body) => {
                self.set_header("Content-Type", "application/json");
                self.set_body(body);
            }
            Err(err) => {
                error!(error = %err, "response body failed to serialize");
                self.set_status(500);
                self.set_body("Internal Server Error");
            }
        }
        self
    }

    /// HTML body with `Content-Type: text/html`.
    pub fn html(&mut self, markup: impl Into<String>) -> &mut Self {
        self.set_header("Content-Type", "text/html; charset=UTF-8");
        self.set_body(markup.into())
    }

    /// Plain-text body with `Content-Type: text/plain`.
    pub fn text(&mut self, body: impl Into<String>) -> &mut Self {
        self.set_header("Content-Type", "text/plain; charset=UTF-8");
        self.set_body(body.into())
    }

    /// Redirect with status 302, locking the response against further
    /// writes.
    pub fn redirect(&mut self, url: &str) -> &mut Self {
        self.redirect_with_status(url, 302)
    }

    /// Redirect with an explicit status, locking the response against
    /// further writes.
    pub fn redirect_with_status(&mut self, url: &str, status: u16) -> &mut Self {
        if self.finalized || self.sent {
            return self;
        }
        self.status = status;
        self.set_header("Location", url);
        self.body.clear();
        self.finalized = true;
        self
    }

    /// Serve a file as an attachment, locking the response. A missing file
    /// becomes a 404 with a plain-text body instead.
    pub fn download(&mut self, path: &Path, filename: Option<&str>) -> &mut Self {
        if self.finalized || self.sent {
            return self;
        }
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(_) => {
                self.set_status(404).text("File not found");
                return self;
            }
        };
        let fallback = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "download".to_string());
        let filename = filename.map_or(fallback, str::to_string);
        self.set_header("Content-Description", "File Transfer");
        self.set_header("Content-Type", "application/octet-stream");
        self.set_header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        );
        self.set_header("Content-Length", bytes.len().to_string());
        self.body = bytes;
        self.finalized = true;
        self
    }

    /// Adopt a response a handler built wholesale. No-op if this sink is
    /// already locked or flushed.
    pub fn adopt(&mut self, other: Response) {
        if self.finalized || self.sent {
            return;
        }
        self.status = other.status;
        self.headers = other.headers;
        self.body = other.body;
        self.finalized = other.finalized;
    }

    /// Flush through the writer. Idempotent: the second call is a no-op.
    pub fn send(&mut self, out: &mut dyn ResponseWriter) -> io::Result<()> {
        if self.sent {
            return Ok(());
        }
        out.write_response(self.status, &self.headers, &self.body)?;
        self.sent = true;
        Ok(())
    }
}

/// Plain HTTP/1.1 serialization over any [`io::Write`] sink.
///
/// A `Content-Length` header is added when the response did not set one.
pub struct HttpWriter<W: Write> {
    out: W,
}

impl<W: Write> HttpWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResponseWriter for HttpWriter<W> {
    fn write_response(
        &mut self,
        status: u16,
        headers: &[(String, String)],
        body: &[u8],
    ) -> io::Result<()> {
        write!(self.out, "HTTP/1.1 {} {}\r\n", status, status_reason(status))?;
        for (name, value) in headers {
            write!(self.out, "{name}: {value}\r\n")?;
        }
        if !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        {
            write!(self.out, "Content-Length: {}\r\n", body.len())?;
        }
        self.out.write_all(b"\r\n")?;
        self.out.write_all(body)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reason_covers_framework_statuses() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(405), "Method Not Allowed");
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut res = Response::new();
        res.set_header("Content-Type", "text/plain");
        res.set_header("content-type", "application/json");
        assert_eq!(res.header("CONTENT-TYPE"), Some("application/json"));
        assert_eq!(res.headers().len(), 1);
    }
}

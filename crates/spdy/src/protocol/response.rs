//! HTTP response information synthesized from a spdy header block.
//!
//! [`ResponseInfo`] keeps the raw header blob in the form a generic http header parser
//! consumes: a status line followed by `name:value` entries, every line terminated by
//! [`SEPARATOR`] instead of CRLF. [`ResponseInfo::head`] parses that blob into a
//! [`ResponseHead`].

use std::time::SystemTime;

use bytes::{BufMut, Bytes, BytesMut};
use http::{HeaderName, HeaderValue, Response, StatusCode, Version};
use httparse::Status;

use crate::protocol::{ParseError, SEPARATOR};

/// Type alias for HTTP response headers.
///
/// This type represents the header portion of an HTTP response, using
/// `http::Response<()>` with an empty body placeholder.
pub type ResponseHead = Response<()>;

/// Response metadata produced by translating a spdy header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    response_time: SystemTime,
    raw_headers: Bytes,
    was_fetched_via_spdy: bool,
}

impl ResponseInfo {
    pub fn new(response_time: SystemTime, raw_headers: Bytes, was_fetched_via_spdy: bool) -> Self {
        Self { response_time, raw_headers, was_fetched_via_spdy }
    }

    /// When the response headers were translated.
    pub fn response_time(&self) -> SystemTime {
        self.response_time
    }

    /// The raw header blob, each line terminated by [`SEPARATOR`].
    pub fn raw_headers(&self) -> &Bytes {
        &self.raw_headers
    }

    pub fn was_fetched_via_spdy(&self) -> bool {
        self.was_fetched_via_spdy
    }

    /// Iterates the lines of the raw header blob without their terminators.
    ///
    /// The first line is the status line.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        let raw = &self.raw_headers[..];
        raw.strip_suffix(&[SEPARATOR][..]).unwrap_or(raw).split(|byte| *byte == SEPARATOR)
    }

    /// Parses the raw header blob into a response head.
    ///
    /// Every `name:value` line becomes a header, in blob order, including the `status`
    /// and `version` entries carried over from the spdy header block.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The status line does not carry a three digit status code
    /// - The version is neither HTTP/1.0 nor HTTP/1.1
    /// - A line is not a valid `name:value` header
    pub fn head(&self) -> Result<ResponseHead, ParseError> {
        // httparse wants CRLF terminated lines and a blank line at the end
        let mut buf = BytesMut::with_capacity(self.raw_headers.len() * 2 + 2);
        let mut line_count = 0;
        for line in self.lines() {
            buf.put_slice(line);
            buf.put_slice(b"\r\n");
            line_count += 1;
        }
        buf.put_slice(b"\r\n");

        let mut headers = vec![httparse::EMPTY_HEADER; line_count];
        let mut parsed = httparse::Response::new(&mut headers);
        let parsed_result = parsed.parse(&buf).map_err(|e| match e {
            httparse::Error::Status => ParseError::invalid_status(e),
            httparse::Error::Version => ParseError::InvalidVersion(None),
            e => ParseError::invalid_header(e),
        });

        if let Status::Partial = parsed_result? {
            return Err(ParseError::invalid_header("raw header blob is incomplete"));
        }

        let version = match parsed.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            v => return Err(ParseError::InvalidVersion(v)),
        };

        let code = parsed.code.ok_or_else(|| ParseError::invalid_status("missing status code"))?;
        let status = StatusCode::from_u16(code).map_err(ParseError::invalid_status)?;

        let mut head = Response::new(());
        *head.status_mut() = status;
        *head.version_mut() = version;

        let header_map = head.headers_mut();
        header_map.reserve(parsed.headers.len());
        for header in parsed.headers.iter() {
            let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(ParseError::invalid_header)?;
            let value = HeaderValue::from_bytes(header.value).map_err(ParseError::invalid_header)?;
            header_map.append(name, value);
        }

        Ok(head)
    }
}

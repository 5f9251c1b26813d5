//! Translation of a received spdy header block into http response information.
//!
//! The raw header blob is built the same way an http/1.1 header section is serialized,
//! with [`SEPARATOR`] in place of CRLF:
//!
//! ```text
//! <version> <status>\0
//! <name>:<value>\0      one line per value, multi-valued names repeat
//! ```

use std::time::SystemTime;

use bytes::{BufMut, BytesMut};
use http::{HeaderName, HeaderValue};
use tracing::trace;

use crate::protocol::{ConvertError, HeaderBlock, ResponseInfo, SEPARATOR, STATUS, VERSION};

/// Builds [`ResponseInfo`] from a spdy header block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseTranslator;

impl ResponseTranslator {
    /// Translates `headers` into response information timestamped with the current time.
    ///
    /// Every entry of the block, `status` and `version` included, becomes one
    /// `name:value` line per value.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingRequiredField`] if the block has no `status` or no
    /// `version` header.
    pub fn translate(&self, headers: &HeaderBlock) -> Result<ResponseInfo, ConvertError> {
        self.translate_at(headers, SystemTime::now())
    }

    /// Same as [`ResponseTranslator::translate`] with an explicit response time.
    ///
    /// # Errors
    ///
    /// See [`ResponseTranslator::translate`].
    pub fn translate_at(&self, headers: &HeaderBlock, response_time: SystemTime) -> Result<ResponseInfo, ConvertError> {
        let status = required(headers, STATUS)?;
        let version = required(headers, VERSION)?;

        let mut raw = BytesMut::with_capacity(blob_capacity(headers));
        raw.put_slice(version.as_bytes());
        raw.put_u8(b' ');
        raw.put_slice(status.as_bytes());
        raw.put_u8(SEPARATOR);

        for (name, value) in headers {
            raw.put_slice(name.as_str().as_bytes());
            raw.put_u8(b':');
            raw.put_slice(value.as_bytes());
            raw.put_u8(SEPARATOR);
        }

        trace!(header_count = headers.len(), blob_size = raw.len(), "translated spdy header block into http response");
        Ok(ResponseInfo::new(response_time, raw.freeze(), true))
    }
}

// the status line takes the first value when the transport sent several
fn required(headers: &HeaderBlock, name: HeaderName) -> Result<&HeaderValue, ConvertError> {
    match headers.get(&name) {
        Some(value) => Ok(value),
        None => Err(ConvertError::missing_required_field(name)),
    }
}

fn blob_capacity(headers: &HeaderBlock) -> usize {
    headers.iter().map(|(name, value)| name.as_str().len() + value.len() + 2).sum::<usize>() + 32
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{StatusCode, Version};

    fn block(fields: &[(&str, &str)]) -> HeaderBlock {
        HeaderBlock::try_from_fields(fields.iter().copied()).unwrap()
    }

    fn lines(info: &ResponseInfo) -> Vec<String> {
        info.lines().map(|line| String::from_utf8(line.to_vec()).unwrap()).collect()
    }

    #[test]
    fn missing_status() {
        let headers = block(&[("version", "HTTP/1.1"), ("content-type", "text/html")]);
        let err = ResponseTranslator.translate(&headers).unwrap_err();
        assert_eq!(err, ConvertError::MissingRequiredField { name: STATUS });
    }

    #[test]
    fn missing_version() {
        let headers = block(&[("status", "200"), ("content-type", "text/html")]);
        let err = ResponseTranslator.translate(&headers).unwrap_err();
        assert_eq!(err, ConvertError::MissingRequiredField { name: VERSION });
    }

    #[test]
    fn missing_both_reports_status() {
        let err = ResponseTranslator.translate(&HeaderBlock::new()).unwrap_err();
        assert_eq!(err, ConvertError::missing_required_field(STATUS));
    }

    #[test]
    fn minimal_block() {
        let headers = block(&[("status", "200"), ("version", "HTTP/1.1")]);

        let info = ResponseTranslator.translate(&headers).unwrap();

        assert!(info.was_fetched_via_spdy());
        assert!(info.raw_headers().starts_with(b"HTTP/1.1 200\0"));
        assert_eq!(info.raw_headers(), &Bytes::from_static(b"HTTP/1.1 200\0status:200\0version:HTTP/1.1\0"));
    }

    #[test]
    fn status_line_without_other_headers() {
        let mut headers = HeaderBlock::new();
        headers.insert(STATUS, HeaderValue::from_static("200"));
        headers.insert(VERSION, HeaderValue::from_static("HTTP/1.1"));

        let info = ResponseTranslator.translate(&headers).unwrap();

        // the required fields are not special cased in the header lines
        assert_eq!(lines(&info), vec!["HTTP/1.1 200", "status:200", "version:HTTP/1.1"]);
    }

    #[test]
    fn multi_valued_header_becomes_separate_lines() {
        let headers = block(&[("status", "200 OK"), ("version", "HTTP/1.1"), ("set-cookie", "foo\0bar")]);

        let info = ResponseTranslator.translate(&headers).unwrap();

        let raw = info.raw_headers();
        let foo = raw.windows(15).position(|w| w == b"set-cookie:foo\0").unwrap();
        let bar = raw.windows(15).position(|w| w == b"set-cookie:bar\0").unwrap();
        assert!(foo < bar);
        assert_eq!(lines(&info).iter().filter(|line| line.starts_with("set-cookie:")).count(), 2);
    }

    #[test]
    fn empty_segments_are_kept() {
        let headers = block(&[("status", "204"), ("version", "HTTP/1.1"), ("x-trailing", "a\0"), ("x-empty", "")]);

        let info = ResponseTranslator.translate(&headers).unwrap();
        let lines = lines(&info);

        assert!(lines.contains(&"x-trailing:a".to_string()));
        assert_eq!(lines.iter().filter(|line| *line == "x-trailing:").count(), 1);
        assert!(lines.contains(&"x-empty:".to_string()));
    }

    #[test]
    fn multi_valued_status_uses_first_value() {
        let headers = block(&[("status", "200\0500"), ("version", "HTTP/1.1")]);

        let info = ResponseTranslator.translate(&headers).unwrap();

        assert_eq!(lines(&info)[0], "HTTP/1.1 200");
        assert_eq!(info.head().unwrap().status(), StatusCode::OK);
    }

    #[test]
    fn response_time_is_recorded() {
        let headers = block(&[("status", "200"), ("version", "HTTP/1.1")]);
        let before = SystemTime::now();

        let info = ResponseTranslator.translate(&headers).unwrap();

        assert!(info.response_time() >= before);
        assert!(info.response_time() <= SystemTime::now());

        let fixed = ResponseTranslator.translate_at(&headers, SystemTime::UNIX_EPOCH).unwrap();
        assert_eq!(fixed.response_time(), SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn translated_blob_parses_as_http_head() {
        let mut headers = block(&[("status", "301 Moved Permanently"), ("version", "HTTP/1.1")]);
        headers.append(HeaderName::from_static("location"), HeaderValue::from_static("https://example.com/"));

        let head = ResponseTranslator.translate(&headers).unwrap().head().unwrap();

        assert_eq!(head.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(head.version(), Version::HTTP_11);
        assert_eq!(head.headers().get(http::header::LOCATION), Some(&HeaderValue::from_static("https://example.com/")));
    }
}
